use crate::core::schema::{self, Field, ValidationErrors};
use crate::domain::model::{FormInput, Notification, RecommendationResult};
use crate::domain::ports::{Notifier, RecommendationService};
use tokio::sync::Mutex;

pub const SUCCESS_MESSAGE: &str = "Recommendation generated!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// 可以提交；`error` 是上一次提交失敗的訊息
    Idle { error: Option<String> },
    Submitting,
    ResultAvailable(RecommendationResult),
}

impl Default for FormState {
    fn default() -> Self {
        FormState::Idle { error: None }
    }
}

impl FormState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormState::Submitting)
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            "Generating Recommendation..."
        } else {
            "Get My Recommendation"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 欄位驗證失敗，沒有送出請求
    Invalid(ValidationErrors),
    /// 已有請求在進行中，這次提交被忽略
    Busy,
    Completed(RecommendationResult),
    Failed(String),
}

#[derive(Debug, Default)]
struct FormSession {
    input: FormInput,
    field_errors: ValidationErrors,
    state: FormState,
}

/// One form instance: input, inline errors and submission state.
///
/// At most one request is in flight per controller. The lock is released
/// while the service call is awaited, so the form stays readable and editable.
pub struct FormController<S: RecommendationService, N: Notifier> {
    service: S,
    notifier: N,
    session: Mutex<FormSession>,
}

impl<S: RecommendationService, N: Notifier> FormController<S, N> {
    pub fn new(service: S, notifier: N) -> Self {
        Self {
            service,
            notifier,
            session: Mutex::new(FormSession::default()),
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub async fn set_input(&self, input: FormInput) {
        self.session.lock().await.input = input;
    }

    pub async fn set_field(&self, field: Field, value: Option<String>) {
        let mut session = self.session.lock().await;
        let slot = match field {
            Field::Age => &mut session.input.age,
            Field::Income => &mut session.input.income,
            Field::Dependents => &mut session.input.dependents,
            Field::RiskTolerance => &mut session.input.risk_tolerance,
        };
        *slot = value;
    }

    pub async fn input(&self) -> FormInput {
        self.session.lock().await.input.clone()
    }

    pub async fn field_errors(&self) -> ValidationErrors {
        self.session.lock().await.field_errors.clone()
    }

    pub async fn state(&self) -> FormState {
        self.session.lock().await.state.clone()
    }

    pub async fn is_submitting(&self) -> bool {
        self.session.lock().await.state.is_submitting()
    }

    pub async fn result(&self) -> Option<RecommendationResult> {
        match &self.session.lock().await.state {
            FormState::ResultAvailable(result) => Some(result.clone()),
            _ => None,
        }
    }

    /// Validates the current input and, if valid, requests a recommendation.
    pub async fn submit(&self) -> SubmitOutcome {
        let profile = {
            let mut session = self.session.lock().await;

            if session.state.is_submitting() {
                tracing::debug!("⏳ Submission already in flight, ignoring submit");
                return SubmitOutcome::Busy;
            }

            match schema::validate(&session.input) {
                Ok(profile) => {
                    session.field_errors = ValidationErrors::default();
                    session.state = FormState::Submitting;
                    profile
                }
                Err(errors) => {
                    tracing::debug!("📝 Form has {} invalid field(s): {}", errors.len(), errors);
                    session.field_errors = errors.clone();
                    return SubmitOutcome::Invalid(errors);
                }
            }
        };

        tracing::info!(
            "🚀 Requesting recommendation (risk tolerance: {})",
            profile.risk_tolerance()
        );

        let response = self.service.recommend(&profile).await;

        let outcome = {
            let mut session = self.session.lock().await;
            match response {
                Ok(result) => {
                    session.state = FormState::ResultAvailable(result.clone());
                    SubmitOutcome::Completed(result)
                }
                Err(e) => {
                    tracing::warn!(
                        "❌ Recommendation request failed: {} (Category: {:?})",
                        e,
                        e.category()
                    );
                    let message = e.failure_message();
                    session.state = FormState::Idle {
                        error: Some(message.clone()),
                    };
                    SubmitOutcome::Failed(message)
                }
            }
        };

        match &outcome {
            SubmitOutcome::Completed(_) => self.notifier.notify(Notification::success(SUCCESS_MESSAGE)),
            SubmitOutcome::Failed(message) => self.notifier.notify(Notification::error(message.clone())),
            SubmitOutcome::Invalid(_) | SubmitOutcome::Busy => {}
        }

        outcome
    }

    /// 清空表單回到初始狀態；請求進行中時不做任何事並回傳 false
    pub async fn reset(&self) -> bool {
        let mut session = self.session.lock().await;
        if session.state.is_submitting() {
            return false;
        }
        *session = FormSession::default();
        true
    }
}
