use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// 使用者在表單上輸入的原始內容，尚未驗證
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub age: Option<String>,
    pub income: Option<String>,
    pub dependents: Option<String>,
    pub risk_tolerance: Option<String>,
}

impl FormInput {
    pub fn new(
        age: impl Into<String>,
        income: impl Into<String>,
        dependents: impl Into<String>,
        risk_tolerance: impl Into<String>,
    ) -> Self {
        Self {
            age: Some(age.into()),
            income: Some(income.into()),
            dependents: Some(dependents.into()),
            risk_tolerance: Some(risk_tolerance.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

impl RiskTolerance {
    pub const TOKENS: [&'static str; 3] = ["low", "medium", "high"];

    /// Parses the form token. Matching is exact: `Low` or ` low` are rejected.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Capitalized label the recommendation service expects.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "I prefer guaranteed returns",
            Self::Medium => "I'm comfortable with some risk",
            Self::High => "I'm willing to take risks for higher returns",
        }
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 通過驗證的申請資料；只能經由 `core::schema::validate` 建立
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationProfile {
    pub(crate) age: f64,
    pub(crate) income: f64,
    pub(crate) dependents: f64,
    pub(crate) risk_tolerance: RiskTolerance,
}

impl ApplicationProfile {
    pub fn age(&self) -> f64 {
        self.age
    }

    pub fn income(&self) -> f64 {
        self.income
    }

    pub fn dependents(&self) -> f64 {
        self.dependents
    }

    pub fn risk_tolerance(&self) -> RiskTolerance {
        self.risk_tolerance
    }

    pub fn to_request(&self) -> RecommendationRequest {
        RecommendationRequest::from(self)
    }
}

/// POST /recommendation 的請求主體
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(serialize_with = "serialize_number")]
    pub age: f64,
    #[serde(serialize_with = "serialize_number")]
    pub income: f64,
    #[serde(serialize_with = "serialize_number")]
    pub number_of_dependents: f64,
    #[serde(serialize_with = "serialize_risk_label")]
    pub risk_tolerance: RiskTolerance,
}

impl From<&ApplicationProfile> for RecommendationRequest {
    fn from(profile: &ApplicationProfile) -> Self {
        Self {
            age: profile.age,
            income: profile.income,
            number_of_dependents: profile.dependents,
            risk_tolerance: profile.risk_tolerance,
        }
    }
}

// 整數值寫成 JSON 整數（30 而不是 30.0）
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn serialize_risk_label<S: Serializer>(
    value: &RiskTolerance,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.label())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub recommendation: String,
    pub explanation: String,
}

/// Error body the service may send with a non-2xx status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            at: Utc::now(),
        }
    }
}
