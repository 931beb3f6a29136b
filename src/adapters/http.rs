use crate::domain::model::{ApplicationProfile, RecommendationResult, ServiceErrorBody};
use crate::domain::ports::{ConfigProvider, RecommendationService};
use crate::utils::error::{AdvisorError, Result};
use async_trait::async_trait;
use reqwest::Client;

pub const RECOMMENDATION_PATH: &str = "/recommendation";

/// 以 reqwest 呼叫外部推薦服務
pub struct HttpRecommendationService<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> HttpRecommendationService<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// 直接接在 base URL 後面，保留 base URL 自己的路徑前綴
    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url().trim_end_matches('/'),
            RECOMMENDATION_PATH
        )
    }
}

#[async_trait]
impl<C: ConfigProvider> RecommendationService for HttpRecommendationService<C> {
    async fn recommend(&self, profile: &ApplicationProfile) -> Result<RecommendationResult> {
        let endpoint = self.endpoint();
        let body = profile.to_request();

        tracing::debug!("📡 POST {} with {:?}", endpoint, body);

        let mut request = self.client.post(&endpoint).json(&body);

        for (key, value) in self.config.headers() {
            request = request.header(key, value);
        }

        if let Some(timeout) = self.config.timeout() {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("📡 Recommendation service responded with {}", status);

        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str::<RecommendationResult>(&text).map_err(|e| {
                AdvisorError::InvalidResponseError {
                    message: e.to_string(),
                }
            })
        } else {
            // 錯誤主體是選擇性的，格式不符就當作沒有訊息
            let message = serde_json::from_str::<ServiceErrorBody>(&text)
                .ok()
                .and_then(|body| body.message);
            Err(AdvisorError::ServiceError {
                status: status.as_u16(),
                message,
            })
        }
    }
}
