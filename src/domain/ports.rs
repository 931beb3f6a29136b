use crate::domain::model::{ApplicationProfile, Notification, RecommendationResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// 外部推薦服務
#[async_trait]
pub trait RecommendationService: Send + Sync {
    async fn recommend(&self, profile: &ApplicationProfile) -> Result<RecommendationResult>;
}

/// Surface for transient success / error messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout(&self) -> Option<Duration>;
    fn headers(&self) -> &HashMap<String, String>;
}
