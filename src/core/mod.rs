pub mod form;
pub mod schema;

pub use crate::domain::model::{ApplicationProfile, FormInput, RecommendationResult};
pub use crate::domain::ports::{ConfigProvider, Notifier, RecommendationService};
pub use crate::utils::error::Result;
