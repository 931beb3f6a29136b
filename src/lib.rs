pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpRecommendationService, notifier::ConsoleNotifier};
pub use config::AdvisorConfig;
pub use core::form::{FormController, FormState, SubmitOutcome};
pub use utils::error::{AdvisorError, Result};
