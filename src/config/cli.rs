use crate::config::toml_config::AdvisorConfig;
use crate::domain::model::FormInput;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "life-advisor")]
#[command(about = "Life Insurance Advisor: get a coverage recommendation from four answers")]
#[command(allow_negative_numbers = true)]
pub struct CliConfig {
    /// Your age (18-80)
    #[arg(long)]
    pub age: Option<String>,

    /// Annual income
    #[arg(long)]
    pub income: Option<String>,

    /// Number of dependents (0-20)
    #[arg(long)]
    pub dependents: Option<String>,

    /// Risk tolerance: low, medium or high
    #[arg(long)]
    pub risk_tolerance: Option<String>,

    /// Base URL of the recommendation service
    #[arg(long)]
    pub base_url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds (client default when unset)
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Print the recommendation as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// 優先順序：命令列 > 設定檔 > 環境變數 > 預設值
    pub fn load_config(&self) -> Result<AdvisorConfig> {
        let env_layer = AdvisorConfig::from_env()?;

        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                AdvisorConfig::from_file(path)?.layered_over(env_layer)
            }
            None => env_layer,
        };

        if let Some(base_url) = &self.base_url {
            config.service.base_url = Some(base_url.clone());
        }
        if let Some(timeout) = self.timeout_seconds {
            config.service.timeout_seconds = Some(timeout);
        }

        Ok(config)
    }

    /// 命令列的答案覆蓋設定檔 [profile] 的答案
    pub fn form_input(&self, config: &AdvisorConfig) -> FormInput {
        let profile = config.form_input();
        FormInput {
            age: self.age.clone().or(profile.age),
            income: self.income.clone().or(profile.income),
            dependents: self.dependents.clone().or(profile.dependents),
            risk_tolerance: self.risk_tolerance.clone().or(profile.risk_tolerance),
        }
    }
}
