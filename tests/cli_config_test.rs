#![cfg(feature = "cli")]

use anyhow::Result;
use clap::Parser;
use life_advisor::domain::model::FormInput;
use life_advisor::domain::ports::ConfigProvider;
use life_advisor::CliConfig;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

#[test]
fn test_answers_from_flags() -> Result<()> {
    let cli = CliConfig::try_parse_from([
        "life-advisor",
        "--age",
        "30",
        "--income",
        "75000",
        "--dependents",
        "2",
        "--risk-tolerance",
        "medium",
        "--base-url",
        "http://127.0.0.1:9999",
    ])?;

    let config = cli.load_config()?;
    assert_eq!(config.base_url(), "http://127.0.0.1:9999");
    assert_eq!(
        cli.form_input(&config),
        FormInput::new("30", "75000", "2", "medium")
    );
    Ok(())
}

#[test]
fn test_negative_numbers_reach_validation() -> Result<()> {
    let cli = CliConfig::try_parse_from(["life-advisor", "--dependents", "-1"])?;
    assert_eq!(cli.dependents.as_deref(), Some("-1"));
    Ok(())
}

#[test]
fn test_flags_override_config_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(
        br#"
[service]
base_url = "https://advisor.example.com"
timeout_seconds = 20

[profile]
age = 52
income = 98000
dependents = 3
risk_tolerance = "low"
"#,
    )?;

    let path = file.path().to_str().unwrap().to_string();
    let cli = CliConfig::try_parse_from([
        "life-advisor",
        "--config",
        path.as_str(),
        "--risk-tolerance",
        "high",
        "--timeout-seconds",
        "5",
    ])?;

    let config = cli.load_config()?;
    assert_eq!(config.base_url(), "https://advisor.example.com");
    assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    assert_eq!(
        cli.form_input(&config),
        FormInput::new("52", "98000", "3", "high")
    );
    Ok(())
}

#[test]
fn test_missing_answers_stay_missing() -> Result<()> {
    let cli = CliConfig::try_parse_from(["life-advisor", "--age", "40", "--base-url", "http://localhost:1"])?;
    let config = cli.load_config()?;
    let input = cli.form_input(&config);

    assert_eq!(input.age.as_deref(), Some("40"));
    assert!(input.income.is_none());
    assert!(input.dependents.is_none());
    assert!(input.risk_tolerance.is_none());
    Ok(())
}
