use clap::Parser;
use life_advisor::core::schema::{Field, ValidationErrors};
use life_advisor::domain::model::{RecommendationResult, RiskTolerance};
use life_advisor::utils::error::{AdvisorError, ErrorSeverity};
use life_advisor::utils::{logger, validation::Validate};
use life_advisor::{
    CliConfig, ConsoleNotifier, FormController, HttpRecommendationService, SubmitOutcome,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting life-advisor CLI");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let input = cli.form_input(&config);
    let service = HttpRecommendationService::new(config);
    tracing::debug!("Recommendation endpoint: {}", service.endpoint());

    let form = FormController::new(service, ConsoleNotifier);
    form.set_input(input).await;

    match form.submit().await {
        SubmitOutcome::Completed(result) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_recommendation(&result);
            }
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            print_field_errors(&errors);
            exit_with(&AdvisorError::from(errors));
        }
        SubmitOutcome::Failed(message) => {
            // 通知已經由 ConsoleNotifier 顯示
            tracing::debug!("Submission failed: {}", message);
            eprintln!("💡 Your answers were kept; run the same command again to retry.");
            std::process::exit(exit_code(ErrorSeverity::Medium));
        }
        SubmitOutcome::Busy => {
            eprintln!("⏳ A recommendation request is already in progress");
            std::process::exit(exit_code(ErrorSeverity::Medium));
        }
    }
}

fn print_recommendation(result: &RecommendationResult) {
    println!("Your Recommendation:");
    println!("  {}", result.recommendation);
    println!();
    println!("  {}", result.explanation);
}

fn print_field_errors(errors: &ValidationErrors) {
    eprintln!("❌ Please correct the following:");
    for error in errors.iter() {
        eprintln!("  • {}: {}", error.field.label(), error.message);
    }
    if errors.for_field(Field::RiskTolerance).is_some() {
        for risk in [RiskTolerance::Low, RiskTolerance::Medium, RiskTolerance::High] {
            eprintln!("      --risk-tolerance {:<6}  {}", risk.token(), risk.description());
        }
    }
}

fn exit_with(e: &AdvisorError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e.severity()))
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2, // 服務或網路錯誤，可重試
        ErrorSeverity::High => 1,   // 輸入或設定錯誤
        ErrorSeverity::Critical => 3,
    }
}
