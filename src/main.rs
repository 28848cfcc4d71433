use chrono::Local;
use clap::Parser;
use domino_deal::config::cli::{CliArgs, LogFormat};
use domino_deal::core::notifier::timestamp_label;
use domino_deal::core::CredentialProvider;
use domino_deal::utils::error::{DealError, ErrorSeverity};
use domino_deal::utils::{logger, validation::Validate};
use domino_deal::{
    dry_run, DealConfig, Dealer, DominoSet, EnvCredentials, Notifier, PromptCredentials,
    SmtpMailTransport,
};

fn exit_code(e: &DealError) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: &DealError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(exit_code(e));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    match args.log_format {
        LogFormat::Compact => logger::init_cli_logger(args.verbose),
        LogFormat::Json => logger::init_json_logger(args.verbose),
    }

    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match DealConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    if args.continue_on_error {
        config.set_continue_on_error(true);
        tracing::info!("🔧 Continue-on-error enabled from command line");
    }

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let set = DominoSet::standard().shuffled(&mut rand::thread_rng());

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No email will be sent");
        match dry_run(&config, &set) {
            Ok(plan) => {
                println!("Would send {} hands", plan.len());
                return Ok(());
            }
            Err(e) => fail(&e),
        }
    }

    let password = match &config.smtp.password_env {
        Some(var) => EnvCredentials::new(var.clone()).get_secret(),
        None => PromptCredentials::new().get_secret(),
    };
    let password = match password {
        Ok(password) => password,
        Err(e) => fail(&e),
    };

    let transport = match SmtpMailTransport::new(&config, password) {
        Ok(transport) => transport,
        Err(e) => fail(&e),
    };

    let label = timestamp_label(&Local::now());
    let dealer = Dealer::new(Notifier::new(transport), config);

    match dealer.run(&set, &label).await {
        Ok(report) if report.is_complete() => {
            tracing::info!("✅ Every player has their hand");
        }
        Ok(report) => {
            for (player, e) in &report.failed {
                eprintln!("❌ {}: {}", player.address, e);
            }
            eprintln!(
                "💡 {} of {} hands were not delivered; re-running deals a new game for everyone",
                report.failed.len(),
                report.failed.len() + report.delivered.len()
            );
            std::process::exit(2);
        }
        Err(e) => fail(&e),
    }

    Ok(())
}
