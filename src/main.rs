use clap::Parser;
use computer_database::app::commands;
use computer_database::config::cli::LogFormat;
use computer_database::utils::error::{CdbError, ErrorSeverity};
use computer_database::utils::{logger, validation::Validate};
use computer_database::{ApiClient, CliConfig};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 先讀設定檔，日誌格式可能由檔案決定
    let file = match cli.load_file() {
        Ok(file) => file,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    };

    let verbose = cli.verbose(file.as_ref());
    match cli.log_format(file.as_ref()) {
        LogFormat::Text => logger::init_cli_logger(verbose),
        LogFormat::Json => logger::init_json_logger(verbose),
    }

    tracing::info!("Starting cdb");
    tracing::debug!("CLI config: {:?}", cli);

    let result = async {
        let settings = cli.settings(file.as_ref())?;
        settings.validate()?;
        let client = ApiClient::from_config(&settings)?;
        tracing::debug!("Using API at {}", client.base_url());
        commands::run(&client, &cli.command).await
    }
    .await;

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!(
                "❌ {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    }
}

fn exit_code(e: &CdbError) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
