use clap::Parser;
use property_relay::config::Command;
use property_relay::utils::error::OutputStream;
use property_relay::utils::logger;
use property_relay::utils::validation::{mask_phone_number, validate_phone_number, Validate};
use property_relay::{
    CliConfig, Dispatcher, LocalStorage, MessagingCredentials, RelayConfig, RelayEngine,
    SearchFilter, TwilioProvider,
};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // .env 需在初始化日誌前載入，RUST_LOG 才會生效
    dotenvy::dotenv().ok();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting property-relay");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        // 查無物件與輸入錯誤不記為 error
        let level = e.log_level();
        if level == Level::INFO {
            tracing::info!("{} (Category: {:?})", e, e.category());
        } else if level == Level::WARN {
            tracing::warn!("⚠️ {} (Category: {:?})", e, e.category());
        } else {
            tracing::error!(
                "❌ {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
        }

        match e.output_stream() {
            OutputStream::Stdout => println!("{}", e.render()),
            OutputStream::Stderr => eprintln!("{}", e.render()),
        }

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn load_config(cli: &CliConfig) -> property_relay::Result<RelayConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            RelayConfig::from_file(path)?
        }
        None => RelayConfig::default(),
    };

    if let Some(dataset) = &cli.dataset {
        tracing::info!("🔧 Dataset path overridden to: {}", dataset);
        config.dataset.path = dataset.clone();
    }

    config.validate()?;
    Ok(config)
}

async fn run(cli: &CliConfig) -> property_relay::Result<()> {
    let config = load_config(cli)?;

    let credentials = MessagingCredentials::from_env();
    let missing_credentials = credentials.missing_fields();
    let provider = TwilioProvider::new(
        config.provider.base_url.clone(),
        credentials,
        config.provider.timeout_seconds,
    );
    let dispatcher = Dispatcher::new(
        provider,
        config.provider.from_number.clone(),
        config.provider.channel_prefix.clone(),
    );
    let engine = RelayEngine::new(
        LocalStorage::default(),
        config.dataset_path().to_string(),
        dispatcher,
    );

    match &cli.command {
        Command::Options => {
            let options = engine.filter_options().await?;
            println!("Locations:");
            for location in &options.locations {
                println!("  {}", location);
            }
            println!("BHK:");
            for bhk in &options.bhks {
                println!("  {}", bhk);
            }
        }
        Command::Preview { location, bhk } => {
            let message = engine.preview(&SearchFilter::new(location, bhk)).await?;
            println!("{}", message);
        }
        Command::Send { location, bhk, phone } => {
            validate_phone_number(phone)?;

            // 只有實際發送時才需要憑證
            if !missing_credentials.is_empty() {
                tracing::warn!(
                    "⚠️ {} not set; the provider will reject this send",
                    missing_credentials.join(", ")
                );
            }

            let receipt = engine
                .relay(&SearchFilter::new(location, bhk), phone)
                .await?;

            tracing::info!(
                "📨 Message {} sent to {} at {}",
                receipt.message_id,
                mask_phone_number(phone),
                receipt.sent_at.to_rfc3339()
            );
            println!("✅ Sent! Message SID: {}", receipt.message_id);
        }
    }

    Ok(())
}
