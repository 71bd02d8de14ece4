// Prints the last glucose readings of a Dexcom Share account.
// Run with `get_bg_levels <Dexcom username> <Dexcom password>`.

use clap::Parser;
use dexcom_share::utils::{logger, validation::Validate};
use dexcom_share::{CliConfig, ShareClient, ShareFlow};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let credentials = config.credentials();
    let flow = ShareFlow::new(ShareClient::new(config));
    let mut out = std::io::stdout().lock();

    if let Err(e) = flow.run(&credentials, &mut out).await {
        tracing::error!(
            "❌ Reading glucose values failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}
