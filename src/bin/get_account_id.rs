// Prints the account id for a Dexcom Share login.

use clap::Parser;
use dexcom_share::config::DEFAULT_SERVER_URL;
use dexcom_share::domain::model::Credentials;
use dexcom_share::utils::{logger, validation::Validate};
use dexcom_share::{ShareClient, ShareConfig, ShareFlow};

#[derive(Parser)]
#[command(about = "Print the Dexcom Share account id for a username and password")]
struct Args {
    /// Dexcom account username
    #[arg(allow_hyphen_values = true)]
    username: String,

    /// Dexcom account password
    #[arg(allow_hyphen_values = true)]
    password: String,

    /// Share web services base URL
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    server_url: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let config = ShareConfig::with_server_url(args.server_url);
    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let credentials = Credentials::new(args.username, args.password);
    let flow = ShareFlow::new(ShareClient::new(config));

    match flow.account_id(&credentials, &mut std::io::stdout().lock()).await {
        Ok(account_id) => tracing::debug!("Account id resolved: {}", account_id),
        Err(e) => {
            tracing::error!(
                "❌ Authentication failed: {} (Category: {:?})",
                e,
                e.category()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_take_credentials_and_server_only() {
        let args = Args::try_parse_from(["get_account_id", "alice", "-s3cret"]).unwrap();

        assert_eq!(args.username, "alice");
        assert_eq!(args.password, "-s3cret");
        assert_eq!(args.server_url, DEFAULT_SERVER_URL);
        assert!(!args.verbose);
    }

    #[test]
    fn test_readings_flags_are_not_accepted() {
        let result =
            Args::try_parse_from(["get_account_id", "alice", "secret", "--max-count", "5"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_help_describes_account_id() {
        let help = <Args as clap::CommandFactory>::command()
            .render_help()
            .to_string();

        assert!(help.contains("account id"));
        assert!(!help.contains("glucose"));
    }
}
