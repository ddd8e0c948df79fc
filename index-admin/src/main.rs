use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use index_admin::commands::{self, Command};
use index_admin::config::init_tracing;
use index_admin::Dependencies;

#[derive(Parser)]
#[command(name = "index-admin")]
#[command(about = "Administer a single OpenSearch index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Index name (required)
    #[arg(long, short, env = "INDEX_ADMIN_INDEX", global = true)]
    index: Option<String>,

    /// OpenSearch URL (overrides OPENSEARCH_URL)
    #[arg(long, global = true)]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let index = cli
        .index
        .as_deref()
        .context("No index given: pass --index or set INDEX_ADMIN_INDEX")?;

    let dependencies = Dependencies::new(index, cli.url.as_deref())
        .context("Failed to initialize dependencies")?;

    let output = match commands::run(&dependencies.admin, &cli.command).await {
        Ok(output) => output,
        Err(e) => {
            error!(command = cli.command.name(), error = %e, "Command failed");
            return Err(e.into());
        }
    };

    info!(command = cli.command.name(), index = %index, "Command completed");
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_accepted_before_or_after_command() {
        let before = Cli::try_parse_from(["index-admin", "--index", "orders", "exists"]).unwrap();
        let after = Cli::try_parse_from(["index-admin", "exists", "--index", "orders"]).unwrap();

        assert_eq!(before.index.as_deref(), Some("orders"));
        assert_eq!(after.index.as_deref(), Some("orders"));
        assert!(matches!(after.command, Command::Exists));
    }

    #[test]
    fn test_url_after_command() {
        let cli = Cli::try_parse_from([
            "index-admin",
            "get-settings",
            "--include-defaults",
            "-i",
            "orders",
            "--url",
            "http://search:9200",
        ])
        .unwrap();

        assert_eq!(cli.url.as_deref(), Some("http://search:9200"));
        assert!(matches!(
            cli.command,
            Command::GetSettings {
                include_defaults: true
            }
        ));
    }
}
