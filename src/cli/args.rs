use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "relcert")]
#[command(version)]
#[command(about = "Fetch, download and share relationship achievement certificates")]
#[command(long_about = None)]
pub struct Cli {
    /// Certificate service base URL
    #[arg(long, env = "RELCERT_API_URL")]
    pub api_url: Option<String>,

    /// Session bearer token
    #[arg(long, env = "RELCERT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Config file path (default: ~/.config/relcert/config.yaml)
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (repeat for more verbosity: -v INFO, -vv DEBUG, -vvv TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output raw tab-separated values (no formatting)
    #[arg(short, long)]
    pub raw: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show one certificate
    Show {
        /// Certificate id
        id: String,
    },
    /// List certificates, optionally for one relationship or filtered by the service
    List {
        /// Relationship id (uses the relationship endpoint, filters are not allowed)
        #[arg(long, conflicts_with = "filter")]
        relationship: Option<String>,
        /// Filter passed to the service as a query parameter (repeatable): key=value
        #[arg(long, short = 'f', value_name = "KEY=VALUE")]
        filter: Vec<String>,
        /// Columns to display (comma-separated): id,number,title,type,level,recipients,issued_by,valid_until,views,downloads,shares. Use +column to append to defaults.
        #[arg(long)]
        columns: Option<String>,
    },
    /// Download a certificate document
    Download {
        /// Certificate id
        id: String,
        /// Output directory (default: download_dir from config, else ~/Downloads)
        #[arg(long, short = 'o')]
        output: Option<String>,
    },
    /// Create a share link for a certificate
    Share {
        /// Certificate id
        id: String,
        /// Target platform: twitter, facebook, linkedin, copy (other values are forwarded as-is)
        #[arg(long, short = 'p', default_value = "copy")]
        platform: String,
    },
    /// Generate shell completion scripts
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_filters() {
        let cli = Cli::parse_from([
            "relcert", "-vv", "list", "-f", "type=milestone", "--filter", "level=gold",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::List {
                relationship,
                filter,
                columns,
            } => {
                assert!(relationship.is_none());
                assert_eq!(filter, vec!["type=milestone", "level=gold"]);
                assert!(columns.is_none());
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_relationship_conflicts_with_filter() {
        let result = Cli::try_parse_from([
            "relcert",
            "list",
            "--relationship",
            "rel-1",
            "--filter",
            "type=trust",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_share_default_platform() {
        let cli = Cli::parse_from(["relcert", "share", "c1"]);
        match cli.command {
            Commands::Share { id, platform } => {
                assert_eq!(id, "c1");
                assert_eq!(platform, "copy");
            }
            _ => panic!("expected share command"),
        }
    }
}
