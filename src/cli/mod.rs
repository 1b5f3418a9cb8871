use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "token-tracker")]
#[command(about = "Track API token usage and cost")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args)]
pub struct ConnectionArgs {
    /// Supabase project URL
    #[arg(long, global = true, env = "SUPABASE_URL")]
    pub url: Option<String>,

    /// Supabase anon key
    #[arg(long, global = true, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub key: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive dashboard (default)
    Dashboard,

    /// Show total tokens, total cost and daily average
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show per-day usage for the most recent active days
    Daily {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the most recent usage records
    Recent {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["token-tracker", "--url", "https://x.supabase.co"])
            .expect("should parse");
        assert!(cli.command.is_none());
        assert_eq!(cli.connection.url.as_deref(), Some("https://x.supabase.co"));
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::try_parse_from(["token-tracker", "daily", "--json", "--key", "anon"])
            .expect("should parse");
        assert!(matches!(cli.command, Some(Commands::Daily { json: true })));
        assert_eq!(cli.connection.key.as_deref(), Some("anon"));
    }
}
