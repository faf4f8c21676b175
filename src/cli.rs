//! Command line interface.

use clap::{Parser, Subcommand};

/// League admin backend
///
/// Serves the admin console API. Configuration comes from `LEAGUE_*`
/// environment variables (a `.env` file is read first).
#[derive(Parser, Debug)]
#[command(version, about = "League admin backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Publish a new app version and exit
    UpdateVersion {
        /// Version string shown to the mobile clients, e.g. 1.8.0
        version: String,
    },
}

impl Cli {
    pub fn command(&self) -> &Command {
        self.command.as_ref().unwrap_or(&Command::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_is_default() {
        let cli = Cli::parse_from(["league-admin"]);
        assert_eq!(cli.command(), &Command::Serve);
    }

    #[test]
    fn test_update_version_takes_argument() {
        let cli = Cli::parse_from(["league-admin", "update-version", "1.8.0"]);
        assert_eq!(
            cli.command(),
            &Command::UpdateVersion {
                version: "1.8.0".to_string()
            }
        );
        assert!(Cli::try_parse_from(["league-admin", "update-version"]).is_err());
    }
}
