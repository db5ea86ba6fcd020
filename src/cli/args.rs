//! CLI argument definitions using clap
//!
//! Commands:
//! - stempredict serve --config <path> [--port <port>]
//! - stempredict predict --config <path>
//! - stempredict encode --config <path>
//! - stempredict check --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// stempredict - serve a trained student outcome model over HTTP
#[derive(Parser, Debug)]
#[command(name = "stempredict")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the model and start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./stempredict.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Read one record from stdin, print the prediction and exit
    Predict {
        /// Path to configuration file
        #[arg(long, default_value = "./stempredict.json")]
        config: PathBuf,
    },

    /// Read one record from stdin and print its encoded feature vector
    Encode {
        /// Path to configuration file
        #[arg(long, default_value = "./stempredict.json")]
        config: PathBuf,
    },

    /// Validate the configuration and model artifact
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./stempredict.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_port_override() {
        let cli = Cli::try_parse_from(["stempredict", "serve", "--port", "9100"]).unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert_eq!(config, PathBuf::from("./stempredict.json"));
                assert_eq!(port, Some(9100));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_check_with_config() {
        let cli =
            Cli::try_parse_from(["stempredict", "check", "--config", "/etc/stem.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Check { config } if config == PathBuf::from("/etc/stem.json")
        ));
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["stempredict", "train"]).is_err());
    }
}
