use crate::Cli;
use std::path::PathBuf;

pub const DEFAULT_PROMPT: &str = ": ";

/// Runtime settings, resolved from the command line and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    pub log_file: Option<PathBuf>,
    pub command: Option<String>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            prompt: cli.prompt,
            log_file: cli.log_file,
            command: cli.command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_match_the_classic_prompt() {
        let config = Config::from(Cli::parse_from(["smallsh"]));
        assert_eq!(config.prompt, DEFAULT_PROMPT);
        assert_eq!(config.log_file, None);
        assert_eq!(config.command, None);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::from(Cli::parse_from([
            "smallsh",
            "--prompt",
            "$ ",
            "--log-file",
            "/tmp/smallsh.log",
            "-c",
            "status",
        ]));
        assert_eq!(config.prompt, "$ ");
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/smallsh.log")));
        assert_eq!(config.command.as_deref(), Some("status"));
    }
}
