use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "airpower-leaderboard", version, about = "Air power leaderboard TUI")]
pub struct CliArgs {
    /// Load every roster, print the leaderboard and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Write every loaded roster to one CSV with a country column (headless)
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override roster source (base URL or directory)
    #[arg(long, value_name = "URL|DIR")]
    pub source: Option<String>,

    /// Override the entity loaded first
    #[arg(long = "default", value_name = "CODE")]
    pub default_entity: Option<String>,

    /// Override fetch timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Override how many rosters load at once after the default
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Override log file used by the interactive mode
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(source) = &self.source {
            std::env::set_var("ROSTER_SOURCE", source);
        }
        if let Some(code) = &self.default_entity {
            std::env::set_var("DEFAULT_ENTITY", code);
        }
        if let Some(timeout) = self.timeout {
            std::env::set_var("FETCH_TIMEOUT_SECS", timeout.to_string());
        }
        if let Some(concurrency) = self.concurrency {
            std::env::set_var("FETCH_CONCURRENCY", concurrency.to_string());
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let args = CliArgs::parse_from([
            "airpower-leaderboard",
            "--headless",
            "--json",
            "--source",
            "https://example.org/data",
            "--default",
            "fr",
            "--concurrency",
            "3",
        ]);

        assert!(args.headless);
        assert!(args.json);
        assert_eq!(args.source.as_deref(), Some("https://example.org/data"));
        assert_eq!(args.default_entity.as_deref(), Some("fr"));
        assert_eq!(args.concurrency, Some(3));
        assert!(args.export.is_none());
    }

    #[test]
    fn help_mentions_headless_flag() {
        assert!(CliArgs::help_text().contains("--headless"));
    }
}
