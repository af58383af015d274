//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode};
use crate::core::{SortDirection, SortKey};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "studytrack")]
#[command(about = "Track your daily study sessions in one place", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Directory holding the session store (default: platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub(crate) data_dir: Option<PathBuf>,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Compact output (fewer columns)
    #[arg(short = 'c', long, global = true)]
    pub(crate) compact: bool,

    /// Timezone used for "today" (e.g., "Asia/Kolkata", "UTC")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Locale for number formatting (e.g., "en", "de", "fr")
    #[arg(long, global = true, value_name = "LOCALE")]
    pub(crate) locale: Option<String>,

    /// Log filter (e.g., "warn", "studytrack=debug")
    #[arg(long, global = true, value_name = "FILTER", default_value = "warn")]
    pub(crate) log_level: String,

    /// Enable debug logging (shorthand for --log-level=debug)
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Default sort column, from config
    #[arg(skip)]
    pub(crate) default_sort: Option<SortKey>,

    /// Default sort direction, from config
    #[arg(skip)]
    pub(crate) default_order: Option<SortDirection>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.compact && config.compact {
            self.compact = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }

        // Only override enums still at their CLI default
        if let Some(color) = config.color
            && self.color == ColorMode::Auto
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        // String options: only apply if CLI didn't set them
        if self.data_dir.is_none() {
            self.data_dir = config.data_dir.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        if self.locale.is_none() {
            self.locale = config.locale.clone();
        }

        self.default_sort = config.sort;
        self.default_order = config.order;

        self
    }

    pub(crate) fn log_filter(&self) -> &str {
        if self.debug { "debug" } else { self.log_level.as_str() }
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("studytrack").chain(args.iter().copied()))
    }

    #[test]
    fn config_fills_unset_options() {
        let config: Config = toml::from_str(
            r#"
compact = true
color = "always"
timezone = "UTC"
sort = "date"
"#,
        )
        .unwrap();
        let cli = parse(&[]).with_config(&config);
        assert!(cli.compact);
        assert_eq!(cli.color, ColorMode::Always);
        assert_eq!(cli.timezone.as_deref(), Some("UTC"));
        assert_eq!(cli.default_sort, Some(SortKey::Date));
    }

    #[test]
    fn cli_wins_over_config() {
        let config: Config = toml::from_str(
            r#"
color = "always"
timezone = "UTC"
data_dir = "/from/config"
"#,
        )
        .unwrap();
        let cli = parse(&["--color", "never", "--timezone", "Asia/Tokyo", "--data-dir", "/cli"])
            .with_config(&config);
        assert_eq!(cli.color, ColorMode::Never);
        assert_eq!(cli.timezone.as_deref(), Some("Asia/Tokyo"));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/cli")));
    }

    #[test]
    fn no_color_disables_color() {
        let cli = parse(&["--color", "always", "--no-color"]);
        assert!(!cli.use_color());
    }

    #[test]
    fn debug_overrides_log_level() {
        assert_eq!(parse(&[]).log_filter(), "warn");
        assert_eq!(parse(&["--debug"]).log_filter(), "debug");
        assert_eq!(parse(&["--log-level", "info"]).log_filter(), "info");
    }
}
