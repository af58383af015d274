//! CLI subcommand definitions

use clap::{Args, Subcommand};

use crate::core::{SortDirection, SortKey, StatusFilter};

/// Main CLI commands
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// List sessions (default)
    List(ListArgs),
    /// Log a new study session
    Add(AddArgs),
    /// Change fields of an existing session
    Edit(EditArgs),
    /// Mark a session completed, or undo it
    Toggle {
        /// Session id
        id: u64,
    },
    /// Delete a session
    Delete {
        /// Session id
        id: u64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Restore the sample sessions and clear stored data
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show totals and completion rate
    Stats,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// Show only completed or pending sessions
    #[arg(long, value_enum, default_value = "all")]
    pub(crate) status: StatusFilter,

    /// Case-insensitive text to find in subject or notes
    #[arg(short = 'q', long, value_name = "TERM")]
    pub(crate) search: Option<String>,

    /// Sort column; repeat the same column to flip direction
    #[arg(short, long, value_enum, value_name = "KEY")]
    pub(crate) sort: Vec<SortKey>,

    /// Force the sort direction
    #[arg(short, long, value_enum)]
    pub(crate) order: Option<SortDirection>,
}

#[derive(Args, Debug)]
pub(crate) struct AddArgs {
    /// What you studied
    #[arg(long)]
    pub(crate) subject: String,

    /// Minutes spent
    #[arg(long)]
    pub(crate) duration: u32,

    /// Study date, YYYY-MM-DD or YYYYMMDD (default: today)
    #[arg(long)]
    pub(crate) date: Option<String>,

    /// Topic, chapter, or any notes
    #[arg(long, default_value = "")]
    pub(crate) notes: String,
}

#[derive(Args, Debug)]
pub(crate) struct EditArgs {
    /// Session id
    pub(crate) id: u64,

    #[arg(long)]
    pub(crate) subject: Option<String>,

    #[arg(long)]
    pub(crate) duration: Option<u32>,

    /// YYYY-MM-DD or YYYYMMDD
    #[arg(long)]
    pub(crate) date: Option<String>,

    #[arg(long)]
    pub(crate) notes: Option<String>,
}

impl EditArgs {
    pub(crate) fn has_changes(&self) -> bool {
        self.subject.is_some() || self.duration.is_some() || self.date.is_some() || self.notes.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("studytrack").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_subcommand_is_none() {
        assert!(parse(&[]).command.is_none());
    }

    #[test]
    fn list_collects_repeated_sort_clicks() {
        let cli = parse(&["list", "--status", "pending", "-s", "date", "-s", "date", "-q", "db"]);
        let Some(Commands::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.status, StatusFilter::Pending);
        assert_eq!(args.sort, vec![SortKey::Date, SortKey::Date]);
        assert_eq!(args.search.as_deref(), Some("db"));
        assert!(args.order.is_none());
    }

    #[test]
    fn add_requires_subject_and_duration() {
        let missing = Cli::try_parse_from(["studytrack", "add", "--duration", "30"]);
        assert!(missing.is_err());
        let cli = parse(&["add", "--subject", "Networks", "--duration", "50"]);
        let Some(Commands::Add(args)) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.subject, "Networks");
        assert!(args.date.is_none());
        assert_eq!(args.notes, "");
    }

    #[test]
    fn edit_without_flags_has_no_changes() {
        let cli = parse(&["edit", "3"]);
        let Some(Commands::Edit(args)) = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(args.id, 3);
        assert!(!args.has_changes());
    }

    #[test]
    fn global_json_after_subcommand() {
        let cli = parse(&["stats", "--json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::Stats)));
    }
}
