use std::io::{BufRead, Write};

use crate::cli::{AddArgs, Cli, Commands, EditArgs, ListArgs};
use crate::consts::DATE_FORMAT;
use crate::core::{Session, SessionFields, SortSpec, Tracker};
use crate::error::AppError;
use crate::output::{
    NumberFormat, TableOptions, output_session_json, output_sessions_json, output_stats_json,
    print_session_table, print_stats_table,
};
use crate::storage::SessionStorage;
use crate::utils::{Timezone, normalize_date};

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) timezone: Timezone,
    pub(crate) number_format: NumberFormat,
}

impl CommandContext<'_> {
    fn table_options(&self) -> TableOptions {
        TableOptions {
            use_color: self.cli.use_color(),
            compact: self.cli.compact,
            number_format: self.number_format,
        }
    }
}

/// Ask on stdin; anything but y/yes is a no
fn confirm(prompt: &str) -> Result<bool, AppError> {
    eprint!("{prompt} [y/N] ");
    std::io::stderr().flush().map_err(AppError::Prompt)?;
    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(AppError::Prompt)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

fn report_session(session: &Session, verb: &str, ctx: &CommandContext<'_>) {
    if ctx.cli.json {
        println!("{}", output_session_json(session));
    } else {
        println!("{verb} session {}: {}", session.id, session.subject);
    }
}

fn report_missing(id: u64) {
    println!("No session with id {id}.");
}

fn handle_list<S: SessionStorage>(
    tracker: &mut Tracker<S>,
    args: ListArgs,
    ctx: &CommandContext<'_>,
) {
    tracker.set_status_filter(args.status);
    tracker.set_search(args.search.as_deref().unwrap_or_default());

    if args.sort.is_empty() {
        let default = ctx
            .cli
            .default_sort
            .map(|key| SortSpec::new(key, ctx.cli.default_order.unwrap_or_default()));
        tracker.set_sort(default);
    }
    // Each --sort is one header click
    for key in args.sort {
        tracker.select_sort(key);
    }
    if let Some(order) = args.order {
        match tracker.params().sort {
            Some(spec) => tracker.set_sort(Some(SortSpec::new(spec.key, order))),
            None => tracing::warn!("--order has no effect without a sort column"),
        }
    }

    let view = tracker.view();
    if ctx.cli.json {
        println!("{}", output_sessions_json(&view));
    } else {
        print_session_table(
            &view,
            tracker.sessions().len(),
            &tracker.statistics(),
            ctx.table_options(),
        );
    }
}

fn handle_add<S: SessionStorage>(
    tracker: &mut Tracker<S>,
    args: AddArgs,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let date = match args.date.as_deref() {
        Some(raw) => normalize_date(raw)?,
        None => ctx.timezone.today().format(DATE_FORMAT).to_string(),
    };
    let fields = SessionFields {
        subject: args.subject,
        duration: Some(args.duration),
        date,
        notes: args.notes,
    };
    let created = tracker.create(&fields)?;
    report_session(&created, "Added", ctx);
    Ok(())
}

fn handle_edit<S: SessionStorage>(
    tracker: &mut Tracker<S>,
    args: EditArgs,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let date = args.date.as_deref().map(normalize_date).transpose()?;

    if tracker.get(args.id).is_none() {
        report_missing(args.id);
        return Ok(());
    }
    if !tracker.begin_edit(args.id) {
        return Err(AppError::Busy);
    }
    if !args.has_changes() {
        tracker.cancel_edit();
        println!("No changes given; edit discarded.");
        return Ok(());
    }

    if let Some(buffer) = tracker.edit_buffer_mut() {
        if let Some(subject) = args.subject {
            buffer.subject = subject;
        }
        if let Some(duration) = args.duration {
            buffer.duration = Some(duration);
        }
        if let Some(date) = date {
            buffer.date = date;
        }
        if let Some(notes) = args.notes {
            buffer.notes = notes;
        }
    }

    tracker.save_edit()?;
    if let Some(session) = tracker.get(args.id) {
        report_session(session, "Updated", ctx);
    }
    Ok(())
}

fn handle_toggle<S: SessionStorage>(
    tracker: &mut Tracker<S>,
    id: u64,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    if tracker.toggle_completed(id)?.is_none() {
        report_missing(id);
        return Ok(());
    }
    if let Some(session) = tracker.get(id) {
        let verb = if session.completed {
            "Completed"
        } else {
            "Reopened"
        };
        report_session(session, verb, ctx);
    }
    Ok(())
}

fn handle_delete<S: SessionStorage>(
    tracker: &mut Tracker<S>,
    id: u64,
    yes: bool,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let Some(session) = tracker.get(id) else {
        report_missing(id);
        return Ok(());
    };
    let prompt = format!("Delete session {id} ({})?", session.subject);
    if !yes && !confirm(&prompt)? {
        println!("Delete cancelled.");
        return Ok(());
    }
    if let Some(removed) = tracker.delete(id)? {
        report_session(&removed, "Deleted", ctx);
    }
    Ok(())
}

fn handle_reset<S: SessionStorage>(
    tracker: &mut Tracker<S>,
    yes: bool,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    if !yes && !confirm("Replace all sessions with the sample data?")? {
        println!("Reset cancelled.");
        return Ok(());
    }
    tracker.reset_to_seed()?;
    if ctx.cli.json {
        println!("{}", output_sessions_json(tracker.sessions()));
    } else {
        println!("Restored {} sample sessions.", tracker.sessions().len());
    }
    Ok(())
}

fn handle_stats<S: SessionStorage>(tracker: &Tracker<S>, ctx: &CommandContext<'_>) {
    let stats = tracker.statistics();
    if ctx.cli.json {
        println!("{}", output_stats_json(&stats));
    } else {
        print_stats_table(&stats, ctx.table_options());
    }
}

/// Dispatch one command against the tracker
pub(crate) fn handle_command<S: SessionStorage>(
    tracker: &mut Tracker<S>,
    command: Option<Commands>,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    match command {
        None => handle_list(tracker, ListArgs::default(), ctx),
        Some(Commands::List(args)) => handle_list(tracker, args, ctx),
        Some(Commands::Add(args)) => return handle_add(tracker, args, ctx),
        Some(Commands::Edit(args)) => return handle_edit(tracker, args, ctx),
        Some(Commands::Toggle { id }) => return handle_toggle(tracker, id, ctx),
        Some(Commands::Delete { id, yes }) => return handle_delete(tracker, id, yes, ctx),
        Some(Commands::Reset { yes }) => return handle_reset(tracker, yes, ctx),
        Some(Commands::Stats) => handle_stats(tracker, ctx),
    }
    Ok(())
}
