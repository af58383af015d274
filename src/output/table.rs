use comfy_table::{Cell, Color};

use crate::core::{Session, Statistics};
use crate::output::format::{
    NumberFormat, create_styled_table, format_hours, format_number, header_cell, right_cell,
    styled_cell, truncate,
};

const SUBJECT_WIDTH: usize = 32;
const NOTES_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy)]
pub(crate) struct TableOptions {
    pub(crate) use_color: bool,
    pub(crate) compact: bool,
    pub(crate) number_format: NumberFormat,
}

fn status_cell(completed: bool, use_color: bool) -> Cell {
    let (text, color) = if completed {
        ("✓ Completed", Color::Green)
    } else {
        ("Pending", Color::Yellow)
    };
    styled_cell(text, use_color.then_some(color), false)
}

/// Print the derived view. `total` is the size of the full list, used to
/// tell "nothing stored" apart from "nothing matches".
pub(crate) fn print_session_table(
    view: &[Session],
    total: usize,
    stats: &Statistics,
    opts: TableOptions,
) {
    if total == 0 {
        println!("No study sessions yet. Add one with `studytrack add`.");
        return;
    }
    if view.is_empty() {
        println!("No sessions match the current filter.");
        return;
    }

    let use_color = opts.use_color;
    let mut table = create_styled_table();

    let mut header = vec![
        header_cell("#", use_color),
        header_cell("ID", use_color),
        header_cell("Subject", use_color),
        header_cell("Minutes", use_color),
        header_cell("Date", use_color),
        header_cell("Status", use_color),
    ];
    if !opts.compact {
        header.push(header_cell("Notes", use_color));
    }
    table.set_header(header);

    for (index, session) in view.iter().enumerate() {
        let mut row = vec![
            right_cell(&(index + 1).to_string(), None, false),
            right_cell(&session.id.to_string(), None, false),
            Cell::new(truncate(&session.subject, SUBJECT_WIDTH)),
            right_cell(
                &format_number(u64::from(session.duration), opts.number_format),
                None,
                false,
            ),
            Cell::new(&session.date),
            status_cell(session.completed, use_color),
        ];
        if !opts.compact {
            row.push(Cell::new(truncate(&session.notes, NOTES_WIDTH)));
        }
        table.add_row(row);
    }

    println!("\n  Study Sessions\n");
    println!("{table}");
    println!(
        "\n  Showing {} of {} sessions · {} studied · {}% completed\n",
        view.len(),
        stats.total_sessions,
        format_hours(stats.total_minutes, opts.number_format),
        stats.completion_rate
    );
}

pub(crate) fn print_stats_table(stats: &Statistics, opts: TableOptions) {
    let use_color = opts.use_color;
    let cyan = use_color.then_some(Color::Cyan);
    let green = use_color.then_some(Color::Green);
    let fmt = opts.number_format;

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Metric", use_color),
        header_cell("Value", use_color),
    ]);
    table.add_row(vec![
        Cell::new("Total sessions"),
        right_cell(&format_number(stats.total_sessions as u64, fmt), None, false),
    ]);
    table.add_row(vec![
        Cell::new("Total minutes"),
        right_cell(&format_number(stats.total_minutes, fmt), None, false),
    ]);
    if !opts.compact {
        table.add_row(vec![
            Cell::new("Time studied"),
            right_cell(&format_hours(stats.total_minutes, fmt), None, false),
        ]);
    }
    table.add_row(vec![
        Cell::new("Completed"),
        right_cell(&format_number(stats.completed_count as u64, fmt), green, false),
    ]);
    table.add_row(vec![
        Cell::new("Pending"),
        right_cell(&format_number(stats.pending_count as u64, fmt), None, false),
    ]);
    table.add_row(vec![
        styled_cell("Completion rate", cyan, true),
        right_cell(&format!("{}%", stats.completion_rate), cyan, true),
    ]);

    println!("\n  Study Statistics\n");
    println!("{table}");
}
