//! Plain-text rendering of core views.

use chrono::NaiveDate;
use std::fmt::Write;
use taskdeck_core::{CalendarDay, CalendarMonth, DueStatus, NoteRecord, Task, TaskFilter, TaskView};

const WEEKDAY_HEADER: &str = "Sun Mon Tue Wed Thu Fri Sat";

/// `due_status` classifies each dated task against the caller's clock.
pub fn task_view(
    view: &TaskView,
    filter: &TaskFilter,
    due_status: impl Fn(&Task) -> DueStatus,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Total: {}  Pending: {}  Completed: {}",
        view.stats.total, view.stats.pending, view.stats.completed
    );

    if view.is_empty() {
        let hint = if filter.is_active() {
            "Try adjusting your search or filters"
        } else {
            "Create your first task to get started"
        };
        let _ = writeln!(out, "\nNo tasks found. {hint}");
        return out;
    }

    if !view.pending.is_empty() {
        let _ = writeln!(out, "\nPending Tasks ({})", view.pending.len());
        for task in &view.pending {
            out.push_str(&task_line(task, &due_status));
        }
    }
    if !view.completed.is_empty() {
        let _ = writeln!(out, "\nCompleted Tasks ({})", view.completed.len());
        for task in &view.completed {
            out.push_str(&task_line(task, &due_status));
        }
    }
    out
}

pub fn day(date: NaiveDate, tasks: &[Task], due_status: impl Fn(&Task) -> DueStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", date.format("%A, %B %-d, %Y"));
    if tasks.is_empty() {
        let _ = writeln!(out, "No tasks scheduled for this date");
    }
    for task in tasks {
        out.push_str(&task_line(task, &due_status));
    }
    out
}

pub fn month(month: CalendarMonth, grid: &[CalendarDay]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", month.first_day().format("%B %Y"));
    let _ = writeln!(out, "{WEEKDAY_HEADER}");

    let mut column = month.leading_blank_days();
    out.push_str(&"    ".repeat(column as usize));
    for cell in grid {
        let marker = if cell.tasks.is_empty() {
            "  ".to_string()
        } else {
            format!("{:<2}", cell.tasks.len().min(9))
        };
        let _ = write!(out, "{:>2}{}", chrono::Datelike::day(&cell.date), marker);
        column += 1;
        if column % 7 == 0 {
            out.push('\n');
        }
    }
    if column % 7 != 0 {
        out.push('\n');
    }
    out
}

pub fn notes(records: &[NoteRecord]) -> String {
    if records.is_empty() {
        return "No notes yet. Create your first note\n".to_string();
    }
    let mut out = String::new();
    for record in records {
        let _ = writeln!(
            out,
            "{}  {}  (updated {})",
            record.note.id,
            record.note.title,
            record.note.updated_at.format("%b %-d, %Y %H:%M")
        );
        if let Some(preview) = &record.preview_text {
            let _ = writeln!(out, "    {preview}");
        }
    }
    out
}

fn task_line(task: &Task, due_status: &impl Fn(&Task) -> DueStatus) -> String {
    let check = if task.completed { "[x]" } else { "[ ]" };
    let mut line = format!(
        "{check} {}  ({}, {})",
        task.title, task.category, task.priority
    );
    if let Some(due) = task.due_date {
        let status = due_status(task);
        let _ = match status.label() {
            Some(label) => write!(line, "  {label}: {}", due.format("%b %-d, %Y")),
            None => write!(line, "  {}", due.format("%b %-d, %Y")),
        };
        if status == DueStatus::Overdue {
            line.push_str(" !");
        }
    }
    let _ = writeln!(line, "  {}", task.id);
    line
}
