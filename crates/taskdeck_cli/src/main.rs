//! `taskdeck` command-line front end.
//!
//! # Responsibility
//! - Resolve db/log settings from flags and environment.
//! - Translate subcommands into core service calls and print the results.

mod cli;
mod render;

use anyhow::{anyhow, Context};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Parser;
use cli::{CalendarArgs, Cli, Commands, EditArgs, NoteCommands, UserArgs};
use log::info;
use taskdeck_core::db::open_db;
use taskdeck_core::{
    default_log_level, init_logging, CalendarMonth, NoteService, SqliteNoteRepository,
    SqliteTaskRepository, StaticSession, SystemClock, TaskDraft, TaskFilter, TaskPatch,
    TaskService,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        init_logging(&level, log_dir).context("failed to initialize logging")?;
    }

    if let Commands::Version = cli.command {
        println!("taskdeck_core ping={}", taskdeck_core::ping());
        println!("taskdeck_core version={}", taskdeck_core::core_version());
        return Ok(());
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;
    info!("event=cli_command module=cli status=start");

    let tasks = TaskService::new(SqliteTaskRepository::new(&conn), SystemClock);

    match cli.command {
        Commands::Add(args) => {
            let task = tasks.create_task(TaskDraft {
                title: args.title,
                description: args.description,
                category: args.category,
                priority: args.priority,
                due_date: args.due.map(start_of_day),
            })?;
            println!("Created task {}", task.id);
        }
        Commands::List(args) => {
            let filter = TaskFilter {
                query: args.search,
                category: args.category,
                priority: args.priority,
            };
            let view = tasks.task_view(&filter, args.sort)?;
            print!("{}", render::task_view(&view, &filter, |task| tasks.due_status(task)));
        }
        Commands::Done(args) => {
            let task = tasks.toggle_completed(args.id)?;
            let state = if task.completed { "completed" } else { "pending" };
            println!("Task {} is now {state}", task.id);
        }
        Commands::Edit(args) => {
            let id = args.id;
            let task = tasks.update_task(id, edit_patch(args))?;
            println!("Updated task {}", task.id);
        }
        Commands::Rm(args) => {
            tasks.delete_task(args.id)?;
            println!("Deleted task {}", args.id);
        }
        Commands::Calendar(args) => run_calendar(&tasks, args)?,
        Commands::Note(command) => run_note(&conn, command)?,
        Commands::Version => {}
    }

    Ok(())
}

fn run_calendar(
    tasks: &TaskService<SqliteTaskRepository<'_>, SystemClock>,
    args: CalendarArgs,
) -> anyhow::Result<()> {
    if let Some(day) = args.day {
        let due = tasks.tasks_due_on(day)?;
        print!("{}", render::day(day, &due, |task| tasks.due_status(task)));
        return Ok(());
    }

    let month = match args.month {
        Some(value) => parse_month(&value)?,
        None => tasks.current_month(),
    };
    let grid = tasks.calendar_month(month)?;
    print!("{}", render::month(month, &grid));
    Ok(())
}

fn run_note(conn: &rusqlite::Connection, command: NoteCommands) -> anyhow::Result<()> {
    let user = match &command {
        NoteCommands::Add(args) => &args.user,
        NoteCommands::List(args) => args,
        NoteCommands::Edit(args) => &args.user,
        NoteCommands::Rm(args) => &args.user,
    };
    let notes = NoteService::new(
        SqliteNoteRepository::new(conn),
        session_for(user),
        SystemClock,
    );

    match command {
        NoteCommands::Add(args) => {
            let record = notes.create_note(&args.title, &args.content)?;
            println!("Created note {}", record.note.id);
        }
        NoteCommands::List(_) => {
            print!("{}", render::notes(&notes.list_notes()?));
        }
        NoteCommands::Edit(args) => {
            let record = notes.update_note(args.id, &args.title, &args.content)?;
            println!("Updated note {}", record.note.id);
        }
        NoteCommands::Rm(args) => {
            notes.delete_note(args.id)?;
            println!("Deleted note {}", args.id);
        }
    }
    Ok(())
}

fn session_for(user: &UserArgs) -> StaticSession {
    match user.user.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => StaticSession::signed_in(id),
        _ => StaticSession::anonymous(),
    }
}

fn edit_patch(args: EditArgs) -> TaskPatch {
    let due_date = if args.clear_due {
        Some(None)
    } else {
        args.due.map(|day| Some(start_of_day(day)))
    };
    TaskPatch {
        title: args.title,
        description: args.description,
        category: args.category,
        priority: args.priority,
        due_date,
        completed: None,
    }
}

/// Due dates have day granularity; store them at UTC midnight.
fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::default()))
}

fn parse_month(value: &str) -> anyhow::Result<CalendarMonth> {
    let (year, month) = value
        .split_once('-')
        .ok_or_else(|| anyhow!("month must look like YYYY-MM, got `{value}`"))?;
    let year: i32 = year
        .parse()
        .with_context(|| format!("invalid year in `{value}`"))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("invalid month in `{value}`"))?;
    CalendarMonth::new(year, month).ok_or_else(|| anyhow!("month out of range: `{value}`"))
}

#[cfg(test)]
mod tests {
    use super::{parse_month, start_of_day};
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn parse_month_accepts_year_month() {
        let month = parse_month("2025-05").unwrap();
        assert_eq!((month.year(), month.month()), (2025, 5));
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("May").is_err());
    }

    #[test]
    fn due_dates_land_on_utc_midnight() {
        let day = NaiveDate::from_ymd_opt(2025, 5, 22).unwrap();
        assert_eq!(
            start_of_day(day),
            Utc.with_ymd_and_hms(2025, 5, 22, 0, 0, 0).unwrap()
        );
    }
}
