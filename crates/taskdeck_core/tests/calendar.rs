use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use taskdeck_core::{tasks_due_on, CalendarMonth, Task, TaskDraft};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn task_due(title: &str, year: i32, month: u32, day: u32, hour: u32) -> Task {
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let mut task = Task::create(TaskDraft::new(title), now).unwrap();
    task.due_date = Some(Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap());
    task
}

#[test]
fn month_navigation_rolls_over_years() {
    let december = CalendarMonth::new(2025, 12).unwrap();
    assert_eq!(december.next(), CalendarMonth::new(2026, 1));
    assert_eq!(december.next().and_then(CalendarMonth::previous), Some(december));

    let january = CalendarMonth::new(2025, 1).unwrap();
    assert_eq!(january.previous(), CalendarMonth::new(2024, 12));
}

#[test]
fn navigation_stops_at_supported_date_range() {
    let last = CalendarMonth::containing(NaiveDate::MAX);
    assert_eq!(last.next(), None);
    assert_eq!(last.first_day().month(), NaiveDate::MAX.month());

    let first = CalendarMonth::containing(NaiveDate::MIN);
    assert_eq!(first.previous(), None);
    assert_eq!(first.first_day(), NaiveDate::MIN);
}

#[test]
fn invalid_month_is_rejected() {
    assert!(CalendarMonth::new(2025, 0).is_none());
    assert!(CalendarMonth::new(2025, 13).is_none());
}

#[test]
fn days_cover_whole_month_including_leap_day() {
    let february = CalendarMonth::new(2024, 2).unwrap();
    let days = february.days();
    assert_eq!(days.len(), 29);
    assert_eq!(days.first(), Some(&date(2024, 2, 1)));
    assert_eq!(days.last(), Some(&date(2024, 2, 29)));

    assert_eq!(CalendarMonth::new(2025, 2).unwrap().days().len(), 28);
}

#[test]
fn leading_blank_days_follow_sunday_first_grid() {
    // 2025-05-01 is a Thursday.
    assert_eq!(CalendarMonth::new(2025, 5).unwrap().leading_blank_days(), 4);
    // 2025-06-01 is a Sunday.
    assert_eq!(CalendarMonth::new(2025, 6).unwrap().leading_blank_days(), 0);
}

#[test]
fn tasks_due_on_matches_whole_day_and_keeps_order() {
    let tasks = vec![
        task_due("late", 2025, 5, 22, 23),
        task_due("other day", 2025, 5, 23, 0),
        task_due("early", 2025, 5, 22, 0),
    ];
    let mut undated = Task::create(TaskDraft::new("undated"), Utc::now()).unwrap();
    undated.due_date = None;
    let mut all = tasks.clone();
    all.push(undated);

    let due: Vec<&str> = tasks_due_on(&all, date(2025, 5, 22))
        .into_iter()
        .map(|task| task.title.as_str())
        .collect();
    assert_eq!(due, vec!["late", "early"]);
}

#[test]
fn grid_attaches_tasks_to_their_days() {
    let tasks = vec![
        task_due("rent", 2025, 5, 1, 9),
        task_due("dentist", 2025, 5, 22, 14),
        task_due("june", 2025, 6, 1, 9),
    ];
    let grid = CalendarMonth::containing(date(2025, 5, 10)).grid(&tasks);

    assert_eq!(grid.len(), 31);
    assert_eq!(grid[0].tasks.len(), 1);
    assert_eq!(grid[0].tasks[0].title, "rent");
    assert_eq!(grid[21].date, date(2025, 5, 22));
    assert_eq!(grid[21].tasks[0].title, "dentist");
    let total: usize = grid.iter().map(|day| day.tasks.len()).sum();
    assert_eq!(total, 2);
}
