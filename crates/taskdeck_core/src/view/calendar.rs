//! Calendar projection of tasks by due date.
//!
//! Days are UTC calendar days. Tasks without a due date never appear.

use crate::model::task::Task;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One month of the calendar, always a valid `(year, month)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

/// One rendered calendar cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub tasks: Vec<Task>,
}

impl CalendarMonth {
    /// Returns `None` when `month` is outside `1..=12` or the year is out of
    /// chrono's range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// Month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn first_day(self) -> NaiveDate {
        // (year, month) is validated on construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Following month, or `None` past the last representable year.
    pub fn next(self) -> Option<Self> {
        if self.month == 12 {
            Self::new(self.year.checked_add(1)?, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// Preceding month, or `None` before the first representable year.
    pub fn previous(self) -> Option<Self> {
        if self.month == 1 {
            Self::new(self.year.checked_sub(1)?, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    /// Every date of the month in ascending order.
    pub fn days(self) -> Vec<NaiveDate> {
        let month = self.month;
        self.first_day()
            .iter_days()
            .take_while(|day| day.month() == month)
            .collect()
    }

    /// Number of blank cells before day 1 in a Sunday-first week grid.
    pub fn leading_blank_days(self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    /// Calendar cells for this month with the tasks due on each day.
    pub fn grid(self, tasks: &[Task]) -> Vec<CalendarDay> {
        self.days()
            .into_iter()
            .map(|date| CalendarDay {
                date,
                tasks: tasks_due_on(tasks, date).into_iter().cloned().collect(),
            })
            .collect()
    }
}

/// Tasks whose due date falls on `date`, in input order.
pub fn tasks_due_on(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| task.due_date.map(|due| due.date_naive()) == Some(date))
        .collect()
}
