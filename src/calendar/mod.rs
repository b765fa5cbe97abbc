//! Calendar projections of a task list: tasks grouped by day, and grids of day cells

pub mod day_cell;
pub use day_cell::DayCell;

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::task::Task;


/// Group tasks by the day they are due on. Within a day, tasks keep the order of `tasks`
pub fn group_by_day(tasks: &[Task]) -> BTreeMap<NaiveDate, Vec<&Task>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        groups.entry(task.date()).or_default().push(task);
    }
    groups
}

/// The seven days (Monday first) of the week that contains `day`
pub fn week_of(day: NaiveDate) -> Vec<NaiveDate> {
    let offset = day.weekday().num_days_from_monday() as i64;
    let monday = day.checked_sub_signed(Duration::days(offset)).unwrap_or(day);
    monday.iter_days().take(7).collect()
}


/// A grid of day cells, that are kept in sync with the same task list
#[derive(Clone, Debug)]
pub struct CalendarView {
    cells: Vec<DayCell>,
}

impl CalendarView {
    /// One cell per day, in the given order
    pub fn new<I: IntoIterator<Item = NaiveDate>>(days: I, today: NaiveDate) -> Self {
        Self {
            cells: days.into_iter()
                .map(|day| DayCell::new(day, today))
                .collect(),
        }
    }

    /// The week that contains `day`
    pub fn week(day: NaiveDate, today: NaiveDate) -> Self {
        Self::new(week_of(day), today)
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn cell(&self, day: NaiveDate) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.date() == day)
    }

    pub fn cell_mut(&mut self, day: NaiveDate) -> Option<&mut DayCell> {
        self.cells.iter_mut().find(|cell| cell.date() == day)
    }

    /// Give every cell the tasks due on its day. Call this whenever the task list changes
    pub fn sync(&mut self, tasks: &[Task]) {
        for cell in &mut self.cells {
            cell.sync(tasks);
        }
    }
}
