//! Some utility functions

use crate::calendar::CalendarView;
use crate::calendar::day_cell::DayCell;
use crate::controller::{TaskListController, TaskUiState};
use crate::task::Task;
use crate::traits::TaskStore;

/// A debug utility that pretty-prints the task list of a controller
pub fn print_task_list<S: TaskStore>(controller: &TaskListController<S>) {
    if let Some(message) = controller.error_message() {
        println!("  ! {}", message);
    }
    if controller.tasks().is_empty() {
        println!("  No tasks found");
    }
    for task in controller.tasks() {
        print_task(task, controller.task_state(task.id()));
    }
}

pub fn print_task(task: &Task, state: TaskUiState) {
    let marker = match state {
        TaskUiState::Idle => " ",
        TaskUiState::Deleting => "x",
    };
    println!("  {} {}  {}\t(#{}, {})", marker, task.date(), task.text(), task.position(), task.id());
}

/// A debug utility that pretty-prints a day cell
pub fn print_day_cell(cell: &DayCell) {
    let today = if cell.is_today() { " (today)" } else { "" };
    println!("{} {}{}", cell.day_number(), cell.day_name(), today);
    for entry in cell.entries() {
        let edit = if entry.is_editing() { "~" } else { " " };
        println!("   {} {}\t{}", edit, entry.text(), entry.id());
    }
}

/// A debug utility that pretty-prints every cell of a calendar
pub fn print_calendar(view: &CalendarView) {
    for cell in view.cells() {
        print_day_cell(cell);
    }
}
