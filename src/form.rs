//! The form used to add a new task

use chrono::NaiveDate;

use crate::task::{NewTask, DATE_FORMAT};

pub const TEXT_REQUIRED: &str = "Task description is required";
pub const DATE_REQUIRED: &str = "Due date is required";
pub const DATE_INVALID: &str = "Due date is not a valid date";
pub const DATE_IN_THE_PAST: &str = "Due date cannot be in the past";

/// Per-field validation messages of an [`AddTaskForm`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormErrors {
    pub text: Option<String>,
    pub date: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.date.is_none()
    }
}


/// The input of a user who is about to create a task.
///
/// Fields hold raw user input (the date is typed as `YYYY-MM-DD`, just like a HTML date input would provide it).
/// Validation only happens on submission, see [`AddTaskForm::validate`].
#[derive(Clone, Debug, PartialEq)]
pub struct AddTaskForm {
    pub text: String,
    pub date: String,
    /// Ordering hint given to the created task
    pub position: i64,

    /// The date this form goes back to when reset (the day of the cell hosting it, if any)
    preset_date: Option<NaiveDate>,
    errors: FormErrors,
}

impl Default for AddTaskForm {
    fn default() -> Self {
        Self {
            text: String::new(),
            date: String::new(),
            position: crate::config::DEFAULT_POSITION,
            preset_date: None,
            errors: FormErrors::default(),
        }
    }
}

impl AddTaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A form whose date is preset, e.g. the one embedded in a day cell
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date: date.format(DATE_FORMAT).to_string(),
            preset_date: Some(date),
            ..Self::default()
        }
    }

    pub fn set_text<S: ToString>(&mut self, text: S) {
        self.text = text.to_string();
    }

    pub fn set_date<S: ToString>(&mut self, date: S) {
        self.date = date.to_string();
    }

    /// The validation messages of the last submission attempt
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// The earliest date this form accepts, given the current day
    pub fn min_date(today: NaiveDate) -> String {
        today.format(DATE_FORMAT).to_string()
    }

    /// Whether the submit button is enabled
    pub fn can_submit(&self, submitting: bool) -> bool {
        submitting == false
    }

    /// The label of the submit button
    pub fn submit_label(submitting: bool) -> &'static str {
        if submitting { "Adding..." } else { "Add Task" }
    }

    /// Check the current input.
    ///
    /// On success, this returns the task to create. On failure, the returned errors are also kept in this form, so that they can be displayed next to the offending fields.
    /// In both cases, the input itself is left untouched.
    pub fn validate(&mut self, today: NaiveDate) -> Result<NewTask, FormErrors> {
        let mut errors = FormErrors::default();

        let text = self.text.trim();
        if text.is_empty() {
            errors.text = Some(TEXT_REQUIRED.to_string());
        }

        let raw_date = self.date.trim();
        let date = if raw_date.is_empty() {
            errors.date = Some(DATE_REQUIRED.to_string());
            None
        } else {
            match NaiveDate::parse_from_str(raw_date, DATE_FORMAT) {
                Err(_) => {
                    errors.date = Some(DATE_INVALID.to_string());
                    None
                },
                Ok(date) if date < today => {
                    errors.date = Some(DATE_IN_THE_PAST.to_string());
                    None
                },
                Ok(date) => Some(date),
            }
        };

        self.errors = errors.clone();
        match date {
            Some(date) if errors.is_empty() => Ok(NewTask::new(text.to_string(), date, self.position)),
            _ => Err(errors),
        }
    }

    pub fn preset_date(&self) -> Option<NaiveDate> {
        self.preset_date
    }

    /// Empty every input and forget the validation messages.
    ///
    /// A form created with [`AddTaskForm::for_date`] goes back to its preset date. The position hint is not user input, and is kept
    pub fn reset(&mut self) {
        self.text.clear();
        self.date = match self.preset_date {
            Some(date) => date.format(DATE_FORMAT).to_string(),
            None => String::new(),
        };
        self.errors = FormErrors::default();
    }
}


#[cfg(test)]
mod test {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_valid_input() {
        let mut form = AddTaskForm::new();
        form.set_text("  Buy milk ");
        form.set_date("2026-10-20");

        let new_task = form.validate(today()).unwrap();
        assert_eq!(new_task.text, "Buy milk");
        assert_eq!(new_task.date, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
        assert_eq!(new_task.position, crate::config::DEFAULT_POSITION);
        assert!(form.errors().is_empty());
        // Input is only cleared once the task has actually been created
        assert_eq!(form.text, "  Buy milk ");
    }

    #[test]
    fn test_today_is_allowed() {
        let mut form = AddTaskForm::for_date(today());
        form.set_text("Today");
        assert!(form.validate(today()).is_ok());
        assert_eq!(AddTaskForm::min_date(today()), "2026-10-19");
    }

    #[test]
    fn test_missing_fields() {
        let mut form = AddTaskForm::new();
        form.set_text("   ");

        let errors = form.validate(today()).unwrap_err();
        assert_eq!(errors.text.as_deref(), Some(TEXT_REQUIRED));
        assert_eq!(errors.date.as_deref(), Some(DATE_REQUIRED));
        assert_eq!(form.errors(), &errors);
        assert_eq!(form.text, "   ");
    }

    #[test]
    fn test_bad_dates() {
        let mut form = AddTaskForm::new();
        form.set_text("Something");

        form.set_date("2026-10-18");
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(errors.date.as_deref(), Some(DATE_IN_THE_PAST));
        assert_eq!(errors.text, None);

        form.set_date("2026-02-30");
        assert_eq!(form.validate(today()).unwrap_err().date.as_deref(), Some(DATE_INVALID));

        form.set_date("next week");
        assert_eq!(form.validate(today()).unwrap_err().date.as_deref(), Some(DATE_INVALID));

        // Fixing the input clears the previous messages
        form.set_date("2027-01-01");
        assert!(form.validate(today()).is_ok());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_reset_and_labels() {
        let mut form = AddTaskForm::for_date(today());
        form.set_text("Something");
        form.set_date("2026-12-24");
        form.position = 4;
        form.reset();
        assert_eq!(form.text, "");
        assert_eq!(form.date, "2026-10-19");
        assert_eq!(form.position, 4);

        let mut form = AddTaskForm::new();
        form.set_text("Something");
        form.set_date("2026-12-24");
        assert!(form.validate(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()).is_err());
        form.reset();
        assert_eq!(form.text, "");
        assert_eq!(form.date, "");
        assert!(form.errors().is_empty());

        assert!(form.can_submit(false));
        assert!(form.can_submit(true) == false);
        assert_eq!(AddTaskForm::submit_label(true), "Adding...");
        assert_eq!(AddTaskForm::submit_label(false), "Add Task");
    }
}
