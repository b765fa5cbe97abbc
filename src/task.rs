//! Dated tasks, as they are stored on the server

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use chrono::{DateTime, NaiveDate, Utc};

/// The wire format of a calendar day
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An opaque task identifier, assigned by the server
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId {
    content: String,
}

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for TaskId {
    fn from(content: String) -> Self {
        Self { content }
    }
}

impl From<&str> for TaskId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}

impl From<u64> for TaskId {
    fn from(number: u64) -> Self {
        Self { content: number.to_string() }
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl Serialize for TaskId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Some servers hand out numeric ids, others (e.g. MongoDB-backed ones) use strings
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Ok(TaskId::from(s)),
            RawId::Number(n) => Ok(TaskId::from(n)),
        }
    }
}


/// A dated task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned, never changes
    #[serde(alias = "_id")]
    id: TaskId,

    /// The display text of the task
    text: String,

    /// The day this task is due. Any time-of-day component sent by the server is dropped
    #[serde(serialize_with = "serialize_day", deserialize_with = "deserialize_day")]
    date: NaiveDate,

    /// Ordering hint among tasks of the same day (lower sorts first). Not guaranteed unique
    #[serde(default = "default_position")]
    position: i64,
}

impl Task {
    pub fn new(id: TaskId, text: String, date: NaiveDate, position: i64) -> Self {
        Self { id, text, date, position }
    }

    pub fn id(&self) -> &TaskId     { &self.id       }
    pub fn text(&self) -> &str      { &self.text     }
    pub fn date(&self) -> NaiveDate { self.date      }
    pub fn position(&self) -> i64   { self.position  }

    /// Whether this task is due on the given day
    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        self.date == day
    }
}


/// The content of a task that has not been persisted yet (hence has no id)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewTask {
    pub text: String,
    #[serde(serialize_with = "serialize_day")]
    pub date: NaiveDate,
    pub position: i64,
}

impl NewTask {
    pub fn new(text: String, date: NaiveDate, position: i64) -> Self {
        Self { text, date, position }
    }

    /// Turn this into a full task, once the server has assigned it an id
    pub fn into_task(self, id: TaskId) -> Task {
        Task::new(id, self.text, self.date, self.position)
    }
}


fn default_position() -> i64 {
    crate::config::DEFAULT_POSITION
}

/// Parse a calendar day, as sent by a server.
///
/// Both plain days (`2024-11-05`) and full timestamps (`2024-11-05T00:00:00.000Z`) are accepted.
/// Timestamps are normalised to their UTC calendar day.
pub fn parse_day(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    let s = s.trim();
    match NaiveDate::parse_from_str(s, DATE_FORMAT) {
        Ok(day) => Ok(day),
        Err(_) => {
            let timestamp = DateTime::parse_from_rfc3339(s)?;
            Ok(timestamp.with_timezone(&Utc).date_naive())
        },
    }
}

fn serialize_day<S>(day: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&day.format(DATE_FORMAT).to_string())
}

fn deserialize_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_day(&raw).map_err(|err| serde::de::Error::custom(format!("invalid date {:?}: {}", raw, err)))
}
