use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Which board column a task occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Todo,
    #[serde(rename = "in-progress")]
    InProgress,
    Done,
}

impl Status {
    /// Column order, left to right
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    /// The persisted/wire name for this status
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        }
    }

    /// Column header shown in the UI
    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Status::Todo),
            "in-progress" | "doing" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            other => Err(format!(
                "unknown column '{}' (expected todo, in-progress, or done)",
                other
            )),
        }
    }
}

/// Task priority; P2 is the default
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Priority {
    P1,
    #[default]
    P2,
    P3,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::P3 => "P3",
        }
    }

    /// Human label: P1=High, P2=Medium, P3=Low
    pub fn label(self) -> &'static str {
        match self {
            Priority::P1 => "High",
            Priority::P2 => "Medium",
            Priority::P3 => "Low",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "P1" | "HIGH" => Ok(Priority::P1),
            "P2" | "MEDIUM" => Ok(Priority::P2),
            "P3" | "LOW" => Ok(Priority::P3),
            other => Err(format!(
                "unknown priority '{}' (expected P1, P2, or P3)",
                other
            )),
        }
    }
}

/// A card on the board.
///
/// Field names match the persisted JSON layout (`tm_tasks_v1`) exactly:
/// `id`, `title`, `desc`, `due`, `prio`, `status`, `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique id, immutable after creation
    pub id: String,
    pub title: String,
    /// May be empty; empty means "no description"
    #[serde(default)]
    pub desc: String,
    /// Due date; serialized as `YYYY-MM-DD`, empty string means none
    #[serde(default, with = "due_date")]
    pub due: Option<NaiveDate>,
    #[serde(default)]
    pub prio: Priority,
    #[serde(default)]
    pub status: Status,
    /// Epoch millis at creation; never mutated afterwards
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// The four user-editable fields, as entered in a create or edit form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    pub title: String,
    pub desc: String,
    pub due: Option<NaiveDate>,
    pub prio: Priority,
}

impl TaskDraft {
    /// Snapshot the mutable fields of an existing task
    pub fn from_task(task: &Task) -> Self {
        TaskDraft {
            title: task.title.clone(),
            desc: task.desc.clone(),
            due: task.due,
            prio: task.prio,
        }
    }

    /// Trim title and description, as the form layer would
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.desc = self.desc.trim().to_string();
        self
    }
}

/// Fresh collision-resistant task id (128-bit random, hex)
pub fn fresh_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Current wall-clock time as epoch millis
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Serde helpers for the `due` field: `None` round-trips as the empty
/// string, matching the stored layout where an unset due date is `""`.
mod due_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(due: &Option<NaiveDate>, ser: S) -> Result<S::Ok, S::Error> {
        match due {
            Some(d) => ser.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => ser.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(de)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
