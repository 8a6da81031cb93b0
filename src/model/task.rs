use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Eisenhower quadrant assigned to a task. `None` means not yet triaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    #[default]
    None,
    ImportantUrgent,
    ImportantNotUrgent,
    UrgentNotImportant,
    NotImportantNotUrgent,
}

impl Priority {
    pub fn all() -> &'static [Priority] {
        &[
            Priority::None,
            Priority::ImportantUrgent,
            Priority::ImportantNotUrgent,
            Priority::UrgentNotImportant,
            Priority::NotImportantNotUrgent,
        ]
    }

    /// The four quadrants, without the unprioritized marker.
    pub fn quadrants() -> &'static [Priority] {
        &Self::all()[1..]
    }

    /// Stored form, shared with the web widget's storage format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::None => "",
            Priority::ImportantUrgent => "important-urgent",
            Priority::ImportantNotUrgent => "important-not-urgent",
            Priority::UrgentNotImportant => "urgent-not-important",
            Priority::NotImportantNotUrgent => "not-important-not-urgent",
        }
    }

    /// Exact match against the stored forms; padding is not tolerated.
    pub fn parse(s: &str) -> Option<Priority> {
        Self::all().iter().copied().find(|p| p.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::None => "No priority",
            Priority::ImportantUrgent => "Important & urgent",
            Priority::ImportantNotUrgent => "Important, not urgent",
            Priority::UrgentNotImportant => "Urgent, not important",
            Priority::NotImportantNotUrgent => "Neither",
        }
    }

    pub fn is_set(&self) -> bool {
        *self != Priority::None
    }
}

impl Serialize for Priority {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Priority::parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown priority '{}'", raw))
        })
    }
}

/// A single checklist item. Field names match the stored JSON records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Creation time in Unix milliseconds; unique within a collection.
    pub id: i64,
    pub text: String,
    /// `YYYY-MM-DDTHH:MM`, or empty when the task has no deadline.
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    pub created_at: String,
}

/// Accepted deadline layouts, most specific first.
const DEADLINE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

impl Task {
    pub fn new(
        id: i64,
        text: impl Into<String>,
        deadline: impl Into<String>,
        priority: Priority,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            deadline: deadline.into(),
            priority,
            completed: false,
            created_at: created.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn deadline_at(&self) -> Option<NaiveDateTime> {
        let s = self.deadline.trim();
        DEADLINE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    }

    /// Human-readable deadline for list rows.
    pub fn deadline_label(&self) -> String {
        if self.deadline.trim().is_empty() {
            return "No deadline".to_string();
        }
        match self.deadline_at() {
            Some(at) => at.format("%d.%m.%Y, %H:%M").to_string(),
            None => self.deadline.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).single().expect("valid time")
    }

    #[test]
    fn serializes_with_web_field_names() {
        let task = Task::new(1_700_000_000_000, "Write report", "", Priority::ImportantUrgent, created());
        let json = serde_json::to_value(&task).expect("serialize");
        assert_eq!(json["id"], 1_700_000_000_000_i64);
        assert_eq!(json["priority"], "important-urgent");
        assert_eq!(json["createdAt"], "2026-03-01T09:30:00.000Z");
        assert_eq!(json["completed"], false);
        assert_eq!(json["deadline"], "");
    }

    #[test]
    fn empty_priority_string_is_unprioritized() {
        let raw = r#"{"id":1,"text":"a","deadline":"","priority":"","completed":false,"createdAt":"x"}"#;
        let task: Task = serde_json::from_str(raw).expect("parse");
        assert_eq!(task.priority, Priority::None);
    }

    #[test]
    fn null_priority_is_unprioritized() {
        let raw = r#"{"id":1,"text":"a","priority":null,"createdAt":"x"}"#;
        let task: Task = serde_json::from_str(raw).expect("parse");
        assert_eq!(task.priority, Priority::None);
        assert!(!task.completed);
    }

    #[test]
    fn unknown_priority_is_rejected() {
        let raw = r#"{"id":1,"text":"a","priority":"someday","createdAt":"x"}"#;
        assert!(serde_json::from_str::<Task>(raw).is_err());
    }

    #[test]
    fn padded_priority_is_rejected() {
        assert_eq!(Priority::parse(" important-urgent "), None);
        assert_eq!(Priority::parse("important-urgent"), Some(Priority::ImportantUrgent));
        let raw = r#"{"id":1,"text":"a","priority":" important-urgent ","createdAt":"x"}"#;
        assert!(serde_json::from_str::<Task>(raw).is_err());
    }

    #[test]
    fn deadline_labels() {
        let mut task = Task::new(1, "a", "2026-03-05T14:00", Priority::None, created());
        assert_eq!(task.deadline_label(), "05.03.2026, 14:00");
        task.deadline = String::new();
        assert_eq!(task.deadline_label(), "No deadline");
        task.deadline = "next week".into();
        assert_eq!(task.deadline_label(), "next week");
    }

    #[test]
    fn quadrants_exclude_none() {
        assert_eq!(Priority::quadrants().len(), 4);
        assert!(Priority::quadrants().iter().all(Priority::is_set));
    }
}
