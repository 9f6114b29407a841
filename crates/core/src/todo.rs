//! Dashboard todo items.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Date, DbId, Timestamp};
use crate::validation::{merge, merge_nullable, nullable, require_patch_text, require_text, Nullable};

crate::text_enum! {
    pub enum TodoPriority("priority") {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

/// A todo item. `createdBy` holds a user id but is not a foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: DbId,
    pub text: String,
    pub deadline: Option<Date>,
    pub completed: bool,
    pub priority: TodoPriority,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub text: String,
    #[serde(default)]
    pub deadline: Option<Date>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub priority: Option<TodoPriority>,
    pub created_by: DbId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    pub text: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub deadline: Nullable<Date>,
    pub completed: Option<bool>,
    pub priority: Option<TodoPriority>,
}

impl CreateTodo {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("text", &self.text)
    }

    pub fn into_todo(self, id: DbId, now: Timestamp) -> TodoItem {
        let completed = self.completed.unwrap_or(false);
        TodoItem {
            id,
            text: self.text,
            deadline: self.deadline,
            completed,
            priority: self.priority.unwrap_or(TodoPriority::Medium),
            created_by: self.created_by,
            created_at: now,
            completed_at: completed.then_some(now),
        }
    }
}

impl UpdateTodo {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_patch_text("text", self.text.as_deref())
    }
}

impl TodoItem {
    pub fn apply(&mut self, patch: UpdateTodo, now: Timestamp) {
        merge(&mut self.text, patch.text);
        merge_nullable(&mut self.deadline, patch.deadline);
        merge(&mut self.priority, patch.priority);
        if let Some(completed) = patch.completed {
            self.set_completed(completed, now);
        }
    }

    /// Flip completion, stamping or clearing `completedAt`.
    pub fn toggle(&mut self, now: Timestamp) {
        self.set_completed(!self.completed, now);
    }

    fn set_completed(&mut self, completed: bool, now: Timestamp) {
        if completed == self.completed {
            return;
        }
        self.completed = completed;
        self.completed_at = completed.then_some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn todo() -> TodoItem {
        CreateTodo {
            text: "Renew lab license".into(),
            deadline: None,
            completed: None,
            priority: None,
            created_by: 1,
        }
        .into_todo(1, Utc::now())
    }

    #[test]
    fn defaults_to_open_medium_priority() {
        let item = todo();
        assert!(!item.completed);
        assert_eq!(item.priority, TodoPriority::Medium);
        assert_eq!(item.completed_at, None);
    }

    #[test]
    fn toggle_sets_and_clears_completed_at() {
        let mut item = todo();
        let now = Utc::now();
        item.toggle(now);
        assert!(item.completed);
        assert_eq!(item.completed_at, Some(now));
        item.toggle(now);
        assert!(!item.completed);
        assert_eq!(item.completed_at, None);
    }

    #[test]
    fn patch_with_same_completion_keeps_stamp() {
        let mut item = todo();
        let first = Utc::now();
        item.toggle(first);
        item.apply(
            UpdateTodo {
                completed: Some(true),
                priority: Some(TodoPriority::High),
                ..Default::default()
            },
            first + chrono::Duration::minutes(5),
        );
        assert_eq!(item.completed_at, Some(first));
        assert_eq!(item.priority, TodoPriority::High);
    }

    #[test]
    fn null_deadline_clears_but_missing_keeps() {
        let mut item = todo();
        item.deadline = Date::from_ymd_opt(2024, 5, 1);

        let keep: UpdateTodo = serde_json::from_value(serde_json::json!({ "text": "Renew" })).unwrap();
        item.apply(keep, Utc::now());
        assert!(item.deadline.is_some());

        let clear: UpdateTodo = serde_json::from_value(serde_json::json!({ "deadline": null })).unwrap();
        item.apply(clear, Utc::now());
        assert_eq!(item.deadline, None);
        assert_eq!(item.text, "Renew");
    }

    #[test]
    fn absent_patch_fields_are_not_serialized() {
        let patch = UpdateTodo {
            priority: Some(TodoPriority::Low),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert!(json.get("deadline").is_none());
    }
}
