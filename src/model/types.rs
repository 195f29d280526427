use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key of the "To Do" list.
pub const TODO_LIST_ID: &str = "todo";
/// Key of the "Ongoing" list (named "In Progress" before schema v2).
pub const IN_PROGRESS_LIST_ID: &str = "in-progress";
/// Key of the "Blocked" list (added in schema v3).
pub const BLOCKED_LIST_ID: &str = "blocked";
/// Key of the "Done" list.
pub const DONE_LIST_ID: &str = "done";

/// A ticket stored in the `tickets` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Auto-assigned on insert, never changes.
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Key of the owning [`TicketList`]. Not checked against `ticket_lists`.
    pub list_id: String,
    /// Position within the owning list.
    pub order: i64,
    pub created_at: DateTime<Utc>,
}

/// A ticket that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub list_id: String,
    pub order: i64,
    /// Defaults to the insert time when `None`.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewTicket {
    /// Create a ticket for `list_id` at position `order`.
    #[must_use]
    pub fn new(title: impl Into<String>, list_id: impl Into<String>, order: i64) -> Self {
        Self {
            title: title.into(),
            description: None,
            list_id: list_id.into(),
            order,
            created_at: None,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A partial update to a [`Ticket`].
///
/// Only fields set to `Some` are written. `description: Some(None)` clears
/// the description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl TicketChanges {
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    #[must_use]
    pub fn list_id(mut self, list_id: impl Into<String>) -> Self {
        self.list_id = Some(list_id.into());
        self
    }

    #[must_use]
    pub fn order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    /// True when no field would be written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.list_id.is_none()
            && self.order.is_none()
    }
}

/// A board column, stored in the `ticket_lists` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketList {
    /// Caller-assigned stable key such as `"todo"`.
    pub id: String,
    pub name: String,
    /// Display position among lists.
    pub order: i64,
}

impl TicketList {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order,
        }
    }
}

/// A list together with its tickets, as shown on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn {
    #[serde(flatten)]
    pub list: TicketList,
    pub tickets: Vec<Ticket>,
}

/// The four lists a freshly seeded board starts with, in display order.
#[must_use]
pub fn default_lists() -> Vec<TicketList> {
    vec![
        TicketList::new(TODO_LIST_ID, "To Do", 0),
        TicketList::new(IN_PROGRESS_LIST_ID, "Ongoing", 1),
        TicketList::new(BLOCKED_LIST_ID, "Blocked", 2),
        TicketList::new(DONE_LIST_ID, "Done", 3),
    ]
}
