use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Workflow status of a project item, orthogonal to the lifecycle flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Backlog,
    InProgress,
    Stuck,
    Done,
}

impl ItemStatus {
    /// The character shown inside the status box `[ ]`
    pub fn status_char(self) -> char {
        match self {
            ItemStatus::Backlog => ' ',
            ItemStatus::InProgress => '>',
            ItemStatus::Stuck => '-',
            ItemStatus::Done => 'x',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Backlog => "backlog",
            ItemStatus::InProgress => "in_progress",
            ItemStatus::Stuck => "stuck",
            ItemStatus::Done => "done",
        }
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backlog" => Ok(ItemStatus::Backlog),
            "in_progress" | "in-progress" => Ok(ItemStatus::InProgress),
            "stuck" => Ok(ItemStatus::Stuck),
            "done" => Ok(ItemStatus::Done),
            other => Err(format!(
                "unknown status '{}' (expected backlog, in_progress, stuck, done)",
                other
            )),
        }
    }
}

/// Priority level of a project item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl ItemPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemPriority::Low => "low",
            ItemPriority::Medium => "medium",
            ItemPriority::High => "high",
            ItemPriority::Urgent => "urgent",
        }
    }
}

impl FromStr for ItemPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(ItemPriority::Low),
            "medium" => Ok(ItemPriority::Medium),
            "high" => Ok(ItemPriority::High),
            "urgent" => Ok(ItemPriority::Urgent),
            other => Err(format!(
                "unknown priority '{}' (expected low, medium, high, urgent)",
                other
            )),
        }
    }
}

/// The free-text fields a caller may edit one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Title,
    Notes,
    FileUrl,
    MediaUrl,
}

impl ItemField {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemField::Title => "title",
            ItemField::Notes => "notes",
            ItemField::FileUrl => "file_url",
            ItemField::MediaUrl => "media_url",
        }
    }
}

/// A single project item.
///
/// The three lifecycle flags are independent booleans layered on top of
/// `status`; any combination is valid (an item can be archived and completed
/// at once). `date` is a `YYYY-MM-DD` string treated as opaque and sortable;
/// shape enforcement happens at the input boundary, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectItem {
    /// Unique, immutable, never reused
    pub id: String,
    pub title: String,
    pub notes: String,
    pub status: ItemStatus,
    pub priority: ItemPriority,
    /// Due date, `YYYY-MM-DD`
    pub date: String,
    /// Hidden from the active view, still mutable and restorable
    pub archived: bool,
    /// Finished but visible in the completed view
    pub completed: bool,
    /// Visual emphasis only
    pub approved: bool,
    /// Single-link attachments, empty string = absent
    pub file_url: String,
    pub media_url: String,
}

/// Caller-supplied fields for a new item; the store assigns the id and the
/// lifecycle flags always start false.
#[derive(Debug, Clone, Default)]
pub struct NewItem {
    pub title: String,
    pub notes: String,
    pub status: ItemStatus,
    pub priority: ItemPriority,
    pub date: String,
    pub file_url: String,
    pub media_url: String,
}

impl ProjectItem {
    /// Build a stored item from caller-supplied fields and a fresh id.
    pub fn new(id: String, fields: NewItem) -> Self {
        ProjectItem {
            id,
            title: fields.title,
            notes: fields.notes,
            status: fields.status,
            priority: fields.priority,
            date: fields.date,
            archived: false,
            completed: false,
            approved: false,
            file_url: fields.file_url,
            media_url: fields.media_url,
        }
    }
}
