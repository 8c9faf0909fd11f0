use serde::Serialize;

use crate::model::item::{ItemPriority, ItemStatus, ProjectItem};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ItemJson {
    pub id: String,
    pub title: String,
    pub status: ItemStatus,
    pub priority: ItemPriority,
    pub date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub file_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub media_url: String,
    pub archived: bool,
    pub completed: bool,
    pub approved: bool,
}

#[derive(Serialize)]
pub struct ItemListJson {
    pub view: &'static str,
    pub count: usize,
    pub items: Vec<ItemJson>,
}

#[derive(Serialize)]
pub struct BulkJson {
    pub requested: usize,
    pub affected: usize,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub total: usize,
    pub active: usize,
    pub archived: usize,
    pub completed: usize,
    pub approved: usize,
    pub by_status: StatusTallyJson,
}

#[derive(Serialize)]
pub struct StatusTallyJson {
    pub backlog: usize,
    pub in_progress: usize,
    pub stuck: usize,
    pub done: usize,
}

pub fn item_to_json(item: &ProjectItem) -> ItemJson {
    ItemJson {
        id: item.id.clone(),
        title: item.title.clone(),
        status: item.status,
        priority: item.priority,
        date: item.date.clone(),
        notes: item.notes.clone(),
        file_url: item.file_url.clone(),
        media_url: item.media_url.clone(),
        archived: item.archived,
        completed: item.completed,
        approved: item.approved,
    }
}

pub fn item_list_to_json(view: &'static str, items: &[&ProjectItem]) -> ItemListJson {
    ItemListJson {
        view,
        count: items.len(),
        items: items.iter().map(|i| item_to_json(i)).collect(),
    }
}
