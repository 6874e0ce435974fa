use serde::Serialize;

use crate::model::item::{ItemId, Mode, ToDoItem};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ItemJson {
    pub id: u64,
    pub text: String,
    pub mode: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

#[derive(Serialize)]
pub struct ListJson {
    pub mode: String,
    pub items: Vec<ItemJson>,
}

#[derive(Serialize)]
pub struct ModeJson {
    pub mode: String,
}

#[derive(Serialize)]
pub struct ToggleJson {
    pub id: u64,
    pub completed: bool,
}

#[derive(Serialize)]
pub struct DeleteJson {
    pub id: u64,
    pub deleted: bool,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn item_to_json(id: ItemId, item: &ToDoItem) -> ItemJson {
    ItemJson {
        id: id.0,
        text: item.text.clone(),
        mode: item.mode.to_string(),
        completed: item.completed,
        created: id
            .created()
            .map(|t| t.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// `[x] 1700000000000 buy milk`
pub fn format_item_line(id: ItemId, item: &ToDoItem) -> String {
    format!("[{}] {} {}", item.checkbox_char(), id, item.text)
}

/// Items under a list header, or a placeholder line when empty
pub fn format_list_section<'a>(
    mode: Mode,
    items: impl IntoIterator<Item = (ItemId, &'a ToDoItem)>,
) -> Vec<String> {
    let mut lines = vec![mode.label().to_string()];
    let before = lines.len();
    for (id, item) in items {
        lines.push(format!("  {}", format_item_line(id, item)));
    }
    if lines.len() == before {
        lines.push("  (empty)".to_string());
    }
    lines
}
