use serde::{Deserialize, Serialize};

/// Name shown for tasks whose folder reference is absent or dangling
pub const UNCATEGORIZED_NAME: &str = "UNKNOWN";
/// Neutral color used for uncategorized tasks
pub const UNCATEGORIZED_COLOR: &str = "#D3D3D3";

/// A named, colored category grouping tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique and stable once assigned
    pub id: String,
    pub name: String,
    /// Hex color string, e.g. `#FFB6C1`
    pub color: String,
}

impl Folder {
    /// Translucent variant of the folder color (hex color + alpha byte),
    /// used for capsule backgrounds
    pub fn translucent_color(&self) -> String {
        format!("{}20", self.color)
    }
}

/// Resolve a weak folder reference to a display color. A missing or
/// deleted folder is "uncategorized", never an error.
pub fn folder_color<'a>(folders: &'a [Folder], folder_id: Option<&str>) -> &'a str {
    folder_id
        .and_then(|id| folders.iter().find(|f| f.id == id))
        .map(|f| f.color.as_str())
        .unwrap_or(UNCATEGORIZED_COLOR)
}

/// Resolve a weak folder reference to a display name.
pub fn folder_name<'a>(folders: &'a [Folder], folder_id: Option<&str>) -> &'a str {
    folder_id
        .and_then(|id| folders.iter().find(|f| f.id == id))
        .map(|f| f.name.as_str())
        .unwrap_or(UNCATEGORIZED_NAME)
}
