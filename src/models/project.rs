use serde::{Deserialize, Serialize};

/// Fixed rotating palette; a new project takes `PALETTE[count % len]`.
pub const PALETTE: [&str; 6] = ["red", "blue", "green", "yellow", "purple", "pink"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub total_hours: f64,
}

impl Project {
    pub fn new(id: String, name: &str, existing: usize) -> Self {
        Self {
            id,
            name: name.to_string(),
            color: PALETTE[existing % PALETTE.len()].to_string(),
            total_hours: 0.0,
        }
    }
}
