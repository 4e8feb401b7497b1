use crate::instance::BlockInstance;
use serde::{Deserialize, Serialize};

/// The persisted unit: everything on one canvas.
///
/// Serialized wholesale on save and replaced wholesale on load — a loaded
/// layout is never merged into an existing one. The document shape is
/// consumed and produced verbatim by the external store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub instances: Vec<BlockInstance>,

    #[serde(rename = "canvasId")]
    pub canvas_id: String,

    /// Unix timestamp in milliseconds, stamped by the caller at save time.
    #[serde(rename = "savedAt")]
    pub saved_at: i64,
}

impl Layout {
    /// A fresh, empty layout for a canvas.
    pub fn empty(canvas_id: &str) -> Self {
        Self {
            instances: Vec::new(),
            canvas_id: canvas_id.to_string(),
            saved_at: 0,
        }
    }
}
