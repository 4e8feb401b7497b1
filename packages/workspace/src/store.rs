//! Layout persistence: the external document store contract and two
//! implementations, in-memory (tests, temp canvases) and file-backed.

use pagecraft_blocks::Layout;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("layout '{0}' not found")]
    NotFound(String),

    #[error("persistence request timed out after {0:?}")]
    Timeout(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The external store collaborator: load/save one named layout document,
/// wholesale. Documents are keyed by canvas id.
#[allow(async_fn_in_trait)]
pub trait LayoutStore {
    async fn load(&self, canvas_id: &str) -> Result<Layout, PersistenceError>;
    async fn save(&self, layout: &Layout) -> Result<(), PersistenceError>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    layouts: Mutex<HashMap<String, Layout>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, canvas_id: &str) -> bool {
        self.layouts.lock().unwrap().contains_key(canvas_id)
    }

    pub fn get(&self, canvas_id: &str) -> Option<Layout> {
        self.layouts.lock().unwrap().get(canvas_id).cloned()
    }
}

impl LayoutStore for MemoryStore {
    async fn load(&self, canvas_id: &str) -> Result<Layout, PersistenceError> {
        self.layouts
            .lock()
            .unwrap()
            .get(canvas_id)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound(canvas_id.to_string()))
    }

    async fn save(&self, layout: &Layout) -> Result<(), PersistenceError> {
        self.layouts
            .lock()
            .unwrap()
            .insert(layout.canvas_id.clone(), layout.clone());
        Ok(())
    }
}

/// File-backed store: one JSON document per canvas under a root
/// directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, canvas_id: &str) -> PathBuf {
        self.root.join(format!("{canvas_id}.json"))
    }
}

impl LayoutStore for FileStore {
    async fn load(&self, canvas_id: &str) -> Result<Layout, PersistenceError> {
        let path = self.path_for(canvas_id);
        if !path.exists() {
            return Err(PersistenceError::NotFound(canvas_id.to_string()));
        }
        let source = std::fs::read_to_string(&path)?;
        let layout = serde_json::from_str(&source)?;
        debug!(canvas_id, path = %path.display(), "loaded layout document");
        Ok(layout)
    }

    async fn save(&self, layout: &Layout) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.path_for(&layout.canvas_id);
        let json = serde_json::to_string_pretty(layout)?;
        std::fs::write(&path, json)?;
        debug!(canvas_id = %layout.canvas_id, path = %path.display(), "saved layout document");
        Ok(())
    }
}
