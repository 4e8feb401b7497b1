//! # Instance Store
//!
//! The ordered collection of block instances placed on one canvas.
//!
//! The store exclusively owns the instance list: views render projections
//! of it, and every mutation flows through here. Loading a layout
//! replaces the contents wholesale — documents are never merged.

use pagecraft_blocks::{BlockInstance, InstanceIdGenerator, Layout};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct InstanceStore {
    canvas_id: String,
    instances: Vec<BlockInstance>,
    ids: InstanceIdGenerator,

    /// Increments on every mutation.
    version: u64,

    /// Set on mutation, cleared when a save settles.
    dirty: bool,
}

impl InstanceStore {
    /// Create an empty store for a canvas.
    pub fn new(canvas_id: &str) -> Self {
        Self {
            canvas_id: canvas_id.to_string(),
            instances: Vec::new(),
            ids: InstanceIdGenerator::new(canvas_id),
            version: 0,
            dirty: false,
        }
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    pub fn instances(&self) -> &[BlockInstance] {
        &self.instances
    }

    pub fn get(&self, id: &str) -> Option<&BlockInstance> {
        self.instances.iter().find(|i| i.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut BlockInstance> {
        self.instances.iter_mut().find(|i| i.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by the persistence layer after a successful save.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub(crate) fn next_id(&mut self) -> String {
        self.ids.new_id()
    }

    pub(crate) fn touch(&mut self) {
        self.version += 1;
        self.dirty = true;
    }

    /// Append an instance at the end of the store order.
    pub(crate) fn push(&mut self, instance: BlockInstance) {
        self.instances.push(instance);
        self.touch();
    }

    /// Remove an instance by id. Idempotent: removing an id that does not
    /// exist is a no-op, not an error.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.instances.iter().position(|i| i.id == id) {
            Some(pos) => {
                self.instances.remove(pos);
                self.touch();
                debug!(instance_id = %id, "removed instance");
                true
            }
            None => false,
        }
    }

    /// Snapshot the store as a persistable layout. The timestamp comes
    /// from the caller; the store never reads the clock.
    pub fn to_layout(&self, saved_at: i64) -> Layout {
        Layout {
            instances: self.instances.clone(),
            canvas_id: self.canvas_id.clone(),
            saved_at,
        }
    }

    /// Replace the store contents with a loaded layout. The previous
    /// contents are discarded entirely, and the id generator is advanced
    /// past every id the document carries so future ids stay unique.
    pub fn replace_from_layout(&mut self, layout: Layout) {
        self.canvas_id = layout.canvas_id;
        self.ids = InstanceIdGenerator::new(&self.canvas_id);
        for instance in &layout.instances {
            self.ids.advance_past(&instance.id);
        }
        self.instances = layout.instances;
        self.version += 1;
        self.dirty = false;
        debug!(canvas_id = %self.canvas_id, instances = self.instances.len(), "loaded layout");
    }
}
