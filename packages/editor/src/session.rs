//! # Edit Session
//!
//! One canvas's complete editing state: the instance store, the placement
//! engine, the property editor, and the compile pipeline. The session
//! enforces mutual exclusion on canvas interaction — an open property
//! form blocks drag gestures and an active drag blocks opening a form.

use crate::mutations::{Mutation, MutationError, MutationOutcome};
use crate::pipeline::{CompiledBundle, Pipeline};
use crate::placement::{CommitOutcome, PlacementEngine, Point, Rect};
use crate::property_editor::{EditError, FormField, PropertyEditor, SubmitReport};
use crate::store::InstanceStore;
use pagecraft_blocks::{Layout, PropertyValue, Registry};
use tracing::debug;

pub struct EditSession {
    store: InstanceStore,
    placement: PlacementEngine,
    editor: PropertyEditor,
    pipeline: Pipeline,
}

impl EditSession {
    pub fn new(canvas_id: &str, canvas_bounds: Rect) -> Self {
        Self {
            store: InstanceStore::new(canvas_id),
            placement: PlacementEngine::new(canvas_bounds),
            editor: PropertyEditor::new(),
            pipeline: Pipeline::new(),
        }
    }

    pub fn store(&self) -> &InstanceStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut InstanceStore {
        &mut self.store
    }

    pub fn placement(&self) -> &PlacementEngine {
        &self.placement
    }

    pub fn set_canvas_bounds(&mut self, bounds: Rect) {
        self.placement.set_canvas_bounds(bounds);
    }

    // ---- drag gestures ----------------------------------------------

    /// Start dragging a palette item. Refused while a property form is
    /// open or another gesture is active.
    pub fn begin_palette_drag(&mut self, type_name: &str, at: Point) -> bool {
        if self.editor.is_open() {
            debug!("drag refused: property form is open");
            return false;
        }
        self.placement.begin_palette_drag(type_name, at)
    }

    /// Start dragging an existing instance by its move handle.
    pub fn begin_move_drag(&mut self, id: &str, origin: Point, at: Point) -> bool {
        if self.editor.is_open() {
            debug!("drag refused: property form is open");
            return false;
        }
        self.placement.begin_move_drag(id, origin, at)
    }

    pub fn drag_update(&mut self, at: Point) {
        self.placement.update(at);
    }

    pub fn drag_cancel(&mut self) {
        self.placement.cancel();
    }

    /// Release the pointer and commit the gesture.
    pub fn commit_drop(
        &mut self,
        at: Point,
        registry: &Registry,
    ) -> Result<CommitOutcome, MutationError> {
        self.placement.commit(at, &mut self.store, registry)
    }

    // ---- property editing -------------------------------------------

    /// Open the property form for an instance. Refused while a drag is
    /// in progress.
    pub fn open_properties(
        &mut self,
        registry: &Registry,
        instance_id: &str,
    ) -> Result<&[FormField], EditError> {
        if !self.placement.state().is_idle() {
            return Err(EditError::CanvasBusy);
        }
        self.editor.open(&self.store, registry, instance_id)
    }

    pub fn submit_properties(
        &mut self,
        registry: &Registry,
        values: &std::collections::BTreeMap<String, PropertyValue>,
    ) -> Result<SubmitReport, EditError> {
        self.editor.submit(&mut self.store, registry, values)
    }

    pub fn close_properties(&mut self) {
        self.editor.close();
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_open()
    }

    // ---- direct store operations ------------------------------------

    /// Delete an instance. Idempotent; not part of the drag state
    /// machine.
    pub fn delete_block(&mut self, id: &str) -> bool {
        self.store.remove(id)
    }

    /// Apply an arbitrary mutation and recompile.
    pub fn apply(
        &mut self,
        mutation: Mutation,
        registry: &Registry,
    ) -> Result<(MutationOutcome, &CompiledBundle), MutationError> {
        self.pipeline
            .apply_mutation(mutation, &mut self.store, registry)
    }

    // ---- compile / persistence --------------------------------------

    /// Recompile the current store.
    pub fn compile(&mut self, registry: &Registry) -> &CompiledBundle {
        self.pipeline.compile(registry, &self.store)
    }

    pub fn last_bundle(&self) -> Option<&CompiledBundle> {
        self.pipeline.last_bundle()
    }

    /// Snapshot for persistence; the timestamp is supplied by the caller.
    pub fn to_layout(&self, saved_at: i64) -> Layout {
        self.store.to_layout(saved_at)
    }

    /// Replace the session contents with a loaded layout. Any open form
    /// or active drag is discarded along with the old contents.
    pub fn load_layout(&mut self, layout: Layout) {
        self.editor.close();
        self.placement.cancel();
        self.pipeline.clear_cache();
        self.store.replace_from_layout(layout);
    }
}
