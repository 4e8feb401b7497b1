//! # Pagecraft Editor
//!
//! Core canvas editing engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ blocks: type registry + instance model      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: instance store + interaction state  │
//! │  - Ordered store of placed block instances  │
//! │  - Mutations with validation                │
//! │  - Drag/drop placement state machine        │
//! │  - Schema-driven property editor            │
//! │  - Coordinate mutate → compile pipeline     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compilers: store → markup / stylesheet      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core principles
//!
//! 1. **The store is the source of truth**: the canvas view is always a
//!    projection of [`InstanceStore`], never independent state.
//! 2. **Mutations are synchronous**: every placement commit, property
//!    submit, and delete runs to completion on the calling thread.
//! 3. **One interaction at a time**: an open property form blocks drag
//!    gestures and vice versa; a second drag cannot start while one is
//!    active.
//! 4. **Compiled output is derived**: recompiling after a mutation always
//!    reproduces the same bundle for the same store.

mod mutations;
mod pipeline;
mod placement;
mod property_editor;
mod session;
mod store;

pub use mutations::{Mutation, MutationError, MutationOutcome};
pub use pipeline::{CompiledBundle, Pipeline};
pub use placement::{CommitOutcome, DragSource, DragState, PlacementEngine, Point, Rect};
pub use property_editor::{
    EditError, FormField, PropertyEditor, SubmitReport, ValidationError,
};
pub use session::EditSession;
pub use store::InstanceStore;

// Re-export the model types session callers constantly need.
pub use pagecraft_blocks::{BlockInstance, Layout, Offset, Position, PropertyValue, Registry};
