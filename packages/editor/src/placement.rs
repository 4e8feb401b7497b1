//! # Drag/Drop & Placement Engine
//!
//! Converts pointer gestures into store mutations. The engine holds the
//! full gesture state explicitly — no ambient "currently dragged"
//! singleton — so multiple canvases can each run their own engine.
//!
//! ## State machine (per gesture)
//!
//! ```text
//! Idle ──begin──▶ Dragging ──update──▶ HoverValid ──commit──▶ (mutation) ──▶ Idle
//!                    │                     │
//!                    │                 HoverInvalid
//!                    │                     │
//!                    └──────── cancel ─────┴──────────▶ Idle (no mutation)
//! ```
//!
//! Hover states are purely visual feedback; nothing mutates until a
//! commit lands inside the canvas bounds. Commits outside the bounds are
//! rejected and the engine returns to Idle untouched. A second gesture
//! start while a drag is active is ignored.

use crate::mutations::{Mutation, MutationError};
use crate::store::InstanceStore;
use pagecraft_blocks::{Position, Registry};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Canvas-relative pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The canvas drop surface in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            width,
            height,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.x <= self.origin.x + self.width
            && p.y >= self.origin.y
            && p.y <= self.origin.y + self.height
    }
}

/// What a gesture is carrying.
#[derive(Debug, Clone, PartialEq)]
pub enum DragSource {
    /// New block from the palette.
    Palette { type_name: String },

    /// Existing instance being repositioned. `origin` is the instance's
    /// measured top-left (canvas-relative) at gesture start, supplied by
    /// the view; the commit applies the pointer delta to it so the block
    /// does not jump under a mismatched cursor offset.
    Instance { id: String, origin: Point },
}

/// Gesture state. Hover states drive canvas highlighting only.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { source: DragSource, start: Point },
    HoverValid { source: DragSource, start: Point },
    HoverInvalid { source: DragSource, start: Point },
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    /// Whether the canvas should highlight as a valid drop target.
    pub fn is_hover_valid(&self) -> bool {
        matches!(self, DragState::HoverValid { .. })
    }
}

/// Result of a commit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// Palette drop created a new instance.
    Inserted { id: String },

    /// Instance move updated a position.
    Moved { id: String },

    /// Release outside canvas bounds, or no drag in progress: nothing
    /// mutated.
    Rejected,
}

#[derive(Debug, Clone)]
pub struct PlacementEngine {
    state: DragState,
    canvas: Rect,
}

impl PlacementEngine {
    pub fn new(canvas: Rect) -> Self {
        Self {
            state: DragState::Idle,
            canvas,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn canvas_bounds(&self) -> Rect {
        self.canvas
    }

    /// The view calls this when the canvas is measured or resized.
    pub fn set_canvas_bounds(&mut self, canvas: Rect) {
        self.canvas = canvas;
    }

    /// Start dragging a palette item. Returns false (ignored) if a
    /// gesture is already active.
    pub fn begin_palette_drag(&mut self, type_name: &str, at: Point) -> bool {
        self.begin(
            DragSource::Palette {
                type_name: type_name.to_string(),
            },
            at,
        )
    }

    /// Start dragging an existing instance by its move handle.
    pub fn begin_move_drag(&mut self, id: &str, origin: Point, at: Point) -> bool {
        self.begin(
            DragSource::Instance {
                id: id.to_string(),
                origin,
            },
            at,
        )
    }

    fn begin(&mut self, source: DragSource, at: Point) -> bool {
        if !self.state.is_idle() {
            debug!("ignoring gesture start while drag is active");
            return false;
        }
        self.state = DragState::Dragging { source, start: at };
        true
    }

    /// Pointer moved. Transitions between the hover states based on
    /// whether the pointer is over the drop surface. Visual only.
    pub fn update(&mut self, at: Point) {
        let (source, start) = match std::mem::take(&mut self.state) {
            DragState::Idle => return,
            DragState::Dragging { source, start }
            | DragState::HoverValid { source, start }
            | DragState::HoverInvalid { source, start } => (source, start),
        };

        self.state = if self.canvas.contains(at) {
            DragState::HoverValid { source, start }
        } else {
            DragState::HoverInvalid { source, start }
        };
    }

    /// Cancel the gesture (escape, pointer left the viewport). Never
    /// mutates the store.
    pub fn cancel(&mut self) {
        if !self.state.is_idle() {
            debug!("drag cancelled");
            self.state = DragState::Idle;
        }
    }

    /// Release the pointer. Commits inside canvas bounds mutate the
    /// store; anything else is rejected. The engine always ends Idle.
    pub fn commit(
        &mut self,
        at: Point,
        store: &mut InstanceStore,
        registry: &Registry,
    ) -> Result<CommitOutcome, MutationError> {
        let state = std::mem::take(&mut self.state);

        let (source, start) = match state {
            DragState::Idle => return Ok(CommitOutcome::Rejected),
            DragState::Dragging { source, start }
            | DragState::HoverValid { source, start }
            | DragState::HoverInvalid { source, start } => (source, start),
        };

        if !self.canvas.contains(at) {
            debug!("drop outside canvas bounds rejected");
            return Ok(CommitOutcome::Rejected);
        }

        match source {
            DragSource::Palette { type_name } => {
                // Position from pointer coordinates relative to canvas
                // origin.
                let position = Position::at(at.y - self.canvas.origin.y, at.x - self.canvas.origin.x);
                let outcome = Mutation::InsertBlock {
                    type_name,
                    position,
                }
                .apply(store, registry)?;

                Ok(CommitOutcome::Inserted {
                    id: outcome.inserted_id.unwrap_or_default(),
                })
            }

            DragSource::Instance { id, origin } => {
                // Pointer delta from gesture start, not absolute pointer
                // position.
                let dx = at.x - start.x;
                let dy = at.y - start.y;
                Mutation::MoveBlock {
                    id: id.clone(),
                    top: origin.y + dy,
                    left: origin.x + dx,
                }
                .apply(store, registry)?;

                Ok(CommitOutcome::Moved { id })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_blocks::Offset;
    use pretty_assertions::assert_eq;

    fn canvas() -> Rect {
        Rect::new(100.0, 0.0, 800.0, 600.0)
    }

    fn setup() -> (PlacementEngine, InstanceStore, Registry) {
        (
            PlacementEngine::new(canvas()),
            InstanceStore::new("canvas-1"),
            Registry::with_builtins(),
        )
    }

    #[test]
    fn test_palette_commit_inside_bounds_inserts_with_defaults() {
        let (mut engine, mut store, registry) = setup();

        assert!(engine.begin_palette_drag("hero", Point::new(10.0, 10.0)));
        engine.update(Point::new(350.0, 220.0));
        assert!(engine.state().is_hover_valid());

        let outcome = engine
            .commit(Point::new(350.0, 220.0), &mut store, &registry)
            .unwrap();

        let id = match outcome {
            CommitOutcome::Inserted { id } => id,
            other => panic!("expected insert, got {other:?}"),
        };

        assert_eq!(store.len(), 1);
        let instance = store.get(&id).unwrap();
        assert_eq!(
            instance.properties,
            registry.get("hero").unwrap().schema.defaults()
        );
        // Pointer (350, 220) against canvas origin (100, 0).
        assert_eq!(instance.position.top, Offset::Px(220.0));
        assert_eq!(instance.position.left, Offset::Px(250.0));
        assert!(engine.state().is_idle());
    }

    #[test]
    fn test_commit_outside_bounds_is_rejected() {
        let (mut engine, mut store, registry) = setup();

        engine.begin_palette_drag("hero", Point::new(10.0, 10.0));
        let outcome = engine
            .commit(Point::new(20.0, 20.0), &mut store, &registry)
            .unwrap();

        assert_eq!(outcome, CommitOutcome::Rejected);
        assert!(store.is_empty());
        assert!(engine.state().is_idle());
    }

    #[test]
    fn test_move_commit_applies_pointer_delta() {
        let (mut engine, mut store, registry) = setup();

        let id = Mutation::InsertBlock {
            type_name: "hero".to_string(),
            position: Position::at(50.0, 60.0),
        }
        .apply(&mut store, &registry)
        .unwrap()
        .inserted_id
        .unwrap();

        // Grab the move handle at (400, 300); instance sits at top=50,
        // left=60.
        engine.begin_move_drag(&id, Point::new(60.0, 50.0), Point::new(400.0, 300.0));
        engine.update(Point::new(430.0, 320.0));
        let outcome = engine
            .commit(Point::new(430.0, 320.0), &mut store, &registry)
            .unwrap();

        assert_eq!(outcome, CommitOutcome::Moved { id: id.clone() });
        let instance = store.get(&id).unwrap();
        // Delta (+30, +20) applied to the measured origin, not the
        // absolute pointer position.
        assert_eq!(instance.position.left, Offset::Px(90.0));
        assert_eq!(instance.position.top, Offset::Px(70.0));
    }

    #[test]
    fn test_move_rejected_outside_bounds_keeps_position() {
        let (mut engine, mut store, registry) = setup();

        let id = Mutation::InsertBlock {
            type_name: "hero".to_string(),
            position: Position::at(50.0, 60.0),
        }
        .apply(&mut store, &registry)
        .unwrap()
        .inserted_id
        .unwrap();
        let before = store.get(&id).unwrap().position;

        engine.begin_move_drag(&id, Point::new(60.0, 50.0), Point::new(400.0, 300.0));
        let outcome = engine
            .commit(Point::new(5000.0, 300.0), &mut store, &registry)
            .unwrap();

        assert_eq!(outcome, CommitOutcome::Rejected);
        assert_eq!(store.get(&id).unwrap().position, before);
    }

    #[test]
    fn test_cancel_never_mutates() {
        let (mut engine, mut store, registry) = setup();

        engine.begin_palette_drag("hero", Point::new(10.0, 10.0));
        engine.update(Point::new(350.0, 220.0));
        engine.cancel();

        assert!(engine.state().is_idle());
        assert!(store.is_empty());

        // A commit after cancel is a no-op too.
        let outcome = engine
            .commit(Point::new(350.0, 220.0), &mut store, &registry)
            .unwrap();
        assert_eq!(outcome, CommitOutcome::Rejected);
    }

    #[test]
    fn test_secondary_gesture_start_is_ignored() {
        let (mut engine, _store, _registry) = setup();

        assert!(engine.begin_palette_drag("hero", Point::new(10.0, 10.0)));
        assert!(!engine.begin_palette_drag("grid", Point::new(20.0, 20.0)));
        assert!(!engine.begin_move_drag("a-1", Point::new(0.0, 0.0), Point::new(5.0, 5.0)));

        // The original gesture is still the active one.
        match engine.state() {
            DragState::Dragging {
                source: DragSource::Palette { type_name },
                ..
            } => assert_eq!(type_name, "hero"),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_hover_states_track_pointer() {
        let (mut engine, _store, _registry) = setup();

        engine.begin_palette_drag("hero", Point::new(10.0, 10.0));
        engine.update(Point::new(350.0, 220.0));
        assert!(engine.state().is_hover_valid());

        engine.update(Point::new(10.0, 10.0));
        assert!(matches!(engine.state(), DragState::HoverInvalid { .. }));

        engine.update(Point::new(350.0, 220.0));
        assert!(engine.state().is_hover_valid());
    }
}
