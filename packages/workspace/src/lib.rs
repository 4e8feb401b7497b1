//! # Pagecraft Workspace
//!
//! The system boundary around the in-memory editor: loading and saving
//! layout documents against an external store, and ingesting starter
//! structures from an external generator.
//!
//! Everything in-memory stays synchronous; only the collaborator calls
//! here are async, and each is a single in-flight request/response with a
//! timeout. A failed or timed-out save never touches the in-memory
//! instance store.

mod client;
mod generator;
mod presets;
mod store;

pub use client::{PersistenceClient, SaveReport};
pub use generator::{ingest_seeds, BlockSeed, GeneratorError, IngestReport, StructureGenerator};
pub use presets::{style_preset, style_presets, StylePreset};
pub use store::{FileStore, LayoutStore, MemoryStore, PersistenceError};
