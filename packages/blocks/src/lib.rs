//! # Pagecraft Blocks
//!
//! The block model: the registry of block *types* and the instances
//! placed on a canvas.
//!
//! A [`BlockType`] couples three things:
//! - a structured markup template ([`TemplateNode`]) with named insertion
//!   points bound to property keys,
//! - a declarative [`PropertySchema`] describing the configurable fields
//!   and their constraints,
//! - the type-level style rules emitted once per distinct type in use.
//!
//! A [`BlockInstance`] is one placed, configured occurrence of a type:
//! a unique id, the type key, the current property values, and a
//! [`Position`] that is either part of normal document flow or absolutely
//! placed on the canvas.
//!
//! The registry is append-only at runtime; re-registering an existing type
//! overwrites it in place (last write wins) so live schema edits during
//! development keep the palette order stable.

mod builtins;
mod id;
mod instance;
mod layout;
mod registry;
mod schema;
mod template;

pub use builtins::builtin_block_types;
pub use id::InstanceIdGenerator;
pub use instance::{BlockInstance, Offset, Position};
pub use layout::Layout;
pub use registry::{BlockType, Registry, RegistryError, StyleRule};
pub use schema::{Constraints, PropertyDef, PropertyKind, PropertySchema};
pub use template::TemplateNode;

// Re-export the shared value type; nearly every consumer of this crate
// needs it.
pub use pagecraft_common::PropertyValue;
