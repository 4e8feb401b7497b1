//! Markup half of the page compiler.
//!
//! Walks the instance store in order, resolves each instance's block type,
//! substitutes property values into the type's structured template, and
//! wraps the result in a positioned container. Property application is
//! driven by an explicit dispatch table keyed by semantic property name
//! (see [`effects`]); properties with no dispatch entry and no template
//! binding are preserved as data attributes.
//!
//! A broken type reference never aborts the document: the instance is
//! skipped and a [`CompileWarning`] is recorded.

mod compiler;
mod document;
mod effects;
mod script;

pub use compiler::{compile_markup, CompileOptions, CompileWarning};
pub use document::{compile_linked, compile_standalone};
pub use effects::{EffectTable, PropertyEffect};
pub use script::INTERACTION_SCRIPT;
