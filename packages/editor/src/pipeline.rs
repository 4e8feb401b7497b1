//! # Editing Pipeline
//!
//! Coordinates mutate → compile: after a mutation the store is recompiled
//! to the output bundle, and the last bundle is cached for views that
//! need it without forcing a recompute.

use crate::mutations::{Mutation, MutationError, MutationOutcome};
use crate::store::InstanceStore;
use pagecraft_blocks::Registry;
use pagecraft_compiler_css::compile_stylesheet;
use pagecraft_compiler_html::{
    compile_markup, compile_standalone, CompileOptions, CompileWarning, INTERACTION_SCRIPT,
};

/// The compiled page: three artifacts plus the warnings collected while
/// producing them.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledBundle {
    pub markup: String,
    pub stylesheet: String,
    pub script: String,
    pub warnings: Vec<CompileWarning>,
}

impl CompiledBundle {
    /// Combine the artifacts into one self-contained document.
    pub fn standalone(&self, title: &str) -> String {
        compile_standalone(title, &self.markup, &self.stylesheet, &self.script)
    }
}

/// Manages the full edit → render pipeline.
pub struct Pipeline {
    options: CompileOptions,
    last_bundle: Option<CompiledBundle>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::with_options(CompileOptions::default())
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Self {
            options,
            last_bundle: None,
        }
    }

    /// Apply a mutation and recompile.
    pub fn apply_mutation(
        &mut self,
        mutation: Mutation,
        store: &mut InstanceStore,
        registry: &Registry,
    ) -> Result<(MutationOutcome, &CompiledBundle), MutationError> {
        let outcome = mutation.apply(store, registry)?;
        let bundle = self.compile(registry, store);
        Ok((outcome, bundle))
    }

    /// Full recompile of the current store. Pure: the same registry and
    /// store always produce the same bundle.
    pub fn compile(&mut self, registry: &Registry, store: &InstanceStore) -> &CompiledBundle {
        let (markup, warnings) = compile_markup(registry, store.instances(), &self.options);
        let stylesheet = compile_stylesheet(registry, store.instances());

        self.last_bundle.insert(CompiledBundle {
            markup,
            stylesheet,
            script: INTERACTION_SCRIPT.to_string(),
            warnings,
        })
    }

    /// Last compiled bundle, if any.
    pub fn last_bundle(&self) -> Option<&CompiledBundle> {
        self.last_bundle.as_ref()
    }

    /// Drop the cache (force a recompile on next access).
    pub fn clear_cache(&mut self) {
        self.last_bundle = None;
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
