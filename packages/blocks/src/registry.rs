use crate::schema::PropertySchema;
use crate::template::TemplateNode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("invalid block type definition: {0}")]
    InvalidSchema(String),

    #[error("unknown block type: {0}")]
    NotFound(String),
}

/// One CSS rule block emitted for a block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    pub selector: String,
    pub declarations: Vec<(String, String)>,
}

impl StyleRule {
    pub fn new(selector: &str, declarations: &[(&str, &str)]) -> Self {
        Self {
            selector: selector.to_string(),
            declarations: declarations
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// A registered, reusable block definition: template + property schema +
/// type-level styles. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockType {
    #[serde(rename = "type")]
    pub type_name: String,

    /// Human label shown in the palette.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    pub template: TemplateNode,

    #[serde(default)]
    pub schema: PropertySchema,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<StyleRule>,
}

/// Catalog of available block types.
///
/// Insertion-ordered so the palette renders stably; re-registering an
/// existing type overwrites it in place.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: Vec<BlockType>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the builtin block library.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for block in crate::builtins::builtin_block_types() {
            registry
                .register(block)
                .expect("builtin block types are valid");
        }
        registry
    }

    /// Register a block type. Fails with `InvalidSchema` when the key or
    /// label is missing, or when the template references a property the
    /// schema does not declare.
    pub fn register(&mut self, block: BlockType) -> Result<(), RegistryError> {
        if block.type_name.trim().is_empty() {
            return Err(RegistryError::InvalidSchema(
                "block type key is required".to_string(),
            ));
        }
        if block.name.trim().is_empty() {
            return Err(RegistryError::InvalidSchema(format!(
                "block type '{}' has no name",
                block.type_name
            )));
        }

        for property in block.template.bound_properties() {
            if !block.schema.contains_key(&property) {
                return Err(RegistryError::InvalidSchema(format!(
                    "template of '{}' references undeclared property '{}'",
                    block.type_name, property
                )));
            }
        }

        match self.index.get(&block.type_name) {
            Some(&pos) => {
                warn!(block_type = %block.type_name, "overwriting registered block type");
                self.types[pos] = block;
            }
            None => {
                debug!(block_type = %block.type_name, "registering block type");
                self.index.insert(block.type_name.clone(), self.types.len());
                self.types.push(block);
            }
        }

        Ok(())
    }

    /// Look up a block type; `None` is the not-found signal.
    pub fn get(&self, type_name: &str) -> Option<&BlockType> {
        self.index.get(type_name).map(|&pos| &self.types[pos])
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.index.contains_key(type_name)
    }

    /// Stable, insertion-ordered listing for the palette.
    pub fn list(&self) -> impl Iterator<Item = &BlockType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
