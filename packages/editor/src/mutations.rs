//! # Store Mutations
//!
//! High-level semantic operations on the instance store.
//!
//! ## Design principles
//!
//! 1. **Intent-preserving**: each mutation is one user-visible operation
//! 2. **Validated**: structural constraints are checked before applying
//! 3. **Atomic**: a mutation either fully applies or leaves the store
//!    untouched; the compiler never observes a partial update

use crate::store::InstanceStore;
use pagecraft_blocks::{BlockInstance, Offset, Position, PropertyValue, Registry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Semantic mutations against the instance store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Create a new instance of a registered type with schema-default
    /// properties, appended at the end of store order.
    InsertBlock {
        type_name: String,
        position: Position,
    },

    /// Reposition an existing instance. Only top/left change; width and
    /// height are preserved.
    MoveBlock { id: String, top: f64, left: f64 },

    /// Write a set of property values atomically.
    SetProperties {
        id: String,
        values: BTreeMap<String, PropertyValue>,
    },

    /// Remove an instance. Removing an unknown id is a no-op.
    RemoveBlock { id: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("unknown block type: {0}")]
    UnknownType(String),

    #[error("unknown instance: {0}")]
    InstanceNotFound(String),
}

/// Result of a successfully applied mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    /// New store version.
    pub version: u64,

    /// Id of the instance created by `InsertBlock`.
    pub inserted_id: Option<String>,
}

impl Mutation {
    /// Validate without applying.
    pub fn validate(&self, store: &InstanceStore, registry: &Registry) -> Result<(), MutationError> {
        match self {
            Mutation::InsertBlock { type_name, .. } => {
                if !registry.contains(type_name) {
                    return Err(MutationError::UnknownType(type_name.clone()));
                }
                Ok(())
            }
            Mutation::MoveBlock { id, .. } | Mutation::SetProperties { id, .. } => {
                if !store.contains(id) {
                    return Err(MutationError::InstanceNotFound(id.clone()));
                }
                Ok(())
            }
            // Deletion is idempotent by contract.
            Mutation::RemoveBlock { .. } => Ok(()),
        }
    }

    /// Apply the mutation to the store with validation.
    pub fn apply(
        &self,
        store: &mut InstanceStore,
        registry: &Registry,
    ) -> Result<MutationOutcome, MutationError> {
        self.validate(store, registry)?;

        let inserted_id = match self {
            Mutation::InsertBlock {
                type_name,
                position,
            } => {
                let block = registry
                    .get(type_name)
                    .ok_or_else(|| MutationError::UnknownType(type_name.clone()))?;

                let id = store.next_id();
                let instance = BlockInstance {
                    id: id.clone(),
                    type_name: type_name.clone(),
                    properties: block.schema.defaults(),
                    position: *position,
                };
                debug!(instance_id = %id, block_type = %type_name, "inserted block");
                store.push(instance);
                Some(id)
            }

            Mutation::MoveBlock { id, top, left } => {
                let instance = store
                    .get_mut(id)
                    .ok_or_else(|| MutationError::InstanceNotFound(id.clone()))?;
                instance.position.top = Offset::Px(*top);
                instance.position.left = Offset::Px(*left);
                store.touch();
                None
            }

            Mutation::SetProperties { id, values } => {
                let instance = store
                    .get_mut(id)
                    .ok_or_else(|| MutationError::InstanceNotFound(id.clone()))?;
                for (key, value) in values {
                    instance.properties.insert(key.clone(), value.clone());
                }
                store.touch();
                None
            }

            Mutation::RemoveBlock { id } => {
                store.remove(id);
                None
            }
        };

        Ok(MutationOutcome {
            version: store.version(),
            inserted_id,
        })
    }
}
