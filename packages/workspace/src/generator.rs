//! The prompt-to-structure collaborator contract and seed ingestion.
//!
//! The external generator turns a free-text prompt and a preset key into
//! a starter list of `{type, properties}` seeds. The core ingests them:
//! ids are assigned here, positions start in document flow, and seeds
//! whose type the registry does not know are skipped with a warning —
//! the same containment rule the compiler applies to broken references.

use crate::presets::StylePreset;
use pagecraft_blocks::{Position, PropertyValue, Registry};
use pagecraft_editor::{InstanceStore, Mutation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

/// One generated block: a type key plus optional starter properties.
/// No id, no position — the core assigns those on ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSeed {
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

impl BlockSeed {
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            properties: BTreeMap::new(),
        }
    }
}

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("generator request failed: {0}")]
    Failed(String),

    #[error("generator request timed out")]
    Timeout,
}

/// The external initial-structure generator.
#[allow(async_fn_in_trait)]
pub trait StructureGenerator {
    async fn generate(
        &self,
        prompt: &str,
        preset_key: &str,
    ) -> Result<Vec<BlockSeed>, GeneratorError>;
}

/// What ingestion did with a seed list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IngestReport {
    /// Ids of the instances created, in seed order.
    pub inserted: Vec<String>,

    /// Type keys that were skipped because the registry does not know
    /// them.
    pub skipped: Vec<String>,
}

/// Append generated seeds to the store.
///
/// Each seed becomes an instance with schema defaults, the preset's
/// background/text colors where the schema declares them and the seed
/// does not, and finally the seed's own properties on top. Positions are
/// all-auto: generated pages start in document flow.
pub fn ingest_seeds(
    seeds: &[BlockSeed],
    preset: Option<&StylePreset>,
    store: &mut InstanceStore,
    registry: &Registry,
) -> IngestReport {
    let mut report = IngestReport::default();

    for seed in seeds {
        let Some(block) = registry.get(&seed.type_name) else {
            warn!(block_type = %seed.type_name, "skipping generated seed with unknown type");
            report.skipped.push(seed.type_name.clone());
            continue;
        };

        let outcome = match (Mutation::InsertBlock {
            type_name: seed.type_name.clone(),
            position: Position::auto(),
        })
        .apply(store, registry)
        {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(block_type = %seed.type_name, %err, "seed insert failed, skipping");
                report.skipped.push(seed.type_name.clone());
                continue;
            }
        };

        let Some(id) = outcome.inserted_id else {
            continue;
        };

        let mut values: BTreeMap<String, PropertyValue> = BTreeMap::new();
        if let Some(preset) = preset {
            for (key, color) in [
                ("backgroundColor", preset.background),
                ("textColor", preset.text),
            ] {
                if block.schema.contains_key(key) && !seed.properties.contains_key(key) {
                    values.insert(key.to_string(), PropertyValue::Text(color.to_string()));
                }
            }
        }
        for (key, value) in &seed.properties {
            values.insert(key.clone(), value.clone());
        }

        if !values.is_empty() {
            if let Err(err) = (Mutation::SetProperties {
                id: id.clone(),
                values,
            })
            .apply(store, registry)
            {
                warn!(instance_id = %id, %err, "seed properties were not applied");
            }
        }

        debug!(instance_id = %id, block_type = %seed.type_name, "ingested seed");
        report.inserted.push(id);
    }

    report
}
