//! # Property Editor
//!
//! Schema-driven editing of one instance's properties.
//!
//! `open` builds an ordered form descriptor from the instance's type
//! schema; `submit` validates each value against its schema entry and
//! writes the accepted values atomically; `close` discards in-progress
//! edits. Validation failures block only the offending field — the rest
//! of the form still commits, and a rejected field keeps its prior value.

use crate::mutations::Mutation;
use crate::store::InstanceStore;
use pagecraft_blocks::{Constraints, PropertyKind, PropertyValue, Registry};
use pagecraft_common::text::camel_case_to_title;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("unknown instance: {0}")]
    InstanceNotFound(String),

    #[error("unknown block type: {0}")]
    TypeNotFound(String),

    #[error("no property form is open")]
    NotOpen,

    #[error("a property form is already open")]
    AlreadyOpen,

    #[error("a drag gesture is in progress")]
    CanvasBusy,
}

/// A rejected field: the property keeps its prior value.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("invalid value for '{key}': {reason}")]
pub struct ValidationError {
    pub key: String,
    pub reason: String,
}

/// One entry of the form descriptor, in schema declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub key: String,
    pub label: String,
    pub kind: PropertyKind,
    pub current: PropertyValue,
    pub constraints: Constraints,
}

/// Outcome of a submit: how many fields were written, and which were
/// rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReport {
    pub applied: usize,
    pub rejected: Vec<ValidationError>,
}

#[derive(Debug, Clone)]
struct OpenForm {
    instance_id: String,
    fields: Vec<FormField>,
}

/// Modal property editor. At most one form is open at a time; while a
/// form is open the session refuses drag gestures.
#[derive(Debug, Clone, Default)]
pub struct PropertyEditor {
    open: Option<OpenForm>,
}

impl PropertyEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Id of the instance being edited, if a form is open.
    pub fn editing(&self) -> Option<&str> {
        self.open.as_ref().map(|f| f.instance_id.as_str())
    }

    pub fn fields(&self) -> Option<&[FormField]> {
        self.open.as_ref().map(|f| f.fields.as_slice())
    }

    /// Build the form descriptor for an instance and open the editor.
    pub fn open(
        &mut self,
        store: &InstanceStore,
        registry: &Registry,
        instance_id: &str,
    ) -> Result<&[FormField], EditError> {
        if self.open.is_some() {
            return Err(EditError::AlreadyOpen);
        }

        let instance = store
            .get(instance_id)
            .ok_or_else(|| EditError::InstanceNotFound(instance_id.to_string()))?;
        let block = registry
            .get(&instance.type_name)
            .ok_or_else(|| EditError::TypeNotFound(instance.type_name.clone()))?;

        let fields = block
            .schema
            .iter()
            .map(|def| FormField {
                key: def.key.clone(),
                label: camel_case_to_title(&def.key),
                kind: def.kind,
                current: instance
                    .property(&def.key)
                    .cloned()
                    .unwrap_or_else(|| def.default.clone()),
                constraints: def.constraints.clone(),
            })
            .collect();

        debug!(instance_id = %instance_id, "opened property form");
        self.open = Some(OpenForm {
            instance_id: instance_id.to_string(),
            fields,
        });
        Ok(self.open.as_ref().map(|f| f.fields.as_slice()).unwrap_or(&[]))
    }

    /// Validate submitted values and write the accepted ones atomically.
    /// Closes the form.
    ///
    /// Per-kind rules:
    /// - number/range: coerced to numeric, clamped into `[min, max]`
    /// - boolean: any truthy representation maps to true
    /// - color/text/textarea/image: accepted verbatim
    /// - select: must be one of the declared options, otherwise the field
    ///   is rejected and the prior value stands
    pub fn submit(
        &mut self,
        store: &mut InstanceStore,
        registry: &Registry,
        values: &BTreeMap<String, PropertyValue>,
    ) -> Result<SubmitReport, EditError> {
        let form = self.open.take().ok_or(EditError::NotOpen)?;

        let instance = store
            .get(&form.instance_id)
            .ok_or_else(|| EditError::InstanceNotFound(form.instance_id.clone()))?;
        let block = registry
            .get(&instance.type_name)
            .ok_or_else(|| EditError::TypeNotFound(instance.type_name.clone()))?;

        let mut accepted: BTreeMap<String, PropertyValue> = BTreeMap::new();
        let mut rejected = Vec::new();

        for (key, value) in values {
            let Some(def) = block.schema.get(key) else {
                rejected.push(ValidationError {
                    key: key.clone(),
                    reason: "property is not declared by the block type".to_string(),
                });
                continue;
            };

            match validate_value(def.kind, &def.constraints, value) {
                Ok(normalized) => {
                    accepted.insert(key.clone(), normalized);
                }
                Err(reason) => rejected.push(ValidationError {
                    key: key.clone(),
                    reason,
                }),
            }
        }

        let applied = accepted.len();
        if applied > 0 {
            // One mutation: the compiler never sees a partial update.
            Mutation::SetProperties {
                id: form.instance_id.clone(),
                values: accepted,
            }
            .apply(store, registry)
            .map_err(|_| EditError::InstanceNotFound(form.instance_id.clone()))?;
        }

        debug!(
            instance_id = %form.instance_id,
            applied,
            rejected = rejected.len(),
            "submitted property form"
        );
        Ok(SubmitReport { applied, rejected })
    }

    /// Discard in-progress edits without touching the store.
    pub fn close(&mut self) {
        if self.open.take().is_some() {
            debug!("closed property form, edits discarded");
        }
    }
}

fn validate_value(
    kind: PropertyKind,
    constraints: &Constraints,
    value: &PropertyValue,
) -> Result<PropertyValue, String> {
    match kind {
        PropertyKind::Number | PropertyKind::Range => match value.as_number() {
            Some(n) => Ok(PropertyValue::Number(constraints.clamp(n))),
            None => Err(format!("expected a number, got {:?}", value.as_display())),
        },

        PropertyKind::Boolean => Ok(PropertyValue::Bool(value.is_truthy())),

        PropertyKind::Select => {
            let candidate = value.as_display();
            if constraints.options.iter().any(|o| *o == candidate) {
                Ok(PropertyValue::Text(candidate))
            } else {
                Err(format!(
                    "'{}' is not one of the declared options",
                    candidate
                ))
            }
        }

        // No format validation: malformed colors and URLs pass through
        // and compile as literals.
        PropertyKind::Color
        | PropertyKind::Text
        | PropertyKind::Textarea
        | PropertyKind::Image => Ok(PropertyValue::Text(value.as_display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_blocks::{
        BlockType, Position, PropertyDef, PropertySchema, TemplateNode,
    };
    use pretty_assertions::assert_eq;

    fn registry_with_banner() -> Registry {
        let mut registry = Registry::with_builtins();
        registry
            .register(BlockType {
                type_name: "banner".to_string(),
                name: "Banner".to_string(),
                icon: None,
                template: TemplateNode::element("div"),
                schema: PropertySchema::new()
                    .with(
                        PropertyDef::new("alignment", PropertyKind::Select, "left")
                            .with_constraints(Constraints::options(["left", "center", "right"])),
                    )
                    .with(
                        PropertyDef::new("opacity", PropertyKind::Range, 100.0)
                            .with_constraints(Constraints::range(0.0, 100.0)),
                    ),
                styles: Vec::new(),
            })
            .unwrap();
        registry
    }

    fn store_with(registry: &Registry, type_name: &str) -> (InstanceStore, String) {
        let mut store = InstanceStore::new("canvas-1");
        let id = Mutation::InsertBlock {
            type_name: type_name.to_string(),
            position: Position::auto(),
        }
        .apply(&mut store, registry)
        .unwrap()
        .inserted_id
        .unwrap();
        (store, id)
    }

    #[test]
    fn test_open_returns_schema_ordered_descriptor() {
        let registry = registry_with_banner();
        let (store, id) = store_with(&registry, "hero");

        let mut editor = PropertyEditor::new();
        let fields = editor.open(&store, &registry, &id).unwrap();

        let keys: Vec<_> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["heading", "subheading", "buttonText", "backgroundImage", "textColor"]
        );
        assert_eq!(fields[0].label, "Heading");
        assert_eq!(
            fields[0].current,
            PropertyValue::Text("Welcome to Our Website".into())
        );
    }

    #[test]
    fn test_open_unknown_instance_fails() {
        let registry = registry_with_banner();
        let store = InstanceStore::new("canvas-1");

        let mut editor = PropertyEditor::new();
        let err = editor.open(&store, &registry, "ghost").unwrap_err();
        assert_eq!(err, EditError::InstanceNotFound("ghost".to_string()));
    }

    #[test]
    fn test_out_of_range_numbers_are_clamped_not_rejected() {
        let registry = registry_with_banner();
        let (mut store, id) = store_with(&registry, "banner");

        let mut editor = PropertyEditor::new();
        editor.open(&store, &registry, &id).unwrap();

        let values = [("opacity".to_string(), PropertyValue::Number(250.0))]
            .into_iter()
            .collect();
        let report = editor.submit(&mut store, &registry, &values).unwrap();

        assert!(report.rejected.is_empty());
        assert_eq!(
            store.get(&id).unwrap().property("opacity"),
            Some(&PropertyValue::Number(100.0))
        );
    }

    #[test]
    fn test_numbers_coerce_from_form_text() {
        let registry = registry_with_banner();
        let (mut store, id) = store_with(&registry, "banner");

        let mut editor = PropertyEditor::new();
        editor.open(&store, &registry, &id).unwrap();

        let values = [("opacity".to_string(), PropertyValue::Text("42".into()))]
            .into_iter()
            .collect();
        editor.submit(&mut store, &registry, &values).unwrap();

        assert_eq!(
            store.get(&id).unwrap().property("opacity"),
            Some(&PropertyValue::Number(42.0))
        );
    }

    #[test]
    fn test_invalid_select_keeps_prior_value() {
        let registry = registry_with_banner();
        let (mut store, id) = store_with(&registry, "banner");

        let mut editor = PropertyEditor::new();
        editor.open(&store, &registry, &id).unwrap();

        let values = [(
            "alignment".to_string(),
            PropertyValue::Text("diagonal".into()),
        )]
        .into_iter()
        .collect();
        let report = editor.submit(&mut store, &registry, &values).unwrap();

        assert_eq!(report.applied, 0);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].key, "alignment");
        assert_eq!(
            store.get(&id).unwrap().property("alignment"),
            Some(&PropertyValue::Text("left".into()))
        );
    }

    #[test]
    fn test_rejected_field_does_not_block_the_rest() {
        let registry = registry_with_banner();
        let (mut store, id) = store_with(&registry, "banner");

        let mut editor = PropertyEditor::new();
        editor.open(&store, &registry, &id).unwrap();

        let values = [
            (
                "alignment".to_string(),
                PropertyValue::Text("diagonal".into()),
            ),
            ("opacity".to_string(), PropertyValue::Number(55.0)),
        ]
        .into_iter()
        .collect();
        let report = editor.submit(&mut store, &registry, &values).unwrap();

        assert_eq!(report.applied, 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(
            store.get(&id).unwrap().property("opacity"),
            Some(&PropertyValue::Number(55.0))
        );
    }

    #[test]
    fn test_boolean_truthy_coercion() {
        let registry = registry_with_banner();
        let (mut store, id) = store_with(&registry, "header");

        let mut editor = PropertyEditor::new();
        editor.open(&store, &registry, &id).unwrap();

        let values = [("fixed".to_string(), PropertyValue::Text("on".into()))]
            .into_iter()
            .collect();
        editor.submit(&mut store, &registry, &values).unwrap();

        assert_eq!(
            store.get(&id).unwrap().property("fixed"),
            Some(&PropertyValue::Bool(true))
        );
    }

    #[test]
    fn test_close_discards_edits() {
        let registry = registry_with_banner();
        let (store, id) = store_with(&registry, "hero");
        let before = store.get(&id).unwrap().clone();

        let mut editor = PropertyEditor::new();
        editor.open(&store, &registry, &id).unwrap();
        editor.close();

        assert!(!editor.is_open());
        assert_eq!(store.get(&id).unwrap(), &before);
    }

    #[test]
    fn test_second_open_is_refused() {
        let registry = registry_with_banner();
        let (store, id) = store_with(&registry, "hero");

        let mut editor = PropertyEditor::new();
        editor.open(&store, &registry, &id).unwrap();
        let err = editor.open(&store, &registry, &id).unwrap_err();
        assert_eq!(err, EditError::AlreadyOpen);
    }
}
