use pagecraft_common::PropertyValue;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// The editing widget a property is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Color,
    Text,
    Textarea,
    Number,
    Range,
    Boolean,
    Image,
    Select,
}

impl PropertyKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "color" => Some(PropertyKind::Color),
            "text" => Some(PropertyKind::Text),
            "textarea" => Some(PropertyKind::Textarea),
            "number" => Some(PropertyKind::Number),
            "range" => Some(PropertyKind::Range),
            "boolean" => Some(PropertyKind::Boolean),
            "image" => Some(PropertyKind::Image),
            "select" => Some(PropertyKind::Select),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::Color => "color",
            PropertyKind::Text => "text",
            PropertyKind::Textarea => "textarea",
            PropertyKind::Number => "number",
            PropertyKind::Range => "range",
            PropertyKind::Boolean => "boolean",
            PropertyKind::Image => "image",
            PropertyKind::Select => "select",
        }
    }

    /// Whether submitted values are coerced to numbers and clamped.
    pub fn is_numeric(&self) -> bool {
        matches!(self, PropertyKind::Number | PropertyKind::Range)
    }
}

// Unrecognized kinds degrade to plain text inputs instead of failing the
// whole definition.
impl<'de> Deserialize<'de> for PropertyKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(PropertyKind::parse(&raw).unwrap_or_else(|| {
            warn!(kind = %raw, "unrecognized property kind, falling back to text");
            PropertyKind::Text
        }))
    }
}

/// Constraints attached to a property definition. Which fields are
/// meaningful depends on the kind: min/max/step for number and range,
/// unit for range display, options for select.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Constraints {
    pub fn range(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Default::default()
        }
    }

    pub fn range_with_unit(min: f64, max: f64, unit: &str) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            unit: Some(unit.to_string()),
            ..Default::default()
        }
    }

    pub fn options<S: Into<String>>(options: impl IntoIterator<Item = S>) -> Self {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Clamp a numeric value into `[min, max]`.
    pub fn clamp(&self, value: f64) -> f64 {
        let mut v = value;
        if let Some(min) = self.min {
            v = v.max(min);
        }
        if let Some(max) = self.max {
            v = v.min(max);
        }
        v
    }
}

/// One configurable field of a block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDef {
    pub key: String,
    pub kind: PropertyKind,
    pub default: PropertyValue,

    #[serde(default, skip_serializing_if = "is_default_constraints")]
    pub constraints: Constraints,
}

fn is_default_constraints(c: &Constraints) -> bool {
    *c == Constraints::default()
}

impl PropertyDef {
    pub fn new(key: &str, kind: PropertyKind, default: impl Into<PropertyValue>) -> Self {
        Self {
            key: key.to_string(),
            kind,
            default: default.into(),
            constraints: Constraints::default(),
        }
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }
}

/// Declaration-ordered property schema of a block type.
///
/// Iteration order is the declaration order, which is also the order the
/// property editor lays out its form fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertySchema {
    defs: Vec<PropertyDef>,
}

impl PropertySchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, def: PropertyDef) -> Self {
        self.insert(def);
        self
    }

    /// Add a definition, replacing an existing one with the same key in
    /// place so declaration order stays stable.
    pub fn insert(&mut self, def: PropertyDef) {
        if let Some(existing) = self.defs.iter_mut().find(|d| d.key == def.key) {
            *existing = def;
        } else {
            self.defs.push(def);
        }
    }

    pub fn get(&self, key: &str) -> Option<&PropertyDef> {
        self.defs.iter().find(|d| d.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Default value for every declared property. New instances start from
    /// this map, so no property is ever undefined at compile time.
    pub fn defaults(&self) -> BTreeMap<String, PropertyValue> {
        self.defs
            .iter()
            .map(|d| (d.key.clone(), d.default.clone()))
            .collect()
    }
}

impl FromIterator<PropertyDef> for PropertySchema {
    fn from_iter<I: IntoIterator<Item = PropertyDef>>(iter: I) -> Self {
        let mut schema = PropertySchema::new();
        for def in iter {
            schema.insert(def);
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unknown_kind_falls_back_to_text() {
        let def: PropertyDef = serde_json::from_str(
            r#"{ "key": "wobble", "kind": "hologram", "default": "x" }"#,
        )
        .unwrap();

        assert_eq!(def.kind, PropertyKind::Text);
    }

    #[test]
    fn test_schema_preserves_declaration_order() {
        let schema: PropertySchema = [
            PropertyDef::new("heading", PropertyKind::Text, "Hi"),
            PropertyDef::new("textColor", PropertyKind::Color, "#fff"),
            PropertyDef::new("columns", PropertyKind::Number, 3.0),
        ]
        .into_iter()
        .collect();

        let keys: Vec<_> = schema.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["heading", "textColor", "columns"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut schema: PropertySchema = [
            PropertyDef::new("a", PropertyKind::Text, "1"),
            PropertyDef::new("b", PropertyKind::Text, "2"),
        ]
        .into_iter()
        .collect();

        schema.insert(PropertyDef::new("a", PropertyKind::Color, "#000"));

        let keys: Vec<_> = schema.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(schema.get("a").unwrap().kind, PropertyKind::Color);
    }

    #[test]
    fn test_clamping() {
        let c = Constraints::range(1.0, 6.0);
        assert_eq!(c.clamp(0.0), 1.0);
        assert_eq!(c.clamp(9.0), 6.0);
        assert_eq!(c.clamp(4.0), 4.0);
    }
}
