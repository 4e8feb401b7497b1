use pagecraft_common::value::format_number;
use pagecraft_common::PropertyValue;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// One edge of an instance's position box: either the `"auto"` sentinel
/// (normal document flow) or a concrete pixel length.
///
/// The wire format is a string, `"auto"` or `"<n>px"`. Deserialization
/// also tolerates bare numbers and unitless number strings, which older
/// documents carry; serialization is always canonical.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Offset {
    #[default]
    Auto,
    Px(f64),
}

impl Offset {
    pub fn is_auto(&self) -> bool {
        matches!(self, Offset::Auto)
    }

    pub fn px(&self) -> Option<f64> {
        match self {
            Offset::Auto => None,
            Offset::Px(v) => Some(*v),
        }
    }

    /// CSS rendering: `auto` or `<n>px`.
    pub fn to_css(&self) -> String {
        match self {
            Offset::Auto => "auto".to_string(),
            Offset::Px(v) => format!("{}px", format_number(*v)),
        }
    }
}

impl Serialize for Offset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Offset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OffsetVisitor;

        impl<'de> de::Visitor<'de> for OffsetVisitor {
            type Value = Offset;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("\"auto\", \"<n>px\", or a number")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Offset, E> {
                Ok(Offset::Px(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Offset, E> {
                Ok(Offset::Px(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Offset, E> {
                Ok(Offset::Px(v as f64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Offset, E> {
                let v = v.trim();
                if v.is_empty() || v == "auto" {
                    return Ok(Offset::Auto);
                }
                let numeric = v.strip_suffix("px").unwrap_or(v).trim();
                numeric
                    .parse::<f64>()
                    .map(Offset::Px)
                    .map_err(|_| E::custom(format!("invalid offset: {v:?}")))
            }
        }

        deserializer.deserialize_any(OffsetVisitor)
    }
}

/// Placement of an instance on the canvas.
///
/// An instance is absolutely positioned iff `top` or `left` is a concrete
/// length; otherwise it participates in normal document flow at full
/// width. `width`/`height` apply whenever concrete, in either mode.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub top: Offset,

    #[serde(default)]
    pub left: Offset,

    #[serde(default)]
    pub width: Offset,

    #[serde(default)]
    pub height: Offset,
}

impl Position {
    /// All-auto: normal document flow.
    pub fn auto() -> Self {
        Self::default()
    }

    /// Absolute placement at the given canvas-relative coordinates.
    pub fn at(top: f64, left: f64) -> Self {
        Self {
            top: Offset::Px(top),
            left: Offset::Px(left),
            width: Offset::Auto,
            height: Offset::Auto,
        }
    }

    pub fn is_free(&self) -> bool {
        !self.top.is_auto() || !self.left.is_auto()
    }
}

/// One placed, configured block on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInstance {
    /// Unique within the session; assigned at creation, never reused.
    pub id: String,

    /// Key into the block type registry.
    #[serde(rename = "type")]
    pub type_name: String,

    /// Current property values. Every key declared by the owning type's
    /// schema is present (explicit value or schema default), so nothing is
    /// undefined at compile time. BTreeMap keeps iteration deterministic.
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,

    #[serde(default)]
    pub position: Position,
}

impl BlockInstance {
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}
