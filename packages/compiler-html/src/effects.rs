//! Semantic property dispatch.
//!
//! During compilation each property is looked up here by its *name* (not
//! its kind). The matching effect decides how the value lands in markup:
//! an inline style on the block wrapper, a style on the template root, or
//! the sticky-positioning toggle. Properties without an entry and without
//! a template slot binding become data attributes.

use pagecraft_common::value::format_number;
use pagecraft_common::PropertyValue;
use std::collections::HashMap;

/// How a semantic property is applied to compiled markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyEffect {
    /// Inline style on the block wrapper, value used verbatim.
    WrapperStyle(&'static str),

    /// `background-image: url(..)` plus cover sizing on the wrapper;
    /// empty values emit nothing.
    BackgroundImage,

    /// Grid track count on the template root:
    /// `grid-template-columns: repeat(N, 1fr)`.
    GridTracks,

    /// Pixel-unit style on the template root (`column-gap`, `row-gap`).
    RootStylePx(&'static str),

    /// Truthy values pin the wrapper (`position: sticky; top: 0`).
    Sticky,
}

/// The dispatch table, registered once and shared by every compile pass.
#[derive(Debug, Clone)]
pub struct EffectTable {
    entries: HashMap<&'static str, PropertyEffect>,
}

impl EffectTable {
    /// The stock table covering the semantic property vocabulary of the
    /// builtin block library.
    pub fn standard() -> Self {
        let mut entries = HashMap::new();
        entries.insert("backgroundColor", PropertyEffect::WrapperStyle("background-color"));
        entries.insert("textColor", PropertyEffect::WrapperStyle("color"));
        entries.insert("backgroundImage", PropertyEffect::BackgroundImage);
        entries.insert("columns", PropertyEffect::GridTracks);
        entries.insert("columnGap", PropertyEffect::RootStylePx("column-gap"));
        entries.insert("rowGap", PropertyEffect::RootStylePx("row-gap"));
        entries.insert("fixed", PropertyEffect::Sticky);
        Self { entries }
    }

    /// Extend the vocabulary with a custom entry. Keys are semantic
    /// property names shared across block types.
    pub fn register(&mut self, key: &'static str, effect: PropertyEffect) {
        self.entries.insert(key, effect);
    }

    pub fn get(&self, key: &str) -> Option<PropertyEffect> {
        self.entries.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl Default for EffectTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Styles an effect contributes, split by target.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AppliedStyles {
    pub wrapper: Vec<(String, String)>,
    pub root: Vec<(String, String)>,
}

impl PropertyEffect {
    /// Resolve this effect against a concrete value.
    pub fn apply(&self, value: &PropertyValue, out: &mut AppliedStyles) {
        match self {
            PropertyEffect::WrapperStyle(css_prop) => {
                out.wrapper
                    .push((css_prop.to_string(), value.as_display()));
            }
            PropertyEffect::BackgroundImage => {
                let url = value.as_display();
                if !url.is_empty() {
                    out.wrapper
                        .push(("background-image".to_string(), format!("url({url})")));
                    out.wrapper
                        .push(("background-size".to_string(), "cover".to_string()));
                    out.wrapper
                        .push(("background-position".to_string(), "center".to_string()));
                }
            }
            PropertyEffect::GridTracks => {
                if let Some(n) = value.as_number() {
                    let count = n.max(0.0) as usize;
                    out.root.push((
                        "grid-template-columns".to_string(),
                        format!("repeat({count}, 1fr)"),
                    ));
                }
            }
            PropertyEffect::RootStylePx(css_prop) => {
                if let Some(n) = value.as_number() {
                    out.root
                        .push((css_prop.to_string(), format!("{}px", format_number(n))));
                }
            }
            PropertyEffect::Sticky => {
                if value.is_truthy() {
                    out.wrapper.push(("position".to_string(), "sticky".to_string()));
                    out.wrapper.push(("top".to_string(), "0".to_string()));
                    out.wrapper.push(("z-index".to_string(), "100".to_string()));
                }
            }
        }
    }
}
