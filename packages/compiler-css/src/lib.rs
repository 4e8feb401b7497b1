//! Stylesheet half of the page compiler.
//!
//! The output is a static, registry-independent base (reset + canvas
//! chrome) concatenated with one rule block per distinct block type
//! actually present in the instance list. Deduplication is by type, not
//! per instance: five heroes still produce a single hero block. Identical
//! selectors shared between types (the stock button rule) are emitted
//! once as well.
//!
//! Compilation is a pure function of its inputs — same registry and
//! instance list, byte-identical stylesheet.

use pagecraft_blocks::{BlockInstance, Registry, StyleRule};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Registry-independent base: reset, page chrome, and the block wrapper
/// rule shared by every compiled instance.
pub const BASE_STYLESHEET: &str = "\
* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
  line-height: 1.6;
}

.pagecraft-page {
  position: relative;
  width: 100%;
  min-height: 100vh;
}

.pagecraft-block {
  width: 100%;
}
";

/// A stylesheet under construction: an ordered list of rule blocks.
#[derive(Debug, Clone, Default)]
pub struct StylesheetDoc {
    sections: Vec<StylesheetSection>,
}

#[derive(Debug, Clone)]
struct StylesheetSection {
    comment: Option<String>,
    rules: Vec<StyleRule>,
}

impl StylesheetDoc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_section(&mut self, comment: Option<String>, rules: Vec<StyleRule>) {
        self.sections.push(StylesheetSection { comment, rules });
    }

    /// Render to CSS text. Declaration order is the declaration order the
    /// rules carry, so output is byte-stable.
    pub fn to_css(&self) -> String {
        let mut css = String::from(BASE_STYLESHEET);

        for section in &self.sections {
            css.push('\n');
            if let Some(comment) = &section.comment {
                css.push_str(&format!("/* {} */\n", comment));
            }
            for rule in &section.rules {
                css.push_str(&rule.selector);
                css.push_str(" {\n");
                for (key, value) in &rule.declarations {
                    css.push_str("  ");
                    css.push_str(key);
                    css.push_str(": ");
                    css.push_str(value);
                    css.push_str(";\n");
                }
                css.push_str("}\n");
            }
        }

        css
    }
}

/// Compile the stylesheet for an instance list.
///
/// Unresolvable block types contribute nothing here; the markup pass is
/// responsible for reporting them.
#[instrument(skip_all, fields(instances = instances.len()))]
pub fn compile_stylesheet(registry: &Registry, instances: &[BlockInstance]) -> String {
    let mut doc = StylesheetDoc::new();
    let mut seen_types: HashSet<&str> = HashSet::new();
    let mut seen_selectors: HashSet<&str> = HashSet::new();

    for instance in instances {
        if !seen_types.insert(instance.type_name.as_str()) {
            continue;
        }

        let Some(block) = registry.get(&instance.type_name) else {
            debug!(block_type = %instance.type_name, "skipping styles for unresolved type");
            continue;
        };

        let rules: Vec<StyleRule> = block
            .styles
            .iter()
            .filter(|rule| seen_selectors.insert(rule.selector.as_str()))
            .cloned()
            .collect();

        if !rules.is_empty() {
            debug!(block_type = %block.type_name, rules = rules.len(), "emitting type styles");
            doc.add_section(Some(format!("block: {}", block.type_name)), rules);
        }
    }

    doc.to_css()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_blocks::{BlockInstance, Position, Registry};
    use pretty_assertions::assert_eq;

    fn instance(id: &str, type_name: &str) -> BlockInstance {
        BlockInstance {
            id: id.to_string(),
            type_name: type_name.to_string(),
            properties: Default::default(),
            position: Position::auto(),
        }
    }

    #[test]
    fn test_one_rule_block_per_distinct_type() {
        let registry = Registry::with_builtins();
        let instances = vec![
            instance("a-1", "hero"),
            instance("a-2", "hero"),
            instance("a-3", "hero"),
            instance("a-4", "hero"),
            instance("a-5", "hero"),
        ];

        let css = compile_stylesheet(&registry, &instances);
        assert_eq!(css.matches("/* block: hero */").count(), 1);
        assert_eq!(css.matches(".pagecraft-hero {").count(), 1);
    }

    #[test]
    fn test_shared_selectors_are_emitted_once() {
        let registry = Registry::with_builtins();
        // hero and cta both carry the stock button rule.
        let instances = vec![instance("a-1", "hero"), instance("a-2", "cta")];

        let css = compile_stylesheet(&registry, &instances);
        assert_eq!(css.matches(".pagecraft-button {").count(), 1);
    }

    #[test]
    fn test_unknown_types_contribute_nothing() {
        let registry = Registry::with_builtins();
        let instances = vec![instance("a-1", "marquee")];

        let css = compile_stylesheet(&registry, &instances);
        assert_eq!(css, BASE_STYLESHEET);
    }

    #[test]
    fn test_deterministic_output() {
        let registry = Registry::with_builtins();
        let instances = vec![
            instance("a-1", "header"),
            instance("a-2", "hero"),
            instance("a-3", "grid"),
        ];

        let first = compile_stylesheet(&registry, &instances);
        let second = compile_stylesheet(&registry, &instances);
        assert_eq!(first, second);
    }

    #[test]
    fn test_base_always_present() {
        let registry = Registry::with_builtins();
        let css = compile_stylesheet(&registry, &[]);
        assert!(css.contains("box-sizing: border-box"));
        assert!(css.contains(".pagecraft-page"));
    }
}
