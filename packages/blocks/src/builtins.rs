//! Builtin block library.
//!
//! These are the stock blocks every canvas starts with. Each definition
//! bundles its template, property schema and the type-level style rules
//! the stylesheet compiler emits once per distinct type in use.

use crate::registry::{BlockType, StyleRule};
use crate::schema::{Constraints, PropertyDef, PropertyKind, PropertySchema};
use crate::template::TemplateNode;

pub fn builtin_block_types() -> Vec<BlockType> {
    vec![header(), hero(), grid(), cta(), footer()]
}

fn header() -> BlockType {
    let nav_item = |label: &str| {
        TemplateNode::element("li").child(
            TemplateNode::element("a")
                .attr("href", "#")
                .child(TemplateNode::text(label)),
        )
    };

    BlockType {
        type_name: "header".to_string(),
        name: "Header".to_string(),
        icon: Some("header-icon.svg".to_string()),
        template: TemplateNode::element("header")
            .class("pagecraft-header")
            .child(
                TemplateNode::element("div")
                    .class("pagecraft-logo")
                    .child(TemplateNode::slot("logoText", "Logo")),
            )
            .child(
                TemplateNode::element("nav").class("pagecraft-nav").child(
                    TemplateNode::element("ul")
                        .child(nav_item("Home"))
                        .child(nav_item("About"))
                        .child(nav_item("Services"))
                        .child(nav_item("Contact")),
                ),
            ),
        schema: PropertySchema::new()
            .with(PropertyDef::new(
                "backgroundColor",
                PropertyKind::Color,
                "#ffffff",
            ))
            .with(PropertyDef::new("textColor", PropertyKind::Color, "#333333"))
            .with(PropertyDef::new("logoText", PropertyKind::Text, "Logo"))
            .with(PropertyDef::new("fixed", PropertyKind::Boolean, false)),
        styles: vec![
            StyleRule::new(
                ".pagecraft-header",
                &[
                    ("display", "flex"),
                    ("justify-content", "space-between"),
                    ("align-items", "center"),
                    ("padding", "1rem 2rem"),
                    ("background-color", "#ffffff"),
                    ("box-shadow", "0 2px 5px rgba(0,0,0,0.1)"),
                ],
            ),
            StyleRule::new(
                ".pagecraft-logo",
                &[("font-size", "1.5rem"), ("font-weight", "bold")],
            ),
            StyleRule::new(
                ".pagecraft-nav ul",
                &[("display", "flex"), ("list-style", "none")],
            ),
            StyleRule::new(".pagecraft-nav li", &[("margin-left", "1rem")]),
            StyleRule::new(
                ".pagecraft-nav a",
                &[("text-decoration", "none"), ("color", "inherit")],
            ),
        ],
    }
}

fn hero() -> BlockType {
    BlockType {
        type_name: "hero".to_string(),
        name: "Hero Section".to_string(),
        icon: Some("hero-icon.svg".to_string()),
        template: TemplateNode::element("section")
            .class("pagecraft-hero")
            .child(
                TemplateNode::element("h1")
                    .child(TemplateNode::slot("heading", "Welcome to Our Website")),
            )
            .child(TemplateNode::element("p").child(TemplateNode::slot(
                "subheading",
                "This is a hero section with a powerful call to action",
            )))
            .child(
                TemplateNode::element("button")
                    .class("pagecraft-button")
                    .child(TemplateNode::slot("buttonText", "Learn More")),
            ),
        schema: PropertySchema::new()
            .with(PropertyDef::new(
                "heading",
                PropertyKind::Text,
                "Welcome to Our Website",
            ))
            .with(PropertyDef::new(
                "subheading",
                PropertyKind::Textarea,
                "This is a hero section with a powerful call to action",
            ))
            .with(PropertyDef::new(
                "buttonText",
                PropertyKind::Text,
                "Learn More",
            ))
            .with(PropertyDef::new("backgroundImage", PropertyKind::Image, ""))
            .with(PropertyDef::new("textColor", PropertyKind::Color, "#ffffff")),
        styles: vec![
            StyleRule::new(
                ".pagecraft-hero",
                &[
                    ("padding", "4rem 2rem"),
                    ("text-align", "center"),
                    ("background-color", "#f5f5f5"),
                ],
            ),
            StyleRule::new(
                ".pagecraft-hero h1",
                &[("font-size", "2.5rem"), ("margin-bottom", "1rem")],
            ),
            StyleRule::new(
                ".pagecraft-hero p",
                &[
                    ("font-size", "1.2rem"),
                    ("margin-bottom", "2rem"),
                    ("max-width", "800px"),
                    ("margin-left", "auto"),
                    ("margin-right", "auto"),
                ],
            ),
            button_rule(),
        ],
    }
}

fn grid() -> BlockType {
    BlockType {
        type_name: "grid".to_string(),
        name: "Content Grid".to_string(),
        icon: Some("grid-icon.svg".to_string()),
        template: TemplateNode::element("div").class("pagecraft-grid").child(
            TemplateNode::repeat(
                "columns",
                TemplateNode::element("div")
                    .class("pagecraft-grid-item")
                    .child(TemplateNode::text("Column "))
                    .child(TemplateNode::Index),
            ),
        ),
        schema: PropertySchema::new()
            .with(
                PropertyDef::new("columns", PropertyKind::Number, 3.0)
                    .with_constraints(Constraints::range(1.0, 6.0)),
            )
            .with(
                PropertyDef::new("columnGap", PropertyKind::Range, 20.0)
                    .with_constraints(Constraints::range_with_unit(0.0, 50.0, "px")),
            )
            .with(
                PropertyDef::new("rowGap", PropertyKind::Range, 20.0)
                    .with_constraints(Constraints::range_with_unit(0.0, 50.0, "px")),
            ),
        styles: vec![
            StyleRule::new(
                ".pagecraft-grid",
                &[
                    ("display", "grid"),
                    ("grid-template-columns", "repeat(3, 1fr)"),
                    ("gap", "20px"),
                    ("padding", "2rem"),
                ],
            ),
            StyleRule::new(
                ".pagecraft-grid-item",
                &[
                    ("padding", "2rem"),
                    ("background-color", "#f9f9f9"),
                    ("border-radius", "4px"),
                    ("text-align", "center"),
                ],
            ),
        ],
    }
}

fn cta() -> BlockType {
    BlockType {
        type_name: "cta".to_string(),
        name: "Call to Action".to_string(),
        icon: Some("cta-icon.svg".to_string()),
        template: TemplateNode::element("section")
            .class("pagecraft-cta")
            .child(
                TemplateNode::element("h2")
                    .child(TemplateNode::slot("heading", "Ready to get started?")),
            )
            .child(
                TemplateNode::element("button")
                    .class("pagecraft-button")
                    .child(TemplateNode::slot("buttonText", "Get Started")),
            ),
        schema: PropertySchema::new()
            .with(PropertyDef::new(
                "heading",
                PropertyKind::Text,
                "Ready to get started?",
            ))
            .with(PropertyDef::new(
                "buttonText",
                PropertyKind::Text,
                "Get Started",
            ))
            .with(PropertyDef::new(
                "backgroundColor",
                PropertyKind::Color,
                "#4a90e2",
            ))
            .with(PropertyDef::new("textColor", PropertyKind::Color, "#ffffff")),
        styles: vec![
            StyleRule::new(
                ".pagecraft-cta",
                &[
                    ("padding", "3rem 2rem"),
                    ("text-align", "center"),
                    ("background-color", "#4a90e2"),
                    ("color", "#ffffff"),
                ],
            ),
            StyleRule::new(
                ".pagecraft-cta h2",
                &[("font-size", "2rem"), ("margin-bottom", "1.5rem")],
            ),
            button_rule(),
        ],
    }
}

fn footer() -> BlockType {
    BlockType {
        type_name: "footer".to_string(),
        name: "Footer".to_string(),
        icon: Some("footer-icon.svg".to_string()),
        template: TemplateNode::element("footer")
            .class("pagecraft-footer")
            .child(
                TemplateNode::element("p")
                    .class("pagecraft-footer-copy")
                    .child(TemplateNode::slot("copyright", "Built with Pagecraft")),
            ),
        schema: PropertySchema::new()
            .with(PropertyDef::new(
                "copyright",
                PropertyKind::Text,
                "Built with Pagecraft",
            ))
            .with(PropertyDef::new(
                "backgroundColor",
                PropertyKind::Color,
                "#333333",
            ))
            .with(PropertyDef::new("textColor", PropertyKind::Color, "#ffffff")),
        styles: vec![StyleRule::new(
            ".pagecraft-footer",
            &[
                ("padding", "2rem"),
                ("text-align", "center"),
                ("background-color", "#333333"),
                ("color", "#ffffff"),
            ],
        )],
    }
}

// Shared by every block that renders a .pagecraft-button. The stylesheet
// compiler deduplicates identical selectors across types.
fn button_rule() -> StyleRule {
    StyleRule::new(
        ".pagecraft-button",
        &[
            ("padding", "0.75rem 1.5rem"),
            ("background-color", "#4a90e2"),
            ("color", "white"),
            ("border", "none"),
            ("border-radius", "4px"),
            ("font-size", "1rem"),
            ("cursor", "pointer"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_slot_is_declared() {
        for block in builtin_block_types() {
            for property in block.template.bound_properties() {
                assert!(
                    block.schema.contains_key(&property),
                    "{} template references undeclared '{}'",
                    block.type_name,
                    property
                );
            }
        }
    }

    #[test]
    fn test_builtin_defaults_are_complete() {
        for block in builtin_block_types() {
            let defaults = block.schema.defaults();
            assert_eq!(defaults.len(), block.schema.len());
        }
    }
}
