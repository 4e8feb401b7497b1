use crate::effects::{AppliedStyles, EffectTable};
use pagecraft_blocks::{BlockInstance, BlockType, Registry, TemplateNode};
use pagecraft_common::escape_html;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Non-fatal problems collected during a compile pass. A warning never
/// aborts the document; the affected instance is skipped or degraded.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CompileWarning {
    #[error("instance '{instance_id}' references unknown block type '{type_name}'")]
    UnresolvedType {
        instance_id: String,
        type_name: String,
    },

    #[error("instance '{instance_id}' has non-numeric repeat count in '{property}'")]
    NonNumericRepeat {
        instance_id: String,
        property: String,
    },
}

/// Options for markup compilation.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print markup.
    pub pretty: bool,
    /// Indentation string.
    pub indent: String,
    /// Semantic property dispatch table.
    pub effects: EffectTable,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            effects: EffectTable::standard(),
        }
    }
}

struct Context {
    pretty: bool,
    indent: String,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: &CompileOptions) -> Self {
        Self {
            pretty: options.pretty,
            indent: options.indent.clone(),
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn into_output(self) -> String {
        self.buffer
    }
}

/// Compile the instance list to the page markup fragment.
///
/// Pure function of `(registry, instances, options)`: instances compile in
/// store order, broken type references are skipped with a warning, and
/// identical input yields byte-identical output.
#[instrument(skip_all, fields(instances = instances.len()))]
pub fn compile_markup(
    registry: &Registry,
    instances: &[BlockInstance],
    options: &CompileOptions,
) -> (String, Vec<CompileWarning>) {
    let mut ctx = Context::new(options);
    let mut warnings = Vec::new();

    ctx.add_line("<div class=\"pagecraft-page\">");
    ctx.indent();

    for instance in instances {
        match registry.get(&instance.type_name) {
            Some(block) => {
                compile_instance(block, instance, options, &mut ctx, &mut warnings);
            }
            None => {
                warn!(
                    instance_id = %instance.id,
                    block_type = %instance.type_name,
                    "skipping instance with unresolved block type"
                );
                warnings.push(CompileWarning::UnresolvedType {
                    instance_id: instance.id.clone(),
                    type_name: instance.type_name.clone(),
                });
            }
        }
    }

    ctx.dedent();
    ctx.add_line("</div>");

    debug!(warnings = warnings.len(), "markup compile complete");
    (ctx.into_output(), warnings)
}

fn compile_instance(
    block: &BlockType,
    instance: &BlockInstance,
    options: &CompileOptions,
    ctx: &mut Context,
    warnings: &mut Vec<CompileWarning>,
) {
    let mut styles = AppliedStyles::default();
    let mut data_attrs: Vec<(String, String)> = Vec::new();
    let bound = block.template.bound_properties();

    // Declared properties: dispatch through the effect table; anything
    // without an entry and without a template binding is preserved as a
    // data attribute.
    for def in block.schema.iter() {
        let value = instance.property(&def.key).unwrap_or(&def.default);
        if let Some(effect) = options.effects.get(&def.key) {
            effect.apply(value, &mut styles);
        } else if !bound.iter().any(|b| b == &def.key) {
            data_attrs.push((data_attr_name(&def.key), value.as_display()));
        }
    }

    // Undeclared properties carried by the instance (forward
    // compatibility): data attributes only. BTreeMap order keeps this
    // deterministic.
    for (key, value) in &instance.properties {
        if block.schema.contains_key(key) {
            continue;
        }
        data_attrs.push((data_attr_name(key), value.as_display()));
    }

    let mut wrapper_styles = position_styles(instance);
    wrapper_styles.extend(styles.wrapper.iter().cloned());

    let mut open = format!(
        "<div class=\"pagecraft-block\" data-id=\"{}\" data-type=\"{}\"",
        escape_html(&instance.id),
        escape_html(&instance.type_name)
    );
    if !wrapper_styles.is_empty() {
        open.push_str(&format!(" style=\"{}\"", style_attr(&wrapper_styles)));
    }
    for (name, value) in &data_attrs {
        open.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
    }
    open.push('>');

    ctx.add_line(&open);
    ctx.indent();

    let mut repeat_stack = Vec::new();
    render_node(
        &block.template,
        block,
        instance,
        Some(&styles.root),
        ctx,
        &mut repeat_stack,
        warnings,
    );

    ctx.dedent();
    ctx.add_line("</div>");
}

fn render_node(
    node: &TemplateNode,
    block: &BlockType,
    instance: &BlockInstance,
    root_styles: Option<&[(String, String)]>,
    ctx: &mut Context,
    repeat_stack: &mut Vec<usize>,
    warnings: &mut Vec<CompileWarning>,
) {
    match node {
        TemplateNode::Element {
            tag,
            classes,
            attributes,
            children,
        } => {
            let mut open = format!("<{}", tag);
            if !classes.is_empty() {
                open.push_str(&format!(" class=\"{}\"", classes.join(" ")));
            }
            for (name, value) in attributes {
                open.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
            }
            if let Some(root_styles) = root_styles {
                if !root_styles.is_empty() {
                    open.push_str(&format!(" style=\"{}\"", style_attr(root_styles)));
                }
            }

            if children.is_empty() && is_void_tag(tag) {
                open.push_str(" />");
                ctx.add_line(&open);
                return;
            }
            open.push('>');

            // Purely textual children render inline on one line.
            if children.iter().all(is_textual) {
                let mut line = open;
                for child in children {
                    line.push_str(&textual_content(child, instance, repeat_stack));
                }
                line.push_str(&format!("</{}>", tag));
                ctx.add_line(&line);
                return;
            }

            ctx.add_line(&open);
            ctx.indent();
            for child in children {
                render_node(child, block, instance, None, ctx, repeat_stack, warnings);
            }
            ctx.dedent();
            ctx.add_line(&format!("</{}>", tag));
        }

        TemplateNode::Text { .. } | TemplateNode::Slot { .. } | TemplateNode::Index => {
            ctx.add_line(&textual_content(node, instance, repeat_stack));
        }

        TemplateNode::Repeat { property, item } => {
            let value = instance
                .property(property)
                .cloned()
                .or_else(|| block.schema.get(property).map(|d| d.default.clone()));

            let count = match value.as_ref().and_then(|v| v.as_number()) {
                Some(n) => n.max(0.0) as usize,
                None => {
                    warnings.push(CompileWarning::NonNumericRepeat {
                        instance_id: instance.id.clone(),
                        property: property.clone(),
                    });
                    1
                }
            };

            for i in 1..=count {
                repeat_stack.push(i);
                render_node(item, block, instance, None, ctx, repeat_stack, warnings);
                repeat_stack.pop();
            }
        }
    }
}

fn is_textual(node: &TemplateNode) -> bool {
    matches!(
        node,
        TemplateNode::Text { .. } | TemplateNode::Slot { .. } | TemplateNode::Index
    )
}

fn textual_content(
    node: &TemplateNode,
    instance: &BlockInstance,
    repeat_stack: &[usize],
) -> String {
    match node {
        TemplateNode::Text { content } => escape_html(content),
        TemplateNode::Slot { property, fallback } => {
            let text = instance
                .property(property)
                .map(|v| v.as_display())
                .unwrap_or_else(|| fallback.clone());
            escape_html(&text)
        }
        TemplateNode::Index => repeat_stack
            .last()
            .map(|i| i.to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Wrapper styles derived from the instance's position. Free positioning
/// applies when top or left is a concrete length; otherwise the block
/// stays in document flow at full width.
fn position_styles(instance: &BlockInstance) -> Vec<(String, String)> {
    let pos = &instance.position;
    let mut styles = Vec::new();

    if pos.is_free() {
        styles.push(("position".to_string(), "absolute".to_string()));
        styles.push(("top".to_string(), pos.top.to_css()));
        styles.push(("left".to_string(), pos.left.to_css()));
        if let Some(w) = pos.width.px() {
            styles.push(("width".to_string(), format!("{}px", fmt_px(w))));
        }
        if let Some(h) = pos.height.px() {
            styles.push(("height".to_string(), format!("{}px", fmt_px(h))));
        }
    } else {
        if let Some(w) = pos.width.px() {
            styles.push(("width".to_string(), format!("{}px", fmt_px(w))));
        }
        if let Some(h) = pos.height.px() {
            styles.push(("height".to_string(), format!("{}px", fmt_px(h))));
        }
    }

    styles
}

fn fmt_px(v: f64) -> String {
    pagecraft_common::value::format_number(v)
}

fn style_attr(styles: &[(String, String)]) -> String {
    styles
        .iter()
        .map(|(k, v)| format!("{}: {}", k, v))
        .collect::<Vec<_>>()
        .join("; ")
}

/// camelCase property key → data attribute name (`backgroundColor` →
/// `data-background-color`).
fn data_attr_name(key: &str) -> String {
    let mut out = String::from("data-");
    for ch in key.chars() {
        if ch.is_uppercase() {
            out.push('-');
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "img" | "input" | "br" | "hr" | "meta" | "link" | "area" | "base" | "col" | "embed"
            | "param" | "source" | "track" | "wbr"
    )
}
