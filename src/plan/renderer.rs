//! Renderers for parsed plan output
//!
//! This module provides ASCII (terminal) and HTML renderers for displaying
//! a parsed plan in a formatted, color-coded manner. Renderers only consume
//! the parsed structure; they never look back at the raw text.

use owo_colors::OwoColorize;

use super::types::{AttrValue, Attribute, Block, Plan, Resource, ResourceAction};

/// Options for plan rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Show attributes that carried no change symbol of their own
    pub show_unchanged: bool,

    /// Use compact output (no extra spacing between resources)
    pub compact_mode: bool,

    /// Maximum width for values before truncation
    pub max_value_width: usize,

    /// Apply terminal colors
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_unchanged: false,
            compact_mode: false,
            max_value_width: 60,
            color: false,
        }
    }
}

/// Trait for plan renderers
pub trait PlanRenderer {
    /// Render the parsed plan to a string
    fn render(&self, plan: &Plan, options: &RenderOptions) -> String;
}

/// ASCII renderer for terminal output
pub struct AsciiRenderer;

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render summary section
    fn render_summary(&self, plan: &Plan) -> String {
        let summary = plan.summary();
        let mut output = String::new();

        output.push_str("Plan Summary:\n");

        let mut parts = Vec::new();

        if summary.create > 0 {
            parts.push(format!("+{} to add", summary.create));
        }

        if summary.update > 0 {
            parts.push(format!("~{} to change", summary.update));
        }

        if summary.replace > 0 {
            parts.push(format!("±{} to replace", summary.replace));
        }

        if summary.delete > 0 {
            parts.push(format!("-{} to destroy", summary.delete));
        }

        if summary.has_changes() {
            output.push_str(&format!("  {}\n", parts.join(", ")));
        } else {
            output.push_str("  No changes.\n");
        }

        output.push('\n');
        output
    }

    /// Render a single resource with its attributes and blocks
    fn render_resource(&self, resource: &Resource, options: &RenderOptions) -> String {
        let mut output = String::new();

        let symbol = resource.action.symbol();
        let label = resource.action.label();
        let header = format!("{} {} ({})", symbol, resource.display_name, label);

        if options.color {
            let (r, g, b) = resource.action.color();
            output.push_str(&format!("{}\n", header.truecolor(r, g, b).bold()));
        } else {
            output.push_str(&header);
            output.push('\n');
        }

        for attr in &resource.attributes {
            output.push_str(&self.render_attribute(attr, symbol, 1, options));
        }

        for block in &resource.blocks {
            output.push_str(&self.render_block(block, symbol, 1, options));
        }

        if !options.compact_mode {
            output.push('\n');
        }

        output
    }

    /// Render a block and its children, indented one level per depth
    fn render_block(
        &self,
        block: &Block,
        inherited_symbol: &str,
        depth: usize,
        options: &RenderOptions,
    ) -> String {
        let mut output = String::new();
        let pad = "    ".repeat(depth);

        let symbol = if block.action.is_none() {
            inherited_symbol
        } else {
            block.action.as_str()
        };

        output.push_str(&format!("{}{} {} {{", pad, symbol, block.name));

        if block.is_sensitive == Some(true) {
            output.push_str(" # sensitive");
        }

        output.push('\n');

        for attr in &block.attributes {
            output.push_str(&self.render_attribute(attr, symbol, depth + 1, options));
        }

        for child in &block.blocks {
            output.push_str(&self.render_block(child, symbol, depth + 1, options));
        }

        output.push_str(&format!("{}}}\n", pad));
        output
    }

    /// Render a single attribute line (or lines, for array values)
    fn render_attribute(
        &self,
        attr: &Attribute,
        inherited_symbol: &str,
        depth: usize,
        options: &RenderOptions,
    ) -> String {
        // An empty symbol defers to the enclosing context for display only
        if attr.action.is_none() && !options.show_unchanged {
            return String::new();
        }

        let pad = "    ".repeat(depth);
        let symbol = if attr.action.is_none() {
            inherited_symbol
        } else {
            attr.action.as_str()
        };

        let mut output = String::new();

        match &attr.value {
            AttrValue::Items(items) => {
                output.push_str(&format!("{}{} {} = [\n", pad, symbol, attr.key));
                for item in items {
                    output.push_str(&format!("{}    {},\n", pad, item));
                }
                output.push_str(&format!("{}  ]\n", pad));
            }
            AttrValue::Change { from, to } => {
                if let AttrValue::Items(items) = from.as_ref() {
                    output.push_str(&format!("{}{} {} = [\n", pad, symbol, attr.key));
                    for item in items {
                        output.push_str(&format!("{}    {},\n", pad, item));
                    }
                    output.push_str(&format!(
                        "{}  ] -> {}\n",
                        pad,
                        self.format_value(to, options)
                    ));
                } else {
                    output.push_str(&format!(
                        "{}{} {} = {} -> {}\n",
                        pad,
                        symbol,
                        attr.key,
                        self.format_value(from, options),
                        self.format_value(to, options)
                    ));
                }
            }
            value => {
                output.push_str(&format!(
                    "{}{} {} = {}\n",
                    pad,
                    symbol,
                    attr.key,
                    self.format_value(value, options)
                ));
            }
        }

        output
    }

    /// Format a scalar value for display
    fn format_value(&self, value: &AttrValue, options: &RenderOptions) -> String {
        match value {
            AttrValue::Null => "null".to_string(),
            AttrValue::Bool(b) => b.to_string(),
            AttrValue::Number(n) => format_number(*n),
            AttrValue::Items(items) => format!("[{} items]", items.len()),
            AttrValue::Change { from, to } => format!(
                "{} -> {}",
                self.format_value(from, options),
                self.format_value(to, options)
            ),
            AttrValue::String(s) => {
                // Sentinels and markers stay unquoted and untruncated
                if value.is_computed() || s.starts_with('(') {
                    return s.to_string();
                }

                // Truncate long values on char boundaries, not bytes
                if s.chars().count() > options.max_value_width {
                    let truncated: String = s
                        .chars()
                        .take(options.max_value_width.saturating_sub(3))
                        .collect();
                    return format!("\"{}...\"", truncated);
                }

                format!("\"{}\"", s)
            }
        }
    }
}

impl PlanRenderer for AsciiRenderer {
    fn render(&self, plan: &Plan, options: &RenderOptions) -> String {
        let mut output = String::new();

        output.push_str(&self.render_summary(plan));

        for resource in &plan.resource_changes {
            output.push_str(&self.render_resource(resource, options));
        }

        output
    }
}

/// Format a number without a trailing `.0` for integral values
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// HTML renderer for file export
pub struct HtmlRenderer;

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Generate CSS styles
    fn generate_styles(&self) -> &'static str {
        r#"
<style>
    body {
        font-family: 'Monaco', 'Menlo', 'Ubuntu Mono', monospace;
        background-color: #1e1e1e;
        color: #d4d4d4;
        padding: 20px;
        line-height: 1.5;
    }
    .summary {
        background-color: #2d2d2d;
        padding: 15px;
        border-radius: 5px;
        margin-bottom: 20px;
    }
    .summary h2 {
        margin: 0 0 10px 0;
        color: #ffffff;
    }
    .summary-item {
        display: inline-block;
        margin-right: 20px;
        padding: 5px 10px;
        border-radius: 3px;
    }
    .resource {
        background-color: #2d2d2d;
        padding: 15px;
        border-radius: 5px;
        margin-bottom: 15px;
        border-left: 4px solid;
    }
    .resource.create { border-left-color: rgb(152, 225, 152); }
    .resource.update { border-left-color: rgb(255, 230, 160); }
    .resource.delete { border-left-color: rgb(255, 160, 160); }
    .resource.replace { border-left-color: rgb(181, 174, 254); }
    .resource-header {
        font-weight: bold;
        margin-bottom: 10px;
    }
    .attribute { margin-left: 20px; }
    .block { margin-left: 20px; margin-top: 5px; }
    .block-header { color: #9cdcfe; }
    .sensitive { color: rgb(255, 160, 160); font-style: italic; }
    .create-line { color: rgb(152, 225, 152); }
    .update-line { color: rgb(255, 230, 160); }
    .delete-line { color: rgb(255, 160, 160); }
</style>
"#
    }

    fn action_class(action: ResourceAction) -> &'static str {
        match action {
            ResourceAction::Create => "create",
            ResourceAction::Update => "update",
            ResourceAction::Delete => "delete",
            ResourceAction::Replace => "replace",
        }
    }

    fn render_summary(&self, plan: &Plan) -> String {
        let summary = plan.summary();

        format!(
            r#"<div class="summary">
<h2>Plan Summary</h2>
<span class="summary-item create-line">+{} to add</span>
<span class="summary-item update-line">~{} to change</span>
<span class="summary-item delete-line">-{} to destroy</span>
<span class="summary-item">±{} to replace</span>
</div>
"#,
            summary.create, summary.update, summary.delete, summary.replace
        )
    }

    fn render_attribute(&self, attr: &Attribute, options: &RenderOptions) -> String {
        let ascii = AsciiRenderer::new();
        let text = ascii.render_attribute(attr, "", 0, options);

        if text.is_empty() {
            return String::new();
        }

        let mut html = String::new();
        for line in text.lines() {
            html.push_str(&format!(
                "<div class=\"attribute\">{}</div>\n",
                escape_html(line)
            ));
        }
        html
    }

    fn render_block(&self, block: &Block, options: &RenderOptions) -> String {
        let mut html = String::new();

        html.push_str("<div class=\"block\">\n");
        html.push_str(&format!(
            "<div class=\"block-header\">{} {{</div>\n",
            escape_html(&block.name)
        ));

        if block.is_sensitive == Some(true) {
            html.push_str("<div class=\"sensitive\">(sensitive content hidden)</div>\n");
        }

        for attr in &block.attributes {
            html.push_str(&self.render_attribute(attr, options));
        }

        for child in &block.blocks {
            html.push_str(&self.render_block(child, options));
        }

        html.push_str("<div class=\"block-header\">}</div>\n</div>\n");
        html
    }
}

impl PlanRenderer for HtmlRenderer {
    fn render(&self, plan: &Plan, options: &RenderOptions) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<title>Plan Diff</title>\n");
        html.push_str(self.generate_styles());
        html.push_str("</head>\n<body>\n");

        html.push_str(&self.render_summary(plan));

        for resource in &plan.resource_changes {
            html.push_str(&format!(
                "<div class=\"resource {}\">\n",
                Self::action_class(resource.action)
            ));
            html.push_str(&format!(
                "<div class=\"resource-header\">{} {} ({})</div>\n",
                escape_html(resource.action.symbol()),
                escape_html(&resource.display_name),
                resource.action.label()
            ));

            for attr in &resource.attributes {
                html.push_str(&self.render_attribute(attr, options));
            }

            for block in &resource.blocks {
                html.push_str(&self.render_block(block, options));
            }

            html.push_str("</div>\n");
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

/// Escape HTML special characters
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
