//! Plan output parser for OpenTofu/Terraform
//!
//! This module parses the text output from `tofu plan` or `terraform plan`
//! commands to extract structured resource, block, and attribute changes.
//! The input is a human-readable log, not a serialization format, so every
//! line is classified by a fixed priority order of patterns and anything
//! unrecognized is silently skipped.

use lazy_static::lazy_static;
use regex::Regex;

use super::types::{Attribute, AttrValue, Block, ChangeSymbol, Plan, Resource, ResourceAction};
use super::value;

/// Column threshold separating resource-level braces and symbols from
/// block-level ones
const RESOURCE_INDENT: usize = 6;

lazy_static! {
    /// Banner and noise lines dropped before any classifier runs
    static ref SKIP_PATTERNS: Vec<Regex> = [
        r"^$",
        r"^Terraform used",
        r"^Resource actions",
        r"^Terraform will perform",
        r"^Plan:",
        r"^Warning:",
        r"^Note:",
        r"unchanged attributes hidden",
        r"unchanged blocks hidden",
        r"Reading\.\.\.",
        r"Refreshing state\.\.\.",
        r"Read complete",
        r"can't guarantee to take exactly",
        r"^─────────",
        r"^##\[section\]",
        r"^##\[warning\]",
        r"^==============",
        r"^Task",
        r"^Description",
        r"^Version",
        r"^Author",
        r"^Help",
        r"^\[command\]",
        r"^Changes to Outputs:",
        r"^You can apply this plan",
        r"^To perform exactly these actions",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid skip pattern regex"))
    .collect();
}

/// Resource info recovered from a `# type.name[index] ...` comment line.
///
/// Advisory metadata only: it is consumed by the next declaration line and
/// discarded if none follows.
#[derive(Debug, Clone)]
#[allow(dead_code)]
struct PendingResourceInfo {
    resource_type: String,
    name: String,
    index: Option<String>,
    description: String,
}

/// Tokens captured from a resource declaration line
#[derive(Debug)]
struct Declaration {
    symbol: String,
    resource_type: String,
    name: String,
}

/// Accumulation state for a multi-line array value
#[derive(Debug)]
struct ArrayState {
    key: String,
    action: ChangeSymbol,
    items: Vec<String>,
    /// Running bracket/brace balance, so arrays containing nested object
    /// literals are not closed prematurely
    depth: i32,
}

/// Mutable scan state, owned exclusively by one `parse` call
#[derive(Default)]
struct ParseContext {
    resources: Vec<Resource>,
    current: Option<Resource>,
    block_stack: Vec<Block>,
    pending: Option<PendingResourceInfo>,
    array: Option<ArrayState>,
}

impl ParseContext {
    /// Append a completed attribute to the innermost open block, or to the
    /// current resource's attribute map (last write wins per key)
    fn append_attribute(&mut self, attribute: Attribute) {
        if let Some(block) = self.block_stack.last_mut() {
            block.attributes.push(attribute);
        } else if let Some(resource) = self.current.as_mut() {
            resource.insert_attribute(attribute);
        }
    }

    /// Flush the current resource into the result list
    fn flush_resource(&mut self) {
        if let Some(resource) = self.current.take() {
            self.resources.push(resource);
        }
        self.block_stack.clear();
        self.array = None;
    }

    fn finish(mut self) -> Plan {
        self.flush_resource();
        Plan {
            resource_changes: self.resources,
        }
    }
}

/// Parser for OpenTofu/Terraform plan output
pub struct PlanParser {
    timestamp_pattern: Regex,
    log_marker_pattern: Regex,
    comment_patterns: Vec<Regex>,
    declaration_patterns: Vec<Regex>,
    block_pattern: Regex,
    array_start_pattern: Regex,
    array_close_arrow_pattern: Regex,
    array_item_pattern: Regex,
    attribute_patterns: Vec<Regex>,
}

impl Default for PlanParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanParser {
    /// Create a new plan parser with compiled regex patterns
    pub fn new() -> Self {
        Self {
            // ISO-8601 timestamp prefixes from CI log capture
            timestamp_pattern: Regex::new(
                r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d+Z\s+",
            )
            .expect("Invalid timestamp pattern regex"),

            // Azure DevOps style log harness markers
            log_marker_pattern: Regex::new(r"^##\[(?:section|command)\]")
                .expect("Invalid log marker pattern regex"),

            // Match resource comment lines like:
            // # aws_instance.example will be created
            // # aws_instance.web[0] must be replaced
            comment_patterns: vec![
                Regex::new(r"^\s*#\s+([^.\s]+)\.([^.\s\[]+)(?:\[([^\]]+)\])?\s+(.+)$")
                    .expect("Invalid comment pattern regex"),
                Regex::new(r"^\s*#\s+([^.\s]+)\.([^.\s]+)\s+(.+)$")
                    .expect("Invalid comment pattern regex"),
            ],

            // Match resource declarations, quoted or bare tokens:
            // + resource "aws_instance" "example" {
            // -/+ resource aws_instance example {
            declaration_patterns: vec![
                Regex::new(r#"^\s*([+~-]|[-/+]+)\s*resource\s+"([^"]+)"\s+"([^"]+)"\s*\{?\s*$"#)
                    .expect("Invalid declaration pattern regex"),
                Regex::new(r"^\s*([+~-]|[-/+]+)\s*resource\s+([^\s]+)\s+([^\s{]+)\s*\{?\s*$")
                    .expect("Invalid declaration pattern regex"),
                Regex::new(r#"^\s*([+~-]|[-/+]+)\s+resource\s+"([^"]+)"\s+"([^"]+)"\s*\{?\s*$"#)
                    .expect("Invalid declaration pattern regex"),
            ],

            // Block opening: optional symbol, a name, trailing brace, no `=`
            block_pattern: Regex::new(r"^\s*([+~-]?)\s*([^{=]+?)\s*\{\s*$")
                .expect("Invalid block pattern regex"),

            // Multi-line array opening: `<sym> key = [` with nothing after
            array_start_pattern: Regex::new(r"^\s*([+~-]?)\s*([^=]+?)\s*=\s*\[\s*$")
                .expect("Invalid array start pattern regex"),

            // Array close carrying an arrow suffix: `] -> (known after apply)`
            array_close_arrow_pattern: Regex::new(r"^\]\s*->\s*.+$")
                .expect("Invalid array close pattern regex"),

            array_item_pattern: Regex::new(r"^\s*([+~-]?)\s*(.*)$")
                .expect("Invalid array item pattern regex"),

            // Attribute lines, bare or quoted key
            attribute_patterns: vec![
                Regex::new(r"^\s*([+~-]?)\s*([^=]+?)\s*=\s*(.+)$")
                    .expect("Invalid attribute pattern regex"),
                Regex::new(r#"^\s*([+~-]?)\s*"([^"]+)"\s*=\s*(.+)$"#)
                    .expect("Invalid attribute pattern regex"),
            ],
        }
    }

    /// Parse plan output into a structured [`Plan`].
    ///
    /// Pure and total: lines that fit no classifier are skipped, and zero
    /// parsed resources is a normal empty plan, not an error.
    pub fn parse(&self, output: &str) -> Plan {
        let cleaned = self.preprocess(output);
        let mut ctx = ParseContext::default();

        for line in cleaned.lines() {
            self.scan_line(&mut ctx, line);
        }

        ctx.finish()
    }

    /// Strip per-line timestamp and log-harness prefixes.
    ///
    /// Total: unrecognized prefixes are left untouched and nothing else is
    /// normalized.
    fn preprocess(&self, output: &str) -> String {
        output
            .lines()
            .map(|line| {
                let line = self.timestamp_pattern.replace(line, "");
                self.log_marker_pattern.replace(&line, "").into_owned()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Route one line through the classifiers, in fixed priority order
    fn scan_line(&self, ctx: &mut ParseContext, line: &str) {
        let trimmed = line.trim();

        if SKIP_PATTERNS.iter().any(|p| p.is_match(trimmed)) {
            return;
        }

        // Array mode is exclusive until its closing bracket is seen
        if ctx.array.is_some() {
            self.scan_array_line(ctx, line, trimmed);
            return;
        }

        if let Some(info) = self.parse_resource_comment(line) {
            ctx.pending = Some(info);
            return;
        }

        if let Some(declaration) = self.parse_resource_declaration(line) {
            self.begin_resource(ctx, declaration);
            return;
        }

        if ctx.current.is_none() {
            return;
        }

        if trimmed == "}" {
            self.close_brace(ctx, indent_of(line));
            return;
        }

        if let Some(caps) = self.block_pattern.captures(line) {
            let name = caps[2].trim();
            if !name.is_empty() {
                self.open_block(ctx, line, trimmed, &caps[1], name);
                return;
            }
        }

        // Sensitivity notice contributes no attribute, only the flag
        if trimmed.contains("At least one attribute in this block is")
            && trimmed.contains("sensitive")
        {
            if let Some(block) = ctx.block_stack.last_mut() {
                block.is_sensitive = Some(true);
            }
            return;
        }

        if let Some(caps) = self.array_start_pattern.captures(line) {
            ctx.array = Some(ArrayState {
                key: caps[2].trim().replace('"', ""),
                action: ChangeSymbol::from_symbol(&caps[1]),
                items: Vec::new(),
                depth: 0,
            });
            return;
        }

        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            if let Some(attribute) = self.parse_attribute(line) {
                ctx.append_attribute(attribute);
            }
        }
    }

    /// Recognize a `# type.name[index] description` comment line
    fn parse_resource_comment(&self, line: &str) -> Option<PendingResourceInfo> {
        for pattern in &self.comment_patterns {
            if let Some(caps) = pattern.captures(line) {
                let index = caps
                    .get(3)
                    .map(|m| m.as_str())
                    .filter(|s| !s.contains(' '))
                    .map(str::to_string);
                let description = caps
                    .get(4)
                    .or_else(|| caps.get(3))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();

                return Some(PendingResourceInfo {
                    resource_type: caps[1].to_string(),
                    name: caps[2].to_string(),
                    index,
                    description,
                });
            }
        }

        None
    }

    /// Recognize a `<sym> resource "<type>" "<name>" {` declaration line
    fn parse_resource_declaration(&self, line: &str) -> Option<Declaration> {
        for pattern in &self.declaration_patterns {
            if let Some(caps) = pattern.captures(line) {
                return Some(Declaration {
                    symbol: caps[1].to_string(),
                    resource_type: caps[2].to_string(),
                    name: caps[3].to_string(),
                });
            }
        }

        None
    }

    /// Open a new resource, flushing the one currently being assembled
    fn begin_resource(&self, ctx: &mut ParseContext, declaration: Declaration) {
        ctx.flush_resource();

        let action = ResourceAction::from_symbol(&declaration.symbol);
        let address = format!("{}.{}", declaration.resource_type, declaration.name);
        let index = ctx.pending.take().and_then(|info| info.index);

        // Indexed resources are disambiguated by the index; un-indexed ones
        // by a running ordinal, so duplicate addresses stay unique
        let (unique_id, display_name) = match &index {
            Some(idx) => (format!("{address}[{idx}]"), format!("{address}[{idx}]")),
            None => (format!("{address}_{}", ctx.resources.len()), address.clone()),
        };

        ctx.current = Some(Resource {
            address,
            display_name,
            unique_id,
            resource_type: declaration.resource_type,
            name: declaration.name,
            index,
            action,
            attributes: Vec::new(),
            blocks: Vec::new(),
        });
    }

    /// Handle a bare `}` line: close the resource at shallow indentation when
    /// no block is open, otherwise pop and flush the innermost block
    fn close_brace(&self, ctx: &mut ParseContext, indent: usize) {
        if ctx.block_stack.is_empty() {
            if indent <= RESOURCE_INDENT {
                ctx.flush_resource();
            }
            // A deeper stray brace with nothing open is noise
            return;
        }

        if let Some(block) = ctx.block_stack.pop() {
            if let Some(parent) = ctx.block_stack.last_mut() {
                parent.blocks.push(block);
            } else if let Some(resource) = ctx.current.as_mut() {
                resource.blocks.push(block);
            }
        }
    }

    /// Push a new block onto the ownership stack
    fn open_block(
        &self,
        ctx: &mut ParseContext,
        line: &str,
        trimmed: &str,
        symbol: &str,
        name: &str,
    ) {
        let indent = indent_of(line);

        // A block owns an action only when the symbol is attached to the
        // start of the line and the line sits deeper than the resource-level
        // indentation; a block merely nested inside a created/deleted
        // resource must not mark every descendant
        let mut action = ChangeSymbol::None;
        if !symbol.trim().is_empty()
            && trimmed.starts_with(symbol.trim())
            && indent > RESOURCE_INDENT
        {
            action = ChangeSymbol::from_symbol(symbol);
        }

        ctx.block_stack.push(Block::new(name, action, indent));
    }

    /// Handle one line while in array-accumulation mode
    fn scan_array_line(&self, ctx: &mut ParseContext, line: &str, trimmed: &str) {
        let depth = match ctx.array.as_ref() {
            Some(state) => state.depth + bracket_balance(line),
            None => return,
        };

        let closes = trimmed == "]" || self.array_close_arrow_pattern.is_match(trimmed);

        if closes && depth <= 0 {
            if let Some(state) = ctx.array.take() {
                // An arrow suffix turns the whole attribute into a
                // before/after change from the accumulated items to the
                // trailing text
                let attribute = if let Some((_, after)) = trimmed.split_once(" -> ") {
                    Attribute::with_change(
                        &state.key,
                        state.action,
                        AttrValue::Items(state.items),
                        AttrValue::String(after.trim().to_string()),
                    )
                } else {
                    Attribute::new(&state.key, AttrValue::Items(state.items), state.action)
                };

                ctx.append_attribute(attribute);
            }
            return;
        }

        if !trimmed.is_empty() && !trimmed.starts_with(']') && !trimmed.ends_with('}') {
            if let Some(caps) = self.array_item_pattern.captures(line) {
                let symbol = caps[1].to_string();
                let content = clean_array_item(caps[2].trim());

                // Bare brackets and braces are structure, not items
                if !content.is_empty() && !matches!(content.as_str(), "]" | "}" | "[" | "{") {
                    if let Some(state) = ctx.array.as_mut() {
                        // Keep the item's own change symbol so renderers can
                        // distinguish added and removed entries
                        if symbol.is_empty() {
                            state.items.push(content);
                        } else {
                            state.items.push(format!("{symbol} {content}"));
                        }
                    }
                }
            }
        }

        if let Some(state) = ctx.array.as_mut() {
            state.depth = depth;
        }
    }

    /// Parse a `<sym> key = value` attribute line
    fn parse_attribute(&self, line: &str) -> Option<Attribute> {
        for pattern in &self.attribute_patterns {
            if let Some(caps) = pattern.captures(line) {
                let action = ChangeSymbol::from_symbol(&caps[1]);
                let key = caps[2].trim().replace('"', "");
                let mut raw_value = caps[3].trim().to_string();

                if raw_value.ends_with(',') {
                    raw_value.pop();
                    raw_value.truncate(raw_value.trim_end().len());
                }

                return Some(value::build_attribute(&key, action, &raw_value));
            }
        }

        None
    }
}

/// Column of the first non-whitespace character
fn indent_of(line: &str) -> usize {
    line.chars()
        .position(|c| !c.is_whitespace())
        .unwrap_or(line.len())
}

/// Net bracket/brace balance of one line
fn bracket_balance(line: &str) -> i32 {
    let opens = line.matches('[').count() + line.matches('{').count();
    let closes = line.matches(']').count() + line.matches('}').count();
    opens as i32 - closes as i32
}

/// Strip a trailing comma and one pair of surrounding quotes from an array
/// item
fn clean_array_item(content: &str) -> String {
    if content.starts_with('"') && content.ends_with("\",") && content.len() >= 3 {
        content[1..content.len() - 2].to_string()
    } else if content.starts_with('"') && content.ends_with('"') && content.len() >= 2 {
        content[1..content.len() - 1].to_string()
    } else if let Some(stripped) = content.strip_suffix(',') {
        stripped.trim().to_string()
    } else {
        content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::super::sample::SAMPLE_PLAN;
    use super::*;
    use crate::plan::types::ValueChange;

    #[test]
    fn test_sample_plan_resource_order_and_actions() {
        let parser = PlanParser::new();
        let plan = parser.parse(SAMPLE_PLAN);

        assert_eq!(plan.resource_changes.len(), 4);

        let actions: Vec<ResourceAction> =
            plan.resource_changes.iter().map(|r| r.action).collect();
        assert_eq!(
            actions,
            vec![
                ResourceAction::Update,
                ResourceAction::Create,
                ResourceAction::Delete,
                ResourceAction::Replace,
            ]
        );

        let addresses: Vec<&str> = plan
            .resource_changes
            .iter()
            .map(|r| r.address.as_str())
            .collect();
        assert_eq!(
            addresses,
            vec![
                "azurerm_lb.test",
                "azurerm_resource_group.example",
                "azurerm_storage_account.old",
                "azurerm_virtual_machine.example",
            ]
        );
    }

    #[test]
    fn test_sample_plan_array_collapses_to_sentinel_change() {
        let parser = PlanParser::new();
        let plan = parser.parse(SAMPLE_PLAN);

        let lb = &plan.resource_changes[0];
        let rules = lb.attribute("load_balancer_rules").unwrap();

        assert_eq!(rules.action, ChangeSymbol::Update);

        let change = rules.change.as_ref().unwrap();
        match &change.from {
            AttrValue::Items(items) => {
                assert_eq!(items.len(), 2);
                assert!(items[0].starts_with("- /subscriptions/"));
                assert!(items[1].starts_with("- /subscriptions/"));
            }
            other => panic!("expected items, got {other:?}"),
        }
        assert_eq!(
            change.to,
            AttrValue::String("(known after apply)".to_string())
        );
    }

    #[test]
    fn test_sample_plan_create_attributes() {
        let parser = PlanParser::new();
        let plan = parser.parse(SAMPLE_PLAN);

        let group = &plan.resource_changes[1];
        assert_eq!(group.attributes.len(), 3);
        assert_eq!(
            group.attribute("location").unwrap().value,
            AttrValue::String("West Europe".to_string())
        );
        assert!(group.attribute("id").unwrap().value.is_computed());
    }

    #[test]
    fn test_sample_plan_delete_attributes() {
        let parser = PlanParser::new();
        let plan = parser.parse(SAMPLE_PLAN);

        let storage = &plan.resource_changes[2];
        assert_eq!(storage.action, ResourceAction::Delete);
        assert_eq!(storage.attributes.len(), 6);
        for attr in &storage.attributes {
            assert_eq!(attr.action, ChangeSymbol::Delete);
        }
    }

    #[test]
    fn test_sample_plan_replace_name_change() {
        let parser = PlanParser::new();
        let plan = parser.parse(SAMPLE_PLAN);

        let vm = &plan.resource_changes[3];
        assert_eq!(vm.action, ResourceAction::Replace);

        let name = vm.attribute("name").unwrap();
        assert_eq!(
            name.change,
            Some(ValueChange {
                from: AttrValue::String("old-vm-name".to_string()),
                to: AttrValue::String("new-vm-name".to_string()),
            })
        );

        // The unchanged attribute carries no symbol of its own
        let location = vm.attribute("location").unwrap();
        assert!(location.action.is_none());
        assert!(location.change.is_none());
    }

    #[test]
    fn test_unique_ids_for_duplicate_addresses() {
        let parser = PlanParser::new();
        let output = r#"
  # aws_instance.web will be created
  + resource "aws_instance" "web" {
      + ami = "ami-1"
    }

  # aws_instance.web will be created
  + resource "aws_instance" "web" {
      + ami = "ami-2"
    }
"#;

        let plan = parser.parse(output);
        assert_eq!(plan.resource_changes.len(), 2);
        assert_eq!(plan.resource_changes[0].unique_id, "aws_instance.web_0");
        assert_eq!(plan.resource_changes[1].unique_id, "aws_instance.web_1");
    }

    #[test]
    fn test_indexed_resource_display_name() {
        let parser = PlanParser::new();
        let output = r#"
  # aws_instance.web[2] will be created
  + resource "aws_instance" "web" {
      + ami = "ami-1"
    }
"#;

        let plan = parser.parse(output);
        let resource = &plan.resource_changes[0];

        assert_eq!(resource.index.as_deref(), Some("2"));
        assert_eq!(resource.display_name, "aws_instance.web[2]");
        assert_eq!(resource.unique_id, "aws_instance.web[2]");
        assert_eq!(resource.address, "aws_instance.web");
    }

    #[test]
    fn test_timestamp_and_log_marker_prefixes_stripped() {
        let parser = PlanParser::new();
        let output = "2024-03-01T10:15:30.123Z   # aws_instance.web will be created\n\
                      2024-03-01T10:15:30.456Z   + resource \"aws_instance\" \"web\" {\n\
                      2024-03-01T10:15:30.789Z       + ami = \"ami-1\"\n\
                      2024-03-01T10:15:31.000Z     }\n\
                      ##[section]Finishing: Plan\n";

        let plan = parser.parse(output);
        assert_eq!(plan.resource_changes.len(), 1);
        assert_eq!(
            plan.resource_changes[0]
                .attribute("ami")
                .unwrap()
                .value,
            AttrValue::String("ami-1".to_string())
        );
    }

    #[test]
    fn test_nested_object_literal_keeps_array_open() {
        let parser = PlanParser::new();
        let output = r#"
  + resource "aws_instance" "web" {
      + rules = [
          + {
              + port = 80
            },
          + "plain-item",
        ]
      + after = "still-parsed"
    }
"#;

        let plan = parser.parse(output);
        let resource = &plan.resource_changes[0];

        // The `]` inside the object nesting must not close the array; only
        // the final one at depth zero does
        let rules = resource.attribute("rules").unwrap();
        match &rules.value {
            AttrValue::Items(items) => {
                assert!(items.contains(&"+ plain-item".to_string()));
            }
            other => panic!("expected items, got {other:?}"),
        }

        assert_eq!(
            resource.attribute("after").unwrap().value,
            AttrValue::String("still-parsed".to_string())
        );
    }

    #[test]
    fn test_blocks_nest_and_flush_to_parent() {
        let parser = PlanParser::new();
        let output = r#"
  + resource "aws_instance" "web" {
      + ami = "ami-1"

      + network_interface {
          + device_index = 0

          + ipv6_addresses {
              + count = 1
            }
        }
    }
"#;

        let plan = parser.parse(output);
        let resource = &plan.resource_changes[0];

        assert_eq!(resource.blocks.len(), 1);
        let outer = &resource.blocks[0];
        assert_eq!(outer.name, "network_interface");
        assert_eq!(outer.action, ChangeSymbol::Create);
        assert_eq!(outer.attributes.len(), 1);

        assert_eq!(outer.blocks.len(), 1);
        let inner = &outer.blocks[0];
        assert_eq!(inner.name, "ipv6_addresses");
        assert_eq!(inner.attributes[0].key, "count");
    }

    #[test]
    fn test_sensitive_notice_marks_innermost_block_only() {
        let parser = PlanParser::new();
        let output = r#"
  ~ resource "aws_db_instance" "main" {
      ~ storage {
          ~ credentials {
              # At least one attribute in this block is (or was) sensitive,
              # so its contents will not be displayed.
            }
        }
    }
"#;

        let plan = parser.parse(output);
        let storage = &plan.resource_changes[0].blocks[0];
        let credentials = &storage.blocks[0];

        assert_eq!(credentials.is_sensitive, Some(true));
        assert!(credentials.attributes.is_empty());
        assert!(storage.is_sensitive.is_none());
    }

    #[test]
    fn test_block_at_resource_indent_gets_no_action() {
        let parser = PlanParser::new();
        // Symbol at column <= 6 belongs to resource-level context, not the
        // block itself
        let output = r#"
  + resource "aws_instance" "web" {
  + shallow {
        + deep_block {
            + a = 1
        }
    }
}
"#;

        let plan = parser.parse(output);
        let resource = &plan.resource_changes[0];
        let shallow = &resource.blocks[0];

        assert_eq!(shallow.name, "shallow");
        assert!(shallow.action.is_none());
        assert_eq!(shallow.blocks[0].name, "deep_block");
        assert_eq!(shallow.blocks[0].action, ChangeSymbol::Create);
    }

    #[test]
    fn test_bare_declaration_tokens() {
        let parser = PlanParser::new();
        let output = r#"
  ~ resource aws_security_group main {
      ~ description = "old" -> "new"
    }
"#;

        let plan = parser.parse(output);
        let resource = &plan.resource_changes[0];

        assert_eq!(resource.resource_type, "aws_security_group");
        assert_eq!(resource.name, "main");
        assert_eq!(resource.action, ResourceAction::Update);
    }

    #[test]
    fn test_pending_comment_survives_blank_lines() {
        let parser = PlanParser::new();
        let output = r#"
  # aws_instance.orphan[5] will be created

  + resource "aws_instance" "web" {
      + ami = "ami-1"
    }
"#;

        // The orphan comment is separated from the declaration only by a
        // blank (skipped) line, so its index still applies; a comment for a
        // different resource is not validated against the declaration
        let plan = parser.parse(output);
        assert_eq!(plan.resource_changes[0].index.as_deref(), Some("5"));
    }

    #[test]
    fn test_empty_input_is_empty_plan() {
        let parser = PlanParser::new();

        assert!(parser.parse("").is_empty());
        assert!(parser.parse("No changes. Your infrastructure matches the configuration.\n").is_empty());
    }

    #[test]
    fn test_duplicate_attribute_key_last_write_wins() {
        let parser = PlanParser::new();
        let output = r#"
  + resource "aws_instance" "web" {
      + ami = "ami-first"
      + ami = "ami-second"
    }
"#;

        let plan = parser.parse(output);
        let resource = &plan.resource_changes[0];

        assert_eq!(resource.attributes.len(), 1);
        assert_eq!(
            resource.attribute("ami").unwrap().value,
            AttrValue::String("ami-second".to_string())
        );
    }

    #[test]
    fn test_missing_resource_flushed_at_end_of_input() {
        let parser = PlanParser::new();
        // Truncated output with no closing brace still yields the resource
        let output = "  + resource \"aws_instance\" \"web\" {\n      + ami = \"ami-1\"\n";

        let plan = parser.parse(output);
        assert_eq!(plan.resource_changes.len(), 1);
    }
}
