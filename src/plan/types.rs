//! Data types for parsed plan output
//!
//! This module defines the structured change-set recovered from the text of
//! `tofu plan` / `terraform plan`, ready for rendering or export.

use serde::{Deserialize, Serialize};

/// The action a resource declaration announces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceAction {
    /// Resource will be created
    Create,
    /// Resource will be updated in-place
    Update,
    /// Resource will be destroyed
    Delete,
    /// Resource will be destroyed and recreated
    Replace,
}

impl ResourceAction {
    /// Map a declaration-line change symbol to an action.
    ///
    /// Unrecognized symbols map to `Create`. This mirrors the plan format's
    /// lenient reading of malformed declaration lines; keep the fallback here
    /// so a future `Unknown` variant only touches this table.
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim() {
            "+" => ResourceAction::Create,
            "~" => ResourceAction::Update,
            "-" => ResourceAction::Delete,
            "-/+" | "±" => ResourceAction::Replace,
            _ => ResourceAction::Create,
        }
    }

    /// Get the symbol used to represent this action
    pub fn symbol(&self) -> &'static str {
        match self {
            ResourceAction::Create => "+",
            ResourceAction::Update => "~",
            ResourceAction::Delete => "-",
            ResourceAction::Replace => "-/+",
        }
    }

    /// Get the label for this action
    pub fn label(&self) -> &'static str {
        match self {
            ResourceAction::Create => "will be created",
            ResourceAction::Update => "will be updated in-place",
            ResourceAction::Delete => "will be destroyed",
            ResourceAction::Replace => "must be replaced",
        }
    }

    /// Get RGB color tuple for this action
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            ResourceAction::Create => (152, 225, 152),  // Pastel mint green
            ResourceAction::Update => (255, 230, 160),  // Pastel cream/yellow
            ResourceAction::Delete => (255, 160, 160),  // Pastel coral
            ResourceAction::Replace => (181, 174, 254), // Pastel lavender
        }
    }
}

/// Change symbol attached to an attribute or block line
///
/// `None` means the line carried no symbol of its own; display layers defer
/// to the resource-level (or block-level) action in that case. It is never
/// stored as the entity's own action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeSymbol {
    #[serde(rename = "+")]
    Create,
    #[serde(rename = "~")]
    Update,
    #[serde(rename = "-")]
    Delete,
    #[serde(rename = "-/+")]
    Replace,
    #[serde(rename = "")]
    None,
}

impl ChangeSymbol {
    /// Map a raw symbol to a change symbol; anything unrecognized is `None`
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim() {
            "+" => ChangeSymbol::Create,
            "~" => ChangeSymbol::Update,
            "-" => ChangeSymbol::Delete,
            "-/+" | "±" => ChangeSymbol::Replace,
            _ => ChangeSymbol::None,
        }
    }

    /// Get the glyph for this symbol (empty string for `None`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeSymbol::Create => "+",
            ChangeSymbol::Update => "~",
            ChangeSymbol::Delete => "-",
            ChangeSymbol::Replace => "-/+",
            ChangeSymbol::None => "",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ChangeSymbol::None)
    }
}

/// A typed attribute value recovered from the plan text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Literal `null`
    Null,
    /// Literal `true`/`false`
    Bool(bool),
    /// Fully numeric literal; integral values serialize as JSON integers
    #[serde(serialize_with = "serialize_number")]
    Number(f64),
    /// Quoted string (quotes stripped), the "(known after apply)" sentinel,
    /// or raw text that matched no other coercion
    String(String),
    /// Items of a multi-line array, each kept as text with its own change
    /// symbol prefix preserved
    Items(Vec<String>),
    /// Before/after pair from `old -> new` diff syntax
    Change {
        from: Box<AttrValue>,
        to: Box<AttrValue>,
    },
}

impl AttrValue {
    /// Whether this is the "(known after apply)" sentinel
    pub fn is_computed(&self) -> bool {
        matches!(self, AttrValue::String(s) if s == crate::plan::value::KNOWN_AFTER_APPLY)
    }
}

/// Serialize integral values without a fractional part, matching how the
/// plan text wrote them
fn serialize_number<S>(n: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if n.fract() == 0.0 && n.abs() < 1e15 {
        serializer.serialize_i64(*n as i64)
    } else {
        serializer.serialize_f64(*n)
    }
}

/// Before/after pair for a modified attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueChange {
    pub from: AttrValue,
    pub to: AttrValue,
}

/// A single attribute within a resource or block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute key (e.g., "ami", "instance_type")
    pub key: String,

    /// Parsed value; mirrors `change` as a from/to pair when `change` is set
    pub value: AttrValue,

    /// Change symbol on the attribute's own line (`None` when unmarked)
    pub action: ChangeSymbol,

    /// Before/after pair when the line used `old -> new` syntax
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<ValueChange>,
}

impl Attribute {
    /// Create a plain attribute with no before/after change
    pub fn new(key: &str, value: AttrValue, action: ChangeSymbol) -> Self {
        Self {
            key: key.to_string(),
            value,
            action,
            change: None,
        }
    }

    /// Create an attribute carrying a before/after change.
    ///
    /// `value` is set to the same pair so consumers reading either field see
    /// the transition.
    pub fn with_change(key: &str, action: ChangeSymbol, from: AttrValue, to: AttrValue) -> Self {
        Self {
            key: key.to_string(),
            value: AttrValue::Change {
                from: Box::new(from.clone()),
                to: Box::new(to.clone()),
            },
            action,
            change: Some(ValueChange { from, to }),
        }
    }
}

/// A nested, named sub-structure within a resource
///
/// Blocks own their children: a child block is appended to its parent's
/// `blocks` list (or to the resource's, at the top level) when its closing
/// brace is seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block name (e.g., "boot_diagnostics", "ingress")
    pub name: String,

    /// Explicit change symbol on the block's own line, if any
    pub action: ChangeSymbol,

    /// Attributes in source order
    pub attributes: Vec<Attribute>,

    /// Nested child blocks in close order
    pub blocks: Vec<Block>,

    /// Column of the first non-space character on the opening line
    pub indent: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Set when the block carried the sensitive-content notice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_sensitive: Option<bool>,
}

impl Block {
    pub fn new(name: &str, action: ChangeSymbol, indent: usize) -> Self {
        Self {
            name: name.to_string(),
            action,
            attributes: Vec::new(),
            blocks: Vec::new(),
            indent,
            comment: None,
            is_sensitive: None,
        }
    }
}

/// A resource change parsed from a declaration line and its body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource address, `type.name`
    pub address: String,

    /// Address with the `[index]` suffix when an index is known
    pub display_name: String,

    /// Unique within one parse result: `type.name[index]` when an index is
    /// known, `type.name_<ordinal>` otherwise
    pub unique_id: String,

    /// Resource type (e.g., "aws_instance")
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Resource name (e.g., "example")
    pub name: String,

    /// Index from the preceding comment line, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,

    /// Action announced by the declaration line
    pub action: ResourceAction,

    /// Top-level attributes, insertion-ordered, keys unique
    pub attributes: Vec<Attribute>,

    /// Top-level blocks in close order
    pub blocks: Vec<Block>,
}

impl Resource {
    /// Insert a top-level attribute, replacing any prior entry with the same
    /// key in place (last write wins, original position kept)
    pub fn insert_attribute(&mut self, attr: Attribute) {
        if let Some(existing) = self.attributes.iter_mut().find(|a| a.key == attr.key) {
            *existing = attr;
        } else {
            self.attributes.push(attr);
        }
    }

    /// Look up a top-level attribute by key
    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.key == key)
    }
}

/// Summary statistics for a parsed plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    /// Number of resources to create
    pub create: usize,

    /// Number of resources to update in-place
    pub update: usize,

    /// Number of resources to destroy
    pub delete: usize,

    /// Number of resources to replace
    pub replace: usize,
}

impl ChangeSummary {
    /// Check if there are any changes
    pub fn has_changes(&self) -> bool {
        self.total() > 0
    }

    /// Get total number of changes
    pub fn total(&self) -> usize {
        self.create + self.update + self.delete + self.replace
    }
}

/// A fully parsed plan, in source order of resource appearance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub resource_changes: Vec<Resource>,
}

impl Plan {
    /// Whether the parse produced no resources at all.
    ///
    /// This is a normal outcome, not an error; callers decide whether to
    /// surface it to the user.
    pub fn is_empty(&self) -> bool {
        self.resource_changes.is_empty()
    }

    /// Compute summary counts from the parsed resources
    pub fn summary(&self) -> ChangeSummary {
        let mut summary = ChangeSummary::default();

        for resource in &self.resource_changes {
            match resource.action {
                ResourceAction::Create => summary.create += 1,
                ResourceAction::Update => summary.update += 1,
                ResourceAction::Delete => summary.delete += 1,
                ResourceAction::Replace => summary.replace += 1,
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_action_symbols() {
        assert_eq!(ResourceAction::from_symbol("+"), ResourceAction::Create);
        assert_eq!(ResourceAction::from_symbol("~"), ResourceAction::Update);
        assert_eq!(ResourceAction::from_symbol("-"), ResourceAction::Delete);
        assert_eq!(ResourceAction::from_symbol("-/+"), ResourceAction::Replace);
        assert_eq!(ResourceAction::from_symbol("±"), ResourceAction::Replace);
    }

    #[test]
    fn test_resource_action_unknown_symbol_defaults_to_create() {
        assert_eq!(ResourceAction::from_symbol("?"), ResourceAction::Create);
        assert_eq!(ResourceAction::from_symbol(""), ResourceAction::Create);
        assert_eq!(ResourceAction::from_symbol("<="), ResourceAction::Create);
    }

    #[test]
    fn test_change_symbol_round_trip() {
        for sym in ["+", "~", "-", "-/+"] {
            assert_eq!(ChangeSymbol::from_symbol(sym).as_str(), sym);
        }
        assert!(ChangeSymbol::from_symbol("").is_none());
        assert!(ChangeSymbol::from_symbol("?").is_none());
    }

    #[test]
    fn test_attribute_with_change_mirrors_value() {
        let attr = Attribute::with_change(
            "name",
            ChangeSymbol::Update,
            AttrValue::String("old".to_string()),
            AttrValue::String("new".to_string()),
        );

        let change = attr.change.as_ref().unwrap();
        assert_eq!(change.from, AttrValue::String("old".to_string()));
        assert_eq!(change.to, AttrValue::String("new".to_string()));

        match &attr.value {
            AttrValue::Change { from, to } => {
                assert_eq!(**from, change.from);
                assert_eq!(**to, change.to);
            }
            other => panic!("expected change value, got {other:?}"),
        }
    }

    #[test]
    fn test_insert_attribute_last_write_wins() {
        let mut resource = Resource {
            address: "aws_instance.web".to_string(),
            display_name: "aws_instance.web".to_string(),
            unique_id: "aws_instance.web_0".to_string(),
            resource_type: "aws_instance".to_string(),
            name: "web".to_string(),
            index: None,
            action: ResourceAction::Create,
            attributes: Vec::new(),
            blocks: Vec::new(),
        };

        resource.insert_attribute(Attribute::new(
            "ami",
            AttrValue::String("ami-old".to_string()),
            ChangeSymbol::Create,
        ));
        resource.insert_attribute(Attribute::new(
            "instance_type",
            AttrValue::String("t3.micro".to_string()),
            ChangeSymbol::Create,
        ));
        resource.insert_attribute(Attribute::new(
            "ami",
            AttrValue::String("ami-new".to_string()),
            ChangeSymbol::Create,
        ));

        assert_eq!(resource.attributes.len(), 2);
        // Overwrite keeps the original position
        assert_eq!(resource.attributes[0].key, "ami");
        assert_eq!(
            resource.attribute("ami").unwrap().value,
            AttrValue::String("ami-new".to_string())
        );
    }

    #[test]
    fn test_number_serializes_integral_as_integer() {
        assert_eq!(
            serde_json::to_value(AttrValue::Number(42.0)).unwrap(),
            serde_json::json!(42)
        );
        assert_eq!(
            serde_json::to_value(AttrValue::Number(-3.5)).unwrap(),
            serde_json::json!(-3.5)
        );
    }

    #[test]
    fn test_plan_summary_counts() {
        let mut plan = Plan::default();
        assert!(!plan.summary().has_changes());

        for (name, action) in [
            ("a", ResourceAction::Create),
            ("b", ResourceAction::Update),
            ("c", ResourceAction::Delete),
            ("d", ResourceAction::Replace),
        ] {
            plan.resource_changes.push(Resource {
                address: format!("aws_instance.{name}"),
                display_name: format!("aws_instance.{name}"),
                unique_id: format!("aws_instance.{name}_0"),
                resource_type: "aws_instance".to_string(),
                name: name.to_string(),
                index: None,
                action,
                attributes: Vec::new(),
                blocks: Vec::new(),
            });
        }

        let summary = plan.summary();
        assert_eq!(summary.create, 1);
        assert_eq!(summary.update, 1);
        assert_eq!(summary.delete, 1);
        assert_eq!(summary.replace, 1);
        assert_eq!(summary.total(), 4);
        assert!(summary.has_changes());
    }
}
