//! Right-hand-side value coercion
//!
//! Converts the raw text after `=` on an attribute line into a typed
//! [`AttrValue`], including detection of the `old -> new` diff syntax.

use super::types::{AttrValue, Attribute, ChangeSymbol};

/// Placeholder printed by the planner for values only known at apply time
pub const KNOWN_AFTER_APPLY: &str = "(known after apply)";

/// Marker appended to attribute lines whose change forces replacement
const FORCES_REPLACEMENT: &str = "# forces replacement";

/// Coerce one raw value fragment into a typed value.
///
/// First match wins: the known-after-apply sentinel, booleans, `null`, a
/// quoted string, a fully numeric token, then raw text as a fallback (covers
/// resource identifiers, free text, and not-yet-split diff expressions).
pub fn parse_scalar(raw: &str) -> AttrValue {
    let trimmed = raw.trim();

    if trimmed == KNOWN_AFTER_APPLY {
        return AttrValue::String(KNOWN_AFTER_APPLY.to_string());
    }

    if trimmed == "true" {
        return AttrValue::Bool(true);
    }

    if trimmed == "false" {
        return AttrValue::Bool(false);
    }

    if trimmed == "null" {
        return AttrValue::Null;
    }

    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        return AttrValue::String(trimmed[1..trimmed.len() - 1].to_string());
    }

    if is_numeric(trimmed) {
        if let Ok(number) = trimmed.parse::<f64>() {
            return AttrValue::Number(number);
        }
    }

    AttrValue::String(trimmed.to_string())
}

/// A token is numeric only when non-empty, space-free, and made of digit,
/// sign, decimal point, or exponent characters
fn is_numeric(value: &str) -> bool {
    !value.is_empty()
        && !value.contains(' ')
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}

/// Split `before -> after` text into its two sides.
///
/// Each side is trimmed, stripped of a trailing forces-replacement marker,
/// and stripped of surrounding quotes. Returns `None` when the text is not a
/// two-sided transition.
pub fn split_arrow(value: &str) -> Option<(String, String)> {
    let (before, after) = value.split_once(" -> ")?;

    Some((clean_side(before), clean_side(after)))
}

fn clean_side(side: &str) -> String {
    let mut cleaned = side.trim();

    if let Some(stripped) = cleaned.strip_suffix(FORCES_REPLACEMENT) {
        cleaned = stripped.trim_end();
    }

    cleaned.trim_matches('"').to_string()
}

/// Build an attribute from a key, change symbol, and raw value text.
///
/// When the symbol is `~` and the coerced value is a string containing the
/// transition arrow, the attribute is re-expressed as a before/after change;
/// that form takes precedence over the plain string.
pub fn build_attribute(key: &str, action: ChangeSymbol, raw_value: &str) -> Attribute {
    let parsed = parse_scalar(raw_value);

    if action == ChangeSymbol::Update {
        if let AttrValue::String(text) = &parsed {
            if let Some((from, to)) = split_arrow(text) {
                return Attribute::with_change(
                    key,
                    action,
                    AttrValue::String(from),
                    AttrValue::String(to),
                );
            }
        }
    }

    Attribute::new(key, parsed, action)
}
