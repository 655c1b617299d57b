//! Display-title formatting.
//!
//! A template such as `"{first_name} {last_name}"` is rendered against an
//! [`Entity`]: each `{field}` whose field exists and holds a scalar is
//! substituted, every other placeholder is left in the output verbatim.

use crate::Entity;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

/// Template used when the host does not configure one.
pub const DEFAULT_TITLE_TEMPLATE: &str = "{first_name} {last_name}";

/// A `{placeholder}` template for entity display titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TitleFormat(String);

impl TitleFormat {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn template(&self) -> &str {
        &self.0
    }

    /// Renders the template against `entity`.
    ///
    /// `{id}` resolves to the entity id. Strings are inserted as-is, numbers
    /// and booleans in their JSON form, `null` as the empty string. Objects,
    /// arrays and unknown fields leave the placeholder untouched. Substituted
    /// text is never re-scanned for placeholders.
    pub fn render(&self, entity: &Entity) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut rest = self.0.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };

            let name = &after[..close];
            // A nested `{` means this brace does not open a placeholder.
            if name.contains('{') {
                out.push('{');
                rest = after;
                continue;
            }

            match resolve(entity, name) {
                Some(text) => out.push_str(&text),
                None => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            }
            rest = &after[close + 1..];
        }

        out.push_str(rest);
        out
    }
}

impl Default for TitleFormat {
    fn default() -> Self {
        Self(DEFAULT_TITLE_TEMPLATE.to_string())
    }
}

impl From<&str> for TitleFormat {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TitleFormat {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

fn resolve<'a>(entity: &'a Entity, name: &str) -> Option<Cow<'a, str>> {
    if name == "id" || name == "uid" {
        return Some(Cow::Borrowed(entity.id.as_str()));
    }
    match entity.field(name)? {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null => Some(Cow::Borrowed("")),
        Value::Array(_) | Value::Object(_) => None,
    }
}
