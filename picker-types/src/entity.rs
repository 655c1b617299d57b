use crate::EntityId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A read-only copy of a remote directory record.
///
/// The directory owns the record; the picker only displays it and keys the
/// selection by [`Entity::id`]. Display fields (`first_name`, `last_name`,
/// `picture`, `url`, ...) are kept as an arbitrary JSON object. On the wire
/// the id is accepted as either `id` or `uid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(alias = "uid")]
    pub id: EntityId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Entity {
    /// Creates an entity with no display fields.
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style field setter.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Parses an entity out of a JSON value.
    pub fn from_value(value: Value) -> crate::Result<Self> {
        if !value.is_object() {
            return Err(crate::Error::NotAnObject);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Returns a top-level field by name. `id` is not part of `fields`.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Extract a value using a JSON pointer (e.g., "/picture/url").
    /// `"/id"` resolves to nothing here; use [`Entity::id`] instead.
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        let rest = pointer.strip_prefix('/')?;
        let (head, tail) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, ""),
        };
        let key = head.replace("~1", "/").replace("~0", "~");
        let value = self.fields.get(&key)?;
        if tail.is_empty() {
            Some(value)
        } else {
            value.pointer(tail)
        }
    }

    /// Extract a string value using a JSON pointer.
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract a boolean value using a JSON pointer.
    pub fn get_bool(&self, pointer: &str) -> Option<bool> {
        self.pointer(pointer).and_then(|v| v.as_bool())
    }

    /// Extract a numeric value using a JSON pointer.
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.pointer(pointer).and_then(|v| v.as_f64())
    }

    /// URL of the entity's picture, if the directory supplied one.
    pub fn picture_url(&self) -> Option<&str> {
        self.get_str("/picture/url")
    }

    /// Public profile URL, used as the slot link when the picker is read-only.
    pub fn profile_url(&self) -> Option<&str> {
        self.get_str("/url")
    }
}

/// One row of a directory search: an id and its pre-formatted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: EntityId,
    #[serde(rename = "text", alias = "display_text")]
    pub display_text: String,
}

impl SearchHit {
    pub fn new(id: impl Into<EntityId>, display_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_text: display_text.into(),
        }
    }
}
