//! Partial update payloads.

use crate::value::SqlValue;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// An insertion-ordered set of field updates.
///
/// Keys are logical (wire) field names; they are assumed to have passed an
/// allow-list check upstream. Entry order is preserved because it determines
/// placeholder numbering in the generated `SET` clause.
///
/// # Example
///
/// ```
/// use jobgrid::UpdatePayload;
///
/// let payload = UpdatePayload::new()
///     .set("name", "Acme")
///     .set_opt("numEmployees", Some(12))
///     .set_opt("logoUrl", None::<&str>);
/// assert_eq!(payload.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePayload {
    entries: Vec<(String, SqlValue)>,
}

impl UpdatePayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field update.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.entries.push((field.into(), value.into()));
        self
    }

    /// Append an optional field update (None => skip).
    pub fn set_opt<T>(self, field: impl Into<String>, value: Option<T>) -> Self
    where
        T: Into<SqlValue>,
    {
        match value {
            Some(v) => self.set(field, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.entries.iter().map(|(field, value)| (field.as_str(), value))
    }
}

// Hand-written visitor: entries must keep document order.
impl<'de> Deserialize<'de> for UpdatePayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PayloadVisitor;

        impl<'de> Visitor<'de> for PayloadVisitor {
            type Value = UpdatePayload;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("an object of field updates")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((field, value)) = access.next_entry::<String, SqlValue>()? {
                    entries.push((field, value));
                }
                Ok(UpdatePayload { entries })
            }
        }

        deserializer.deserialize_map(PayloadVisitor)
    }
}
