//! Opaque SQL parameter values.
//!
//! Update payloads and filter criteria carry heterogeneous values (text,
//! numbers, booleans, null) that are only typed by the database at bind time.
//! [`SqlValue`] is the tagged union for those values: it deserializes from
//! JSON scalars and binds through `tokio_postgres` as a positional parameter.

use bytes::BytesMut;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

/// A dynamically typed SQL parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl ToSql for SqlValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            Self::Text(v) => v.to_sql(ty, out),
            // Narrow to the column's integer width instead of always writing
            // eight bytes; try_from surfaces overflow as a bind error.
            Self::Int(v) => {
                if *ty == Type::INT2 {
                    i16::try_from(*v)?.to_sql(ty, out)
                } else if *ty == Type::INT4 {
                    i32::try_from(*v)?.to_sql(ty, out)
                } else {
                    v.to_sql(ty, out)
                }
            }
            Self::Float(v) => {
                if *ty == Type::FLOAT4 {
                    (*v as f32).to_sql(ty, out)
                } else {
                    v.to_sql(ty, out)
                }
            }
            Self::Bool(v) => v.to_sql(ty, out),
            Self::Null => Ok(IsNull::Yes),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        // The variant is only known per value, so type checking happens at
        // bind time inside to_sql.
        true
    }

    to_sql_checked!();
}

impl Serialize for SqlValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Text(v) => serializer.serialize_str(v),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for SqlValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = SqlValue;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a string, number, boolean, or null")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(SqlValue::Text(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(SqlValue::Text(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(SqlValue::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i64::try_from(v)
                    .map(SqlValue::Int)
                    .map_err(|_| E::custom(format!("integer out of range: {v}")))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(SqlValue::Float(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(SqlValue::Bool(v))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(SqlValue::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(SqlValue::Null)
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_conversions() {
        assert_eq!(SqlValue::from("x"), SqlValue::Text("x".to_string()));
        assert_eq!(SqlValue::from(5i32), SqlValue::Int(5));
        assert_eq!(SqlValue::from(true), SqlValue::Bool(true));
        assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some("y")), SqlValue::Text("y".to_string()));
    }

    #[test]
    fn deserialize_scalars() {
        assert_eq!(
            serde_json::from_str::<SqlValue>(r#""hello""#).unwrap(),
            SqlValue::Text("hello".to_string())
        );
        assert_eq!(
            serde_json::from_str::<SqlValue>("42").unwrap(),
            SqlValue::Int(42)
        );
        assert_eq!(
            serde_json::from_str::<SqlValue>("0.5").unwrap(),
            SqlValue::Float(0.5)
        );
        assert_eq!(
            serde_json::from_str::<SqlValue>("false").unwrap(),
            SqlValue::Bool(false)
        );
        assert_eq!(
            serde_json::from_str::<SqlValue>("null").unwrap(),
            SqlValue::Null
        );
    }

    #[test]
    fn deserialize_rejects_nested() {
        assert!(serde_json::from_str::<SqlValue>("[1, 2]").is_err());
        assert!(serde_json::from_str::<SqlValue>(r#"{"a": 1}"#).is_err());
    }

    #[test]
    fn serialize_round_trip() {
        let values = vec![
            SqlValue::Text("a".to_string()),
            SqlValue::Int(-3),
            SqlValue::Bool(true),
            SqlValue::Null,
        ];
        for value in values {
            let json = serde_json::to_string(&value).unwrap();
            assert_eq!(serde_json::from_str::<SqlValue>(&json).unwrap(), value);
        }
    }
}
