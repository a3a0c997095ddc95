use crate::error::{Error, Result};

use aws_sdk_dynamodb::{primitives, types};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

const TAGS: &[&str] = &["S", "N", "B", "SS", "NS", "BS"];

/// Type tag of an attribute value as written on the wire.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AttributeType {
    /// String.
    S,
    /// Number.
    N,
    /// Binary.
    B,
    /// String set.
    Ss,
    /// Number set.
    Ns,
    /// Binary set.
    Bs,
}

impl AttributeType {
    /// Returns the wire tag (`S`, `N`, `B`, `SS`, `NS` or `BS`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::N => "N",
            Self::B => "B",
            Self::Ss => "SS",
            Self::Ns => "NS",
            Self::Bs => "BS",
        }
    }

    /// Parses a wire tag, returning `None` for tags outside the six supported ones.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "S" => Some(Self::S),
            "N" => Some(Self::N),
            "B" => Some(Self::B),
            "SS" => Some(Self::Ss),
            "NS" => Some(Self::Ns),
            "BS" => Some(Self::Bs),
            _ => None,
        }
    }

    /// Returns `true` for the three set tags.
    #[must_use]
    pub fn is_set(self) -> bool {
        matches!(self, Self::Ss | Self::Ns | Self::Bs)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute value.
///
/// Numbers are kept string-encoded, exactly as they travel on the wire, and
/// binary values are base64 encoded in JSON. Set members always share the
/// base type of their variant.
///
/// ```rust
/// use dynamodb_wire::common::attribute::AttributeValue;
///
/// let name = AttributeValue::from("John");
/// let age = AttributeValue::from(42);
/// let tags = AttributeValue::string_set(["a", "b"]);
/// assert_eq!(serde_json::to_string(&age).unwrap(), r#"{"N":"42"}"#);
/// # let _ = (name, tags);
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum AttributeValue {
    /// String value.
    S(String),
    /// Number value.
    N(String),
    /// Binary value.
    B(Bytes),
    /// String set.
    Ss(Vec<String>),
    /// Number set.
    Ns(Vec<String>),
    /// Binary set.
    Bs(Vec<Bytes>),
}

impl AttributeValue {
    /// Builds a string set.
    pub fn string_set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Ss(values.into_iter().map(Into::into).collect())
    }

    /// Builds a number set from anything that prints as a number.
    pub fn number_set<I, N>(values: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: ToString,
    {
        Self::Ns(values.into_iter().map(|n| n.to_string()).collect())
    }

    /// Builds a binary set.
    pub fn binary_set<I, B>(values: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        Self::Bs(values.into_iter().map(Into::into).collect())
    }

    /// Returns the type tag of this value.
    #[must_use]
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Self::S(_) => AttributeType::S,
            Self::N(_) => AttributeType::N,
            Self::B(_) => AttributeType::B,
            Self::Ss(_) => AttributeType::Ss,
            Self::Ns(_) => AttributeType::Ns,
            Self::Bs(_) => AttributeType::Bs,
        }
    }

    /// Returns the string if this is an `S` value.
    #[must_use]
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number text if this is an `N` value.
    #[must_use]
    pub fn as_n(&self) -> Option<&str> {
        match self {
            Self::N(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the bytes if this is a `B` value.
    #[must_use]
    pub fn as_b(&self) -> Option<&Bytes> {
        match self {
            Self::B(b) => Some(b),
            _ => None,
        }
    }

    /// Classifies a JSON value into an attribute value.
    ///
    /// JSON already distinguishes numbers from strings, so the classification
    /// follows the value the caller built, never how its text looks:
    ///
    /// - arrays holding any object or array become `BS`, each member stored
    ///   as its JSON text;
    /// - otherwise arrays holding any string become `SS`;
    /// - otherwise arrays of numbers only become `NS`;
    /// - any other array, including the empty one, becomes `SS`;
    /// - objects become `B` holding their JSON text;
    /// - numbers become `N`;
    /// - strings, booleans and null become `S` of their text.
    ///
    /// ```rust
    /// use dynamodb_wire::common::attribute::AttributeValue;
    /// use serde_json::json;
    ///
    /// assert_eq!(AttributeValue::infer(json!("5")), AttributeValue::S("5".to_string()));
    /// assert_eq!(AttributeValue::infer(json!(2 + 3)), AttributeValue::N("5".to_string()));
    /// assert_eq!(AttributeValue::infer(json!([1, 2, 3])), AttributeValue::number_set([1, 2, 3]));
    /// ```
    #[must_use]
    pub fn infer(value: Value) -> Self {
        match value {
            Value::Array(values) => Self::infer_set(values),
            Value::Object(map) => Self::B(Bytes::from(Value::Object(map).to_string())),
            Value::Number(n) => Self::N(n.to_string()),
            other => Self::S(scalar_text(other)),
        }
    }

    fn infer_set(values: Vec<Value>) -> Self {
        if values.iter().any(|v| v.is_object() || v.is_array()) {
            Self::Bs(
                values
                    .into_iter()
                    .map(|v| Bytes::from(v.to_string()))
                    .collect(),
            )
        } else if values.iter().any(Value::is_string) {
            Self::Ss(values.into_iter().map(scalar_text).collect())
        } else if !values.is_empty() && values.iter().all(Value::is_number) {
            Self::Ns(values.into_iter().map(scalar_text).collect())
        } else {
            Self::Ss(values.into_iter().map(scalar_text).collect())
        }
    }

    /// Converts the value back into its native JSON form.
    ///
    /// Numbers that do not parse as JSON numbers are returned as strings.
    /// Binary values yield the JSON document they hold, or their base64 text
    /// when the bytes are not JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::S(s) => Value::String(s.clone()),
            Self::N(n) => number_to_json(n),
            Self::B(b) => blob_to_json(b),
            Self::Ss(v) => Value::Array(v.iter().cloned().map(Value::String).collect()),
            Self::Ns(v) => Value::Array(v.iter().map(|n| number_to_json(n)).collect()),
            Self::Bs(v) => Value::Array(v.iter().map(blob_to_json).collect()),
        }
    }
}

fn scalar_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn number_to_json(n: &str) -> Value {
    n.parse::<serde_json::Number>()
        .map_or_else(|_| Value::String(n.to_owned()), Value::Number)
}

fn blob_to_json(b: &Bytes) -> Value {
    serde_json::from_slice(b).unwrap_or_else(|_| Value::String(BASE64.encode(b)))
}

fn decode_blob(encoded: &str) -> std::result::Result<Bytes, base64::DecodeError> {
    BASE64.decode(encoded).map(Bytes::from)
}

/// Splits a value into its wire tag and raw wire value.
#[must_use]
pub fn encode(value: &AttributeValue) -> (AttributeType, Value) {
    let raw = match value {
        AttributeValue::S(s) | AttributeValue::N(s) => Value::String(s.clone()),
        AttributeValue::B(b) => Value::String(BASE64.encode(b)),
        AttributeValue::Ss(v) | AttributeValue::Ns(v) => {
            Value::Array(v.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Bs(v) => Value::Array(
            v.iter()
                .map(|b| Value::String(BASE64.encode(b)))
                .collect(),
        ),
    };
    (value.attribute_type(), raw)
}

/// Rebuilds a value from a wire tag and its raw wire value.
pub fn decode(attribute_type: AttributeType, raw: Value) -> Result<AttributeValue> {
    let mut map = serde_json::Map::with_capacity(1);
    map.insert(attribute_type.as_str().to_owned(), raw);
    serde_json::from_value(Value::Object(map)).map_err(|e| Error::Codec(e.to_string()))
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S(s) => write!(f, "{{S: {s}}}"),
            Self::N(n) => write!(f, "{{N: {n}}}"),
            Self::B(b) => write!(f, "{{B: {} bytes}}", b.len()),
            Self::Ss(v) => write!(f, "{{SS: {v:?}}}"),
            Self::Ns(v) => write!(f, "{{NS: {v:?}}}"),
            Self::Bs(v) => write!(f, "{{BS: {} items}}", v.len()),
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let (attribute_type, raw) = encode(self);
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(attribute_type.as_str(), &raw)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(AttributeValueVisitor)
    }
}

struct AttributeValueVisitor;

impl<'de> Visitor<'de> for AttributeValueVisitor {
    type Value = AttributeValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an attribute value object with exactly one type key")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> std::result::Result<Self::Value, M::Error> {
        let Some(key) = map.next_key::<String>()? else {
            return Err(de::Error::custom("attribute value must have exactly one key"));
        };
        let Some(attribute_type) = AttributeType::from_tag(&key) else {
            return Err(de::Error::unknown_field(&key, TAGS));
        };
        let value = match attribute_type {
            AttributeType::S => AttributeValue::S(map.next_value()?),
            AttributeType::N => AttributeValue::N(map.next_value::<NumberText>()?.0),
            AttributeType::B => {
                let encoded: String = map.next_value()?;
                AttributeValue::B(decode_blob(&encoded).map_err(de::Error::custom)?)
            }
            AttributeType::Ss => AttributeValue::Ss(map.next_value()?),
            AttributeType::Ns => AttributeValue::Ns(
                map.next_value::<Vec<NumberText>>()?
                    .into_iter()
                    .map(|n| n.0)
                    .collect(),
            ),
            AttributeType::Bs => {
                let encoded: Vec<String> = map.next_value()?;
                let decoded = encoded
                    .iter()
                    .map(|e| decode_blob(e))
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(de::Error::custom)?;
                AttributeValue::Bs(decoded)
            }
        };
        if map.next_key::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::custom("attribute value must have exactly one key"));
        }
        Ok(value)
    }
}

/// Number text, accepting a bare JSON number as well as the usual string.
struct NumberText(String);

impl<'de> Deserialize<'de> for NumberText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Self(s)),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(de::Error::custom(format!("expected a number, got {other}"))),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::S(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::S(value)
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(value: Vec<u8>) -> Self {
        Self::B(Bytes::from(value))
    }
}

impl From<Bytes> for AttributeValue {
    fn from(value: Bytes) -> Self {
        Self::B(value)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttributeValue {
                fn from(value: $ty) -> Self {
                    Self::N(value.to_string())
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl From<AttributeValue> for types::AttributeValue {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::S(s) => Self::S(s),
            AttributeValue::N(n) => Self::N(n),
            AttributeValue::B(b) => Self::B(primitives::Blob::new(b.to_vec())),
            AttributeValue::Ss(v) => Self::Ss(v),
            AttributeValue::Ns(v) => Self::Ns(v),
            AttributeValue::Bs(v) => Self::Bs(
                v.into_iter()
                    .map(|b| primitives::Blob::new(b.to_vec()))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<types::AttributeValue> for AttributeValue {
    type Error = Error;

    fn try_from(value: types::AttributeValue) -> Result<Self> {
        let value = match value {
            types::AttributeValue::S(s) => Self::S(s),
            types::AttributeValue::N(n) => Self::N(n),
            types::AttributeValue::B(b) => Self::B(Bytes::from(b.into_inner())),
            types::AttributeValue::Ss(v) => Self::Ss(v),
            types::AttributeValue::Ns(v) => Self::Ns(v),
            types::AttributeValue::Bs(v) => Self::Bs(
                v.into_iter()
                    .map(|b| Bytes::from(b.into_inner()))
                    .collect(),
            ),
            other => {
                return Err(Error::Codec(format!(
                    "unsupported attribute value {other:?}"
                )));
            }
        };
        Ok(value)
    }
}
