use crate::common::{attribute::AttributeValue, item::Item};

/// One named component of a primary key.
///
/// ```rust
/// use dynamodb_wire::common::key;
///
/// let key = key::Key {
///     name: "id".to_string(),
///     value: "1".into(),
/// };
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Key {
    /// The attribute name.
    pub name: String,
    /// The attribute value.
    pub value: AttributeValue,
}

impl Key {
    /// Builds a key component from anything convertible to an attribute value.
    pub fn new(name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A full primary key: partition key plus, for composite keys, a sort key.
///
/// ```rust
/// use dynamodb_wire::common::key;
///
/// let keys = key::Keys {
///     partition_key: key::Key::new("id", "1"),
///     sort_key: Some(key::Key::new("created", 1700000000)),
/// };
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Keys {
    /// The `HASH` key.
    pub partition_key: Key,
    /// The sort key, for tables with a `RANGE` key.
    pub sort_key: Option<Key>,
}

impl Keys {
    /// Primary key made of a partition key only.
    pub fn partition(name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            partition_key: Key::new(name, value),
            sort_key: None,
        }
    }
}

impl From<Keys> for Item {
    fn from(keys: Keys) -> Self {
        let mut item = Self::with_capacity(2);
        item.insert(keys.partition_key.name, keys.partition_key.value);
        if let Some(sort_key) = keys.sort_key {
            item.insert(sort_key.name, sort_key.value);
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::partition_key_only_string(
        Keys::partition("a", "b"),
        Item::from([("a".to_string(), AttributeValue::S("b".to_string()))])
    )]
    #[case::partition_key_only_number(
        Keys::partition("a", 42),
        Item::from([("a".to_string(), AttributeValue::N("42".to_string()))])
    )]
    #[case::partition_key_string_sort_key_number(
        Keys {
            partition_key: Key::new("a", "b"),
            sort_key: Some(Key::new("c", 100)),
        },
        Item::from(
            [
                ("a".to_string(), AttributeValue::S("b".to_string())),
                ("c".to_string(), AttributeValue::N("100".to_string())),
            ]
        )
    )]
    fn test_keys_to_item(#[case] keys: Keys, #[case] expected: Item) {
        let actual: Item = keys.into();
        assert_eq!(actual, expected);
    }
}
