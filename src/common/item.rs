use crate::common::attribute::AttributeValue;
use crate::error::Result;

use aws_sdk_dynamodb::types;
use indexmap::IndexMap;
use serde::{Serialize, de::DeserializeOwned};
use std::collections;

/// An item: attribute names mapped to values, in insertion order.
pub type Item = IndexMap<String, AttributeValue>;

/// Converts a serializable value into an item.
///
/// Struct fields become attributes, sorted by name. Only shapes that map onto
/// `S`, `N`, `B` and their sets are accepted; booleans, nulls, lists and maps
/// are rejected.
///
/// ```rust
/// use dynamodb_wire::common::item;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User {
///     id: String,
///     age: u32,
/// }
///
/// let item = item::to_item(&User { id: "1".to_string(), age: 30 }).unwrap();
/// assert_eq!(item["age"].as_n(), Some("30"));
/// ```
pub fn to_item<T: Serialize>(value: &T) -> Result<Item> {
    let sdk_item: collections::HashMap<String, types::AttributeValue> =
        serde_dynamo::to_item(value)?;
    let mut item = sdk_item
        .into_iter()
        .map(|(name, value)| Ok((name, AttributeValue::try_from(value)?)))
        .collect::<Result<Item>>()?;
    item.sort_keys();
    Ok(item)
}

/// Deserializes an item into a typed value.
///
/// Sets deserialize into sequences, numbers into any numeric field.
pub fn from_item<T: DeserializeOwned>(item: Item) -> Result<T> {
    let sdk_item: collections::HashMap<String, types::AttributeValue> = item
        .into_iter()
        .map(|(name, value)| (name, value.into()))
        .collect();
    Ok(serde_dynamo::from_item(sdk_item)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq, Serialize)]
    struct User {
        id: String,
        age: u32,
    }

    #[test]
    fn test_to_item() {
        let item = to_item(&User {
            id: "1".to_string(),
            age: 30,
        })
        .unwrap();
        let expected = Item::from([
            ("age".to_string(), AttributeValue::N("30".to_string())),
            ("id".to_string(), AttributeValue::S("1".to_string())),
        ]);
        assert_eq!(item, expected);
        assert_eq!(item.keys().collect::<Vec<_>>(), vec!["age", "id"]);
    }

    #[test]
    fn test_to_item_rejects_booleans() {
        #[derive(Serialize)]
        struct Flag {
            on: bool,
        }
        assert!(to_item(&Flag { on: true }).is_err());
    }

    #[test]
    fn test_from_item() {
        let item = Item::from([
            ("id".to_string(), AttributeValue::S("2".to_string())),
            ("age".to_string(), AttributeValue::N("41".to_string())),
        ]);
        let user: User = from_item(item).unwrap();
        assert_eq!(
            user,
            User {
                id: "2".to_string(),
                age: 41,
            }
        );
    }
}
