use crate::client::Client;
use crate::common::{self, ConsumedCapacity, item::Item, key::Keys, table_name, wire};
use crate::error::{Error, Result};
use crate::paginate::{self, Cursor};

use aws_sdk_dynamodb::types;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Keys requested from one table; the service echoes this shape back under
/// `UnprocessedKeys`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
struct KeysAndAttributes {
    keys: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attributes_to_get: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    consistent_read: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
struct BatchGetItemInput {
    request_items: IndexMap<String, KeysAndAttributes>,
    #[serde(serialize_with = "wire::as_str")]
    return_consumed_capacity: types::ReturnConsumedCapacity,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BatchGetItemPage {
    #[serde(default)]
    responses: IndexMap<String, Vec<Item>>,
    #[serde(default)]
    unprocessed_keys: IndexMap<String, KeysAndAttributes>,
    #[serde(default)]
    consumed_capacity: Vec<ConsumedCapacity>,
}

struct UnprocessedKeys<F> {
    input: BatchGetItemInput,
    callback: F,
    capacities: Vec<ConsumedCapacity>,
    complete: bool,
}

impl<F: FnMut(&str, Item)> Cursor for UnprocessedKeys<F> {
    type Input = BatchGetItemInput;
    type Output = BatchGetItemPage;

    const TARGET: &'static str = "BatchGetItem";

    fn input(&self) -> &Self::Input {
        &self.input
    }

    fn advance(&mut self, page: Self::Output) -> Result<()> {
        for (table, items) in page.responses {
            for item in items {
                (self.callback)(&table, item);
            }
        }
        self.capacities.extend(page.consumed_capacity);
        self.complete = page.unprocessed_keys.values().all(|keys| keys.keys.is_empty());
        self.input.request_items = page.unprocessed_keys;
        Ok(())
    }

    fn is_complete(&self) -> bool {
        self.complete
    }
}

/// Items fetched by a batch get, grouped by table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchGetItemOutput {
    /// Items per table, in the order the service returned them.
    pub responses: IndexMap<String, Vec<Item>>,
    /// Capacity consumed over every round, when requested.
    pub consumed_capacity: Option<ConsumedCapacity>,
}

/// Batch get item operation.
///
/// Re-requests whatever the service reports under `UnprocessedKeys` until
/// nothing is left.
///
/// ```rust,no_run
/// use dynamodb_wire::{Client, common, read};
/// use indexmap::IndexMap;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let batch_get = read::batch_get_item::BatchGetItem {
///     items: IndexMap::from([(
///         "users".to_string(),
///         vec![
///             common::key::Keys::partition("id", "1"),
///             common::key::Keys::partition("id", "2"),
///         ],
///     )]),
///     ..Default::default()
/// };
/// batch_get
///     .each(client, |table, item| println!("{table}: {item:?}"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchGetItem {
    /// Keys to fetch, per table.
    pub items: IndexMap<String, Vec<Keys>>,
    /// Whether to report the consumed capacity (`TOTAL`) or not (`NONE`).
    pub capacity: bool,
}

impl TryFrom<BatchGetItem> for BatchGetItemInput {
    type Error = Error;

    fn try_from(batch_get_item: BatchGetItem) -> Result<Self> {
        if batch_get_item.items.is_empty() {
            return Err(Error::Validation(
                "batch get needs at least one table".to_string(),
            ));
        }
        let mut request_items = IndexMap::with_capacity(batch_get_item.items.len());
        for (table, keys) in batch_get_item.items {
            table_name::validate(&table)?;
            if keys.is_empty() {
                return Err(Error::Validation(format!(
                    "batch get on table {table:?} has no keys"
                )));
            }
            let keys_and_attributes = KeysAndAttributes {
                keys: keys.into_iter().map(Item::from).collect(),
                attributes_to_get: None,
                consistent_read: None,
            };
            request_items.insert(table, keys_and_attributes);
        }
        let input = Self {
            request_items,
            return_consumed_capacity: common::return_consumed_capacity(batch_get_item.capacity),
        };
        Ok(input)
    }
}

impl BatchGetItem {
    #[tracing::instrument(name = "dynamodb_wire.batch_get_item", skip_all, err)]
    async fn run<F: FnMut(&str, Item)>(
        self,
        client: &Client,
        callback: F,
    ) -> Result<Option<ConsumedCapacity>> {
        let input: BatchGetItemInput = self.try_into()?;
        let mut cursor = UnprocessedKeys {
            input,
            callback,
            capacities: Vec::new(),
            complete: false,
        };
        paginate::drive(client, client.config().pagination, &mut cursor).await?;
        Ok(common::aggregate_capacity(cursor.capacities))
    }

    /// Calls `callback` with the table name and item for every item
    /// returned, across all rounds.
    pub async fn each<F: FnMut(&str, Item)>(self, client: &Client, callback: F) -> Result<()> {
        self.run(client, callback).await?;
        Ok(())
    }

    /// Collects every returned item, grouped by table.
    pub async fn send(self, client: &Client) -> Result<BatchGetItemOutput> {
        let mut responses: IndexMap<String, Vec<Item>> = IndexMap::new();
        let consumed_capacity = self
            .run(client, |table, item| {
                responses.entry(table.to_string()).or_default().push(item);
            })
            .await?;
        Ok(BatchGetItemOutput {
            responses,
            consumed_capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{attribute::AttributeValue, key};
    use crate::testing::ScriptedTransport;

    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case::single_table(
        BatchGetItem {
            items: IndexMap::from([(
                "users".to_string(),
                vec![key::Keys::partition("id", "1"), key::Keys::partition("id", "2")],
            )]),
            ..Default::default()
        },
        json!({
            "RequestItems": {
                "users": {"Keys": [{"id": {"S": "1"}}, {"id": {"S": "2"}}]},
            },
            "ReturnConsumedCapacity": "NONE",
        })
    )]
    #[case::two_tables_composite_key(
        BatchGetItem {
            items: IndexMap::from([
                ("users".to_string(), vec![key::Keys::partition("id", "1")]),
                (
                    "events".to_string(),
                    vec![key::Keys {
                        partition_key: key::Key::new("device", "d1"),
                        sort_key: Some(key::Key::new("at", 3)),
                    }],
                ),
            ]),
            capacity: true,
        },
        json!({
            "RequestItems": {
                "users": {"Keys": [{"id": {"S": "1"}}]},
                "events": {"Keys": [{"device": {"S": "d1"}, "at": {"N": "3"}}]},
            },
            "ReturnConsumedCapacity": "TOTAL",
        })
    )]
    fn test_batch_get_item_input(#[case] batch_get_item: BatchGetItem, #[case] expected: Value) {
        let input: BatchGetItemInput = batch_get_item.try_into().unwrap();
        assert_eq!(serde_json::to_value(&input).unwrap(), expected);
    }

    #[rstest]
    #[case::no_tables(BatchGetItem::default())]
    #[case::no_keys(BatchGetItem {
        items: IndexMap::from([("users".to_string(), Vec::new())]),
        ..Default::default()
    })]
    #[case::invalid_table_name(BatchGetItem {
        items: IndexMap::from([("u".to_string(), vec![key::Keys::partition("id", "1")])]),
        ..Default::default()
    })]
    fn test_batch_get_item_input_validation(#[case] batch_get_item: BatchGetItem) {
        let result: Result<BatchGetItemInput> = batch_get_item.try_into();
        assert!(result.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_batch_get_item_follows_unprocessed_keys() {
        let transport = ScriptedTransport::new([
            json!({
                "Responses": {"users": [{"id": {"S": "1"}}]},
                "UnprocessedKeys": {"users": {"Keys": [{"id": {"S": "2"}}]}},
                "ConsumedCapacity": [{"TableName": "users", "CapacityUnits": 0.5}],
            }),
            json!({
                "Responses": {"users": [{"id": {"S": "2"}}]},
                "UnprocessedKeys": {},
                "ConsumedCapacity": [{"TableName": "users", "CapacityUnits": 0.5}],
            }),
        ]);
        let client = transport.client();
        let batch_get_item = BatchGetItem {
            items: IndexMap::from([(
                "users".to_string(),
                vec![key::Keys::partition("id", "1"), key::Keys::partition("id", "2")],
            )]),
            capacity: true,
        };
        let mut calls = Vec::new();
        batch_get_item
            .clone()
            .each(&client, |table, item| calls.push((table.to_string(), item)))
            .await
            .unwrap();
        assert_eq!(
            calls,
            vec![
                (
                    "users".to_string(),
                    Item::from([("id".to_string(), AttributeValue::S("1".to_string()))])
                ),
                (
                    "users".to_string(),
                    Item::from([("id".to_string(), AttributeValue::S("2".to_string()))])
                ),
            ]
        );
        let bodies = transport.bodies();
        assert_eq!(bodies.len(), 2);
        assert_eq!(
            bodies[1],
            json!({
                "RequestItems": {"users": {"Keys": [{"id": {"S": "2"}}]}},
                "ReturnConsumedCapacity": "TOTAL",
            })
        );
        assert_eq!(transport.targets(), vec!["DynamoDB_20120810.BatchGetItem"; 2]);
    }

    #[tokio::test]
    async fn test_batch_get_item_send_groups_by_table() {
        let transport = ScriptedTransport::new([json!({
            "Responses": {
                "users": [{"id": {"S": "1"}}],
                "events": [{"device": {"S": "d1"}, "at": {"N": "3"}}],
            },
            "ConsumedCapacity": [
                {"TableName": "users", "CapacityUnits": 0.5},
                {"TableName": "events", "CapacityUnits": 1.0},
            ],
        })]);
        let client = transport.client();
        let output = BatchGetItem {
            items: IndexMap::from([
                ("users".to_string(), vec![key::Keys::partition("id", "1")]),
                (
                    "events".to_string(),
                    vec![key::Keys {
                        partition_key: key::Key::new("device", "d1"),
                        sort_key: Some(key::Key::new("at", 3)),
                    }],
                ),
            ]),
            capacity: true,
        }
        .send(&client)
        .await
        .unwrap();
        assert_eq!(output.responses["users"].len(), 1);
        assert_eq!(
            output.responses["events"][0]["at"],
            AttributeValue::N("3".to_string())
        );
        assert_eq!(
            output.consumed_capacity.and_then(|c| c.capacity_units),
            Some(1.5)
        );
        assert_eq!(transport.bodies().len(), 1);
    }
}
