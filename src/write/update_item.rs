use crate::client::Client;
use crate::common::{attribute::AttributeValue, item::Item, wire};
use crate::error::{Error, Result};
use crate::write;

use aws_sdk_dynamodb::types;
use indexmap::IndexMap;
use serde::Serialize;

/// One entry of the `AttributeUpdates` map.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
struct AttributeValueUpdate {
    #[serde(serialize_with = "wire::as_str")]
    action: types::AttributeAction,
    value: AttributeValue,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
struct UpdateItemInput {
    key: Item,
    attribute_updates: IndexMap<String, AttributeValueUpdate>,
    #[serde(flatten)]
    write_operation: write::common::WriteInput,
}

/// Update item operation.
///
/// Every entry of `fields` becomes an attribute update applying `action`,
/// which defaults to `PUT`. `ADD` increments numbers and extends sets;
/// `DELETE` removes values from a set.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::types;
/// use dynamodb_wire::{AttributeValue, Client, Item, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let update_item = write::update_item::UpdateItem {
///     item: Item::from([("id".to_string(), "1".into())]),
///     fields: Item::from([("tags".to_string(), AttributeValue::string_set(["new"]))]),
///     action: Some(types::AttributeAction::Add),
///     write_args: write::common::WriteArgs {
///         table_name: "users".to_string(),
///         return_values: Some(types::ReturnValue::UpdatedNew),
///         ..Default::default()
///     },
/// };
/// update_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateItem {
    /// The primary key of the item to update.
    pub item: Item,
    /// The attributes to write.
    pub fields: Item,
    /// The action applied to every field, `PUT` when unset.
    pub action: Option<types::AttributeAction>,
    /// Additional write operation arguments (table name, capacity, return values).
    pub write_args: write::common::WriteArgs,
}

impl TryFrom<UpdateItem> for UpdateItemInput {
    type Error = Error;

    fn try_from(update_item: UpdateItem) -> Result<Self> {
        write::common::require_key(&update_item.item)?;
        let write_operation: write::common::WriteInput = update_item.write_args.try_into()?;
        let action = update_item.action.unwrap_or(types::AttributeAction::Put);
        let attribute_updates = update_item
            .fields
            .into_iter()
            .map(|(name, value)| {
                let update = AttributeValueUpdate {
                    action: action.clone(),
                    value,
                };
                (name, update)
            })
            .collect();
        let operation = Self {
            key: update_item.item,
            attribute_updates,
            write_operation,
        };
        Ok(operation)
    }
}

impl UpdateItem {
    /// Execute the update item operation.
    #[tracing::instrument(name = "dynamodb_wire.update_item", skip_all, err)]
    pub async fn send(self, client: &Client) -> Result<write::common::WriteOutput> {
        let update_item: UpdateItemInput = self.try_into()?;
        client.call("UpdateItem", &update_item).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;

    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case::default_put(
        UpdateItem {
            item: Item::from([("id".to_string(), "1".into())]),
            fields: Item::from([
                ("name".to_string(), "Jane".into()),
                ("age".to_string(), 31.into()),
            ]),
            write_args: write::common::WriteArgs {
                table_name: "users".to_string(),
                ..Default::default()
            },
            ..Default::default()
        },
        json!({
            "TableName": "users",
            "Key": {"id": {"S": "1"}},
            "AttributeUpdates": {
                "name": {"Action": "PUT", "Value": {"S": "Jane"}},
                "age": {"Action": "PUT", "Value": {"N": "31"}},
            },
            "ReturnConsumedCapacity": "NONE",
        })
    )]
    #[case::add_to_set(
        UpdateItem {
            item: Item::from([
                ("device".to_string(), "d1".into()),
                ("at".to_string(), 1700000000.into()),
            ]),
            fields: Item::from([("tags".to_string(), AttributeValue::string_set(["x"]))]),
            action: Some(types::AttributeAction::Add),
            write_args: write::common::WriteArgs {
                table_name: "events".to_string(),
                capacity: true,
                return_values: Some(types::ReturnValue::UpdatedNew),
            },
        },
        json!({
            "TableName": "events",
            "Key": {"device": {"S": "d1"}, "at": {"N": "1700000000"}},
            "AttributeUpdates": {"tags": {"Action": "ADD", "Value": {"SS": ["x"]}}},
            "ReturnConsumedCapacity": "TOTAL",
            "ReturnValues": "UPDATED_NEW",
        })
    )]
    fn test_update_item_input(#[case] update_item: UpdateItem, #[case] expected: Value) {
        let input: UpdateItemInput = update_item.try_into().unwrap();
        assert_eq!(serde_json::to_value(&input).unwrap(), expected);
    }

    #[test]
    fn test_update_item_input_requires_key() {
        let update_item = UpdateItem {
            fields: Item::from([("name".to_string(), "Jane".into())]),
            write_args: write::common::WriteArgs {
                table_name: "users".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let result: Result<UpdateItemInput> = update_item.try_into();
        assert!(result.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_update_item_send_returns_attributes() {
        let transport = ScriptedTransport::new([json!({
            "Attributes": {"age": {"N": "32"}}
        })]);
        let client = transport.client();
        let output = UpdateItem {
            item: Item::from([("id".to_string(), "1".into())]),
            fields: Item::from([("age".to_string(), 1.into())]),
            action: Some(types::AttributeAction::Add),
            write_args: write::common::WriteArgs {
                table_name: "users".to_string(),
                return_values: Some(types::ReturnValue::UpdatedNew),
                ..Default::default()
            },
        }
        .send(&client)
        .await
        .unwrap();
        let attributes = output.attributes.unwrap();
        assert_eq!(attributes["age"], AttributeValue::N("32".to_string()));
        assert_eq!(transport.targets(), vec!["DynamoDB_20120810.UpdateItem"]);
    }
}
