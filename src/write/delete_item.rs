use crate::client::Client;
use crate::common::item::Item;
use crate::error::{Error, Result};
use crate::write;

use serde::Serialize;

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
struct DeleteItemInput {
    key: Item,
    #[serde(flatten)]
    write_operation: write::common::WriteInput,
}

/// Delete item operation.
///
/// ```rust,no_run
/// use dynamodb_wire::{Client, common, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let delete_item = write::delete_item::DeleteItem {
///     item: common::key::Keys::partition("id", "1").into(),
///     write_args: write::common::WriteArgs {
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
/// };
/// delete_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeleteItem {
    /// The primary key of the item to delete.
    pub item: Item,
    /// Additional write operation arguments (table name, capacity, return values).
    pub write_args: write::common::WriteArgs,
}

impl TryFrom<DeleteItem> for DeleteItemInput {
    type Error = Error;

    fn try_from(delete_item: DeleteItem) -> Result<Self> {
        write::common::require_key(&delete_item.item)?;
        let write_operation: write::common::WriteInput = delete_item.write_args.try_into()?;
        let operation = Self {
            key: delete_item.item,
            write_operation,
        };
        Ok(operation)
    }
}

impl DeleteItem {
    /// Execute the delete item operation.
    #[tracing::instrument(name = "dynamodb_wire.delete_item", skip_all, err)]
    pub async fn send(self, client: &Client) -> Result<write::common::WriteOutput> {
        let delete_item: DeleteItemInput = self.try_into()?;
        client.call("DeleteItem", &delete_item).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{attribute::AttributeValue, key};
    use crate::testing::ScriptedTransport;

    use aws_sdk_dynamodb::types;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case::partition_key(
        DeleteItem {
            item: key::Keys::partition("id", "1").into(),
            write_args: write::common::WriteArgs {
                table_name: "users".to_string(),
                ..Default::default()
            },
        },
        json!({
            "TableName": "users",
            "Key": {"id": {"S": "1"}},
            "ReturnConsumedCapacity": "NONE",
        })
    )]
    #[case::composite_key_all_old(
        DeleteItem {
            item: key::Keys {
                partition_key: key::Key::new("device", "d1"),
                sort_key: Some(key::Key::new("at", 7)),
            }
            .into(),
            write_args: write::common::WriteArgs {
                table_name: "events".to_string(),
                capacity: true,
                return_values: Some(types::ReturnValue::AllOld),
            },
        },
        json!({
            "TableName": "events",
            "Key": {"device": {"S": "d1"}, "at": {"N": "7"}},
            "ReturnConsumedCapacity": "TOTAL",
            "ReturnValues": "ALL_OLD",
        })
    )]
    fn test_delete_item_input(#[case] delete_item: DeleteItem, #[case] expected: Value) {
        let input: DeleteItemInput = delete_item.try_into().unwrap();
        assert_eq!(serde_json::to_value(&input).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_delete_item_send_returns_old_item() {
        let transport = ScriptedTransport::new([json!({
            "Attributes": {"id": {"S": "1"}, "name": {"S": "John"}}
        })]);
        let client = transport.client();
        let output = DeleteItem {
            item: key::Keys::partition("id", "1").into(),
            write_args: write::common::WriteArgs {
                table_name: "users".to_string(),
                return_values: Some(types::ReturnValue::AllOld),
                ..Default::default()
            },
        }
        .send(&client)
        .await
        .unwrap();
        let attributes = output.attributes.unwrap();
        assert_eq!(attributes["name"], AttributeValue::S("John".to_string()));
        assert_eq!(transport.targets(), vec!["DynamoDB_20120810.DeleteItem"]);
    }

    #[tokio::test]
    async fn test_delete_item_rejects_empty_key_without_request() {
        let transport = ScriptedTransport::default();
        let client = transport.client();
        let err = DeleteItem {
            write_args: write::common::WriteArgs {
                table_name: "users".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
        .send(&client)
        .await
        .unwrap_err();
        assert!(err.is_validation());
        assert!(transport.bodies().is_empty());
    }
}
