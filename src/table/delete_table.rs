use crate::client::Client;
use crate::common::table_name;
use crate::error::Result;
use crate::table::common::{TableDescription, TableDescriptionOutput, TableNameInput};

/// Delete table operation.
///
/// ```rust,no_run
/// use dynamodb_wire::{Client, table};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// table::delete_table::DeleteTable {
///     table_name: "users".to_string(),
/// }
/// .send(client)
/// .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct DeleteTable {
    /// The name of the table to delete.
    pub table_name: String,
}

impl DeleteTable {
    /// Execute the delete table operation.
    #[tracing::instrument(name = "dynamodb_wire.delete_table", skip_all, err)]
    pub async fn send(self, client: &Client) -> Result<TableDescription> {
        table_name::validate(&self.table_name)?;
        let input = TableNameInput {
            table_name: self.table_name,
        };
        let output: TableDescriptionOutput = client.call("DeleteTable", &input).await?;
        Ok(output.table_description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;

    use aws_sdk_dynamodb::types;
    use rstest::rstest;
    use serde_json::json;

    #[tokio::test]
    async fn test_delete_table_send() {
        let transport = ScriptedTransport::new([json!({
            "TableDescription": {"TableName": "users", "TableStatus": "DELETING"}
        })]);
        let client = transport.client();
        let description = DeleteTable {
            table_name: "users".to_string(),
        }
        .send(&client)
        .await
        .unwrap();
        assert_eq!(description.status(), Some(types::TableStatus::Deleting));
        assert_eq!(transport.bodies(), vec![json!({"TableName": "users"})]);
        assert_eq!(transport.targets(), vec!["DynamoDB_20120810.DeleteTable"]);
    }

    #[rstest]
    #[case::empty("")]
    #[case::too_short("ab")]
    #[case::invalid_character("users table")]
    #[tokio::test]
    async fn test_delete_table_rejects_invalid_name(#[case] name: &str) {
        let transport = ScriptedTransport::default();
        let client = transport.client();
        let err = DeleteTable {
            table_name: name.to_string(),
        }
        .send(&client)
        .await
        .unwrap_err();
        assert!(err.is_validation());
        assert!(transport.bodies().is_empty());
    }
}
