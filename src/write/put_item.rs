use crate::client::Client;
use crate::common::item::Item;
use crate::error::{Error, Result};
use crate::write;

use serde::Serialize;

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PutItemInput {
    item: Item,
    #[serde(flatten)]
    write_operation: write::common::WriteInput,
}

/// Put item operation.
///
/// ```rust,no_run
/// use dynamodb_wire::{Client, Item, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let put_item = write::put_item::PutItem {
///     fields: Item::from([
///         ("id".to_string(), "1".into()),
///         ("age".to_string(), 30.into()),
///     ]),
///     write_args: write::common::WriteArgs {
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
/// };
/// put_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PutItem {
    /// The attributes of the item to put.
    pub fields: Item,
    /// Additional write operation arguments (table name, capacity, return values).
    pub write_args: write::common::WriteArgs,
}

impl TryFrom<PutItem> for PutItemInput {
    type Error = Error;

    fn try_from(put_item: PutItem) -> Result<Self> {
        let write_operation: write::common::WriteInput = put_item.write_args.try_into()?;
        let operation = Self {
            item: put_item.fields,
            write_operation,
        };
        Ok(operation)
    }
}

impl PutItem {
    /// Execute the put item operation.
    #[tracing::instrument(name = "dynamodb_wire.put_item", skip_all, err)]
    pub async fn send(self, client: &Client) -> Result<write::common::WriteOutput> {
        let put_item: PutItemInput = self.try_into()?;
        client.call("PutItem", &put_item).await
    }
}
