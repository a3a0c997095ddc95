use crate::client::Client;
use crate::common::item::Item;
use crate::error::{Error, Result};
use crate::read;

use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
struct GetItemInput {
    key: Item,
    #[serde(flatten)]
    read_operation: read::common::ReadInput,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetItemOutput {
    item: Option<Item>,
}

/// Get item operation.
///
/// Returns `None` when no item has the given key.
///
/// ```rust,no_run
/// use dynamodb_wire::{Client, common, read};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let get_item = read::get_item::GetItem {
///     keys: common::key::Keys::partition("id", "1").into(),
///     read_args: read::common::ReadArgs {
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
/// };
/// if let Some(item) = get_item.send(client).await? {
///     println!("{item:?}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItem {
    /// The primary key of the item to retrieve.
    pub keys: Item,
    /// Additional read operation arguments (table name, fields, consistent read).
    pub read_args: read::common::ReadArgs,
}

impl TryFrom<GetItem> for GetItemInput {
    type Error = Error;

    fn try_from(get_item: GetItem) -> Result<Self> {
        if get_item.keys.is_empty() {
            return Err(Error::Validation("item key must not be empty".to_string()));
        }
        let read_operation: read::common::ReadInput = get_item.read_args.try_into()?;
        let operation = Self {
            key: get_item.keys,
            read_operation,
        };
        Ok(operation)
    }
}

impl GetItem {
    /// Execute the get item operation.
    #[tracing::instrument(name = "dynamodb_wire.get_item", skip_all, err)]
    pub async fn send(self, client: &Client) -> Result<Option<Item>> {
        let get_item: GetItemInput = self.try_into()?;
        let output: GetItemOutput = client.call("GetItem", &get_item).await?;
        Ok(output.item)
    }
}
