use crate::common::{self, ConsumedCapacity, item::Item, table_name, wire};
use crate::error::{Error, Result};

use aws_sdk_dynamodb::types;
use serde::{Deserialize, Serialize};

/// Internal representation of write operation parameters, flattened into
/// every write payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct WriteInput {
    pub(crate) table_name: String,
    #[serde(serialize_with = "wire::as_str")]
    pub(crate) return_consumed_capacity: types::ReturnConsumedCapacity,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "wire::option_as_str"
    )]
    pub(crate) return_values: Option<types::ReturnValue>,
}

/// Arguments common to all write operations (Put, Update, Delete).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteArgs {
    /// The name of the table to write to.
    pub table_name: String,
    /// Whether to report the consumed capacity (`TOTAL`) or not (`NONE`).
    pub capacity: bool,
    /// Which item attributes to return in the response.
    ///
    /// Options: `AllOld`, `AllNew`, `UpdatedOld`, `UpdatedNew`, or `None`.
    pub return_values: Option<types::ReturnValue>,
}

impl TryFrom<WriteArgs> for WriteInput {
    type Error = Error;

    fn try_from(args: WriteArgs) -> Result<Self> {
        table_name::validate(&args.table_name)?;
        let input = Self {
            table_name: args.table_name,
            return_consumed_capacity: common::return_consumed_capacity(args.capacity),
            return_values: args.return_values,
        };
        Ok(input)
    }
}

/// Rejects an empty key before a request is built.
pub(crate) fn require_key(key: &Item) -> Result<()> {
    if key.is_empty() {
        return Err(Error::Validation("item key must not be empty".to_string()));
    }
    Ok(())
}

/// Response of a write operation.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WriteOutput {
    /// Attributes requested through `return_values`.
    pub attributes: Option<Item>,
    /// Capacity consumed, when requested.
    pub consumed_capacity: Option<ConsumedCapacity>,
}
