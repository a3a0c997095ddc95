use crate::common::{self, table_name, wire};
use crate::error::{Error, Result};

use aws_sdk_dynamodb::types;
use serde::Serialize;

/// Internal representation of read operation parameters, flattened into the
/// get item and scan payloads.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ReadInput {
    pub(crate) table_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) attributes_to_get: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) consistent_read: Option<bool>,
    #[serde(serialize_with = "wire::as_str")]
    pub(crate) return_consumed_capacity: types::ReturnConsumedCapacity,
}

/// Arguments common to table-scoped read operations (GetItem, Scan).
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ReadArgs {
    /// The name of the table to read from.
    pub table_name: String,
    /// Attributes to return; all of them when `None`.
    pub fields: Option<Vec<String>>,
    /// Whether to use strongly consistent reads.
    pub consistent_read: Option<bool>,
    /// Whether to report the consumed capacity (`TOTAL`) or not (`NONE`).
    pub capacity: bool,
}

impl TryFrom<ReadArgs> for ReadInput {
    type Error = Error;

    fn try_from(args: ReadArgs) -> Result<Self> {
        table_name::validate(&args.table_name)?;
        if args.fields.as_ref().is_some_and(Vec::is_empty) {
            return Err(Error::Validation(
                "fields must name at least one attribute".to_string(),
            ));
        }
        let input = Self {
            table_name: args.table_name,
            attributes_to_get: args.fields,
            consistent_read: args.consistent_read,
            return_consumed_capacity: common::return_consumed_capacity(args.capacity),
        };
        Ok(input)
    }
}
