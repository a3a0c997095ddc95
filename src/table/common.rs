use crate::common::wire;

use aws_sdk_dynamodb::types;
use serde::{Deserialize, Serialize};

/// Name and scalar type of an attribute used in a key schema.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeDefinition {
    /// The attribute name.
    pub attribute_name: String,
    /// The attribute type (`S`, `N` or `B`).
    #[serde(serialize_with = "wire::as_str", deserialize_with = "wire::from_str")]
    pub attribute_type: types::ScalarAttributeType,
}

/// Name and role of a primary key attribute.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeySchemaElement {
    /// The attribute name.
    pub attribute_name: String,
    /// `HASH` or `RANGE`.
    #[serde(serialize_with = "wire::as_str", deserialize_with = "wire::from_str")]
    pub key_type: types::KeyType,
}

/// Provisioned read and write capacity of a table.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionedThroughput {
    /// Read capacity units.
    pub read_capacity_units: i64,
    /// Write capacity units.
    pub write_capacity_units: i64,
}

/// Table metadata as returned by create, describe and delete.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct TableDescription {
    /// The table name.
    pub table_name: Option<String>,
    /// The raw table status, e.g. `CREATING` or `ACTIVE`.
    pub table_status: Option<String>,
    /// Attributes used by the key schema.
    #[serde(default)]
    pub attribute_definitions: Vec<AttributeDefinition>,
    /// The primary key.
    #[serde(default)]
    pub key_schema: Vec<KeySchemaElement>,
    /// Approximate number of items.
    pub item_count: Option<i64>,
    /// Approximate size in bytes.
    pub table_size_bytes: Option<i64>,
    /// Creation time, in seconds since the epoch.
    pub creation_date_time: Option<f64>,
    /// Provisioned capacity, when the service reports it.
    pub provisioned_throughput: Option<ProvisionedThroughputDescription>,
    /// The table ARN.
    pub table_arn: Option<String>,
}

impl TableDescription {
    /// The table status as a service enum.
    #[must_use]
    pub fn status(&self) -> Option<types::TableStatus> {
        self.table_status.as_deref().map(types::TableStatus::from)
    }
}

/// Provisioned capacity as reported by the service.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionedThroughputDescription {
    /// Read capacity units.
    pub read_capacity_units: Option<i64>,
    /// Write capacity units.
    pub write_capacity_units: Option<i64>,
    /// Number of decreases made today.
    pub number_of_decreases_today: Option<i64>,
}

/// `{"TableName": ...}`, the input of describe and delete.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TableNameInput {
    pub(crate) table_name: String,
}

/// `{"Table": {...}}`, returned by describe.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TableOutput {
    pub(crate) table: TableDescription,
}

/// `{"TableDescription": {...}}`, returned by create and delete.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TableDescriptionOutput {
    pub(crate) table_description: TableDescription,
}
