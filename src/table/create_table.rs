use crate::client::Client;
use crate::common::table_name;
use crate::error::{Error, Result};
use crate::table::common::{
    AttributeDefinition, KeySchemaElement, ProvisionedThroughput, TableDescription,
    TableDescriptionOutput,
};

use aws_sdk_dynamodb::types;
use serde::Serialize;

const DEFAULT_CAPACITY_UNITS: i64 = 5;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CreateTableInput {
    table_name: String,
    attribute_definitions: Vec<AttributeDefinition>,
    key_schema: Vec<KeySchemaElement>,
    provisioned_throughput: ProvisionedThroughput,
}

/// Create table operation.
///
/// Every entry of `fields` becomes an attribute definition, typed `S` unless
/// stated otherwise. Every entry of `primary` must name one of `fields`; its
/// role defaults to `HASH`.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::types;
/// use dynamodb_wire::{Client, table};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let create_table = table::create_table::CreateTable {
///     table_name: "users".to_string(),
///     fields: vec![
///         ("id".to_string(), None),
///         ("created".to_string(), Some(types::ScalarAttributeType::N)),
///     ],
///     primary: vec![
///         ("id".to_string(), None),
///         ("created".to_string(), Some(types::KeyType::Range)),
///     ],
///     ..Default::default()
/// };
/// create_table.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateTable {
    /// The name of the table to create.
    pub table_name: String,
    /// Attribute names and types, in order.
    pub fields: Vec<(String, Option<types::ScalarAttributeType>)>,
    /// Primary key attribute names and roles, in order.
    pub primary: Vec<(String, Option<types::KeyType>)>,
    /// Read capacity units, 5 when unset.
    pub read_capacity: Option<i64>,
    /// Write capacity units, 5 when unset.
    pub write_capacity: Option<i64>,
}

impl TryFrom<CreateTable> for CreateTableInput {
    type Error = Error;

    fn try_from(create_table: CreateTable) -> Result<Self> {
        table_name::validate(&create_table.table_name)?;
        let attribute_definitions: Vec<AttributeDefinition> = create_table
            .fields
            .into_iter()
            .map(|(attribute_name, attribute_type)| AttributeDefinition {
                attribute_name,
                attribute_type: attribute_type.unwrap_or(types::ScalarAttributeType::S),
            })
            .collect();
        let mut key_schema = Vec::with_capacity(create_table.primary.len());
        for (attribute_name, key_type) in create_table.primary {
            if !attribute_definitions
                .iter()
                .any(|definition| definition.attribute_name == attribute_name)
            {
                return Err(Error::Validation(format!(
                    "primary key field {attribute_name:?} is not one of the table fields"
                )));
            }
            key_schema.push(KeySchemaElement {
                attribute_name,
                key_type: key_type.unwrap_or(types::KeyType::Hash),
            });
        }
        let input = Self {
            table_name: create_table.table_name,
            attribute_definitions,
            key_schema,
            provisioned_throughput: ProvisionedThroughput {
                read_capacity_units: create_table.read_capacity.unwrap_or(DEFAULT_CAPACITY_UNITS),
                write_capacity_units: create_table
                    .write_capacity
                    .unwrap_or(DEFAULT_CAPACITY_UNITS),
            },
        };
        Ok(input)
    }
}

impl CreateTable {
    /// Execute the create table operation.
    #[tracing::instrument(name = "dynamodb_wire.create_table", skip_all, err)]
    pub async fn send(self, client: &Client) -> Result<TableDescription> {
        let input: CreateTableInput = self.try_into()?;
        let output: TableDescriptionOutput = client.call("CreateTable", &input).await?;
        Ok(output.table_description)
    }
}
