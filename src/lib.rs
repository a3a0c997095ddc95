#![deny(missing_docs)]

//! # DynamoDB Wire
//!
//! A typed client for the DynamoDB JSON-over-HTTP protocol.
//!
//! ## Overview
//!
//! Every operation is a plain struct with public fields and an async `send`;
//! operations that span several round trips (listing tables, scanning,
//! batch-fetching, waiting for a table) also offer `each`, which hands
//! results to a callback as pages arrive. Under the hood:
//! - [`common::attribute`] maps values onto the tagged wire format
//!   (`{"S": ...}`, `{"N": ...}`, `{"SS": [...]}`)
//! - each operation renders its payload from typed arguments
//! - [`paginate`] drives multi-round operations until the service reports
//!   completion, within a configurable [`RetryPolicy`]
//! - [`client::Client`] wraps payloads in the signed request envelope and
//!   decodes service errors
//!
//! ## Quick Example
//!
//! ```no_run
//! use aws_sdk_dynamodb::types;
//! use dynamodb_wire::{AttributeValue, Client, ClientConfig, Item, read, table, write};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(ClientConfig::from_env());
//!
//! table::create_table::CreateTable {
//!     table_name: "users".to_string(),
//!     fields: vec![("id".to_string(), None)],
//!     primary: vec![("id".to_string(), None)],
//!     ..Default::default()
//! }
//! .send(&client)
//! .await?;
//! table::wait_for_table::WaitForTable {
//!     table_name: "users".to_string(),
//!     ..Default::default()
//! }
//! .send(&client)
//! .await?;
//!
//! write::put_item::PutItem {
//!     fields: Item::from([
//!         ("id".to_string(), "1".into()),
//!         ("tags".to_string(), AttributeValue::infer(json!(["admin", "ops"]))),
//!     ]),
//!     write_args: write::common::WriteArgs {
//!         table_name: "users".to_string(),
//!         ..Default::default()
//!     },
//! }
//! .send(&client)
//! .await?;
//!
//! let admins = read::scan::Scan {
//!     read_args: read::common::ReadArgs {
//!         table_name: "users".to_string(),
//!         ..Default::default()
//!     },
//!     filter: vec![dynamodb_wire::common::filter::Filter {
//!         field: "tags".to_string(),
//!         value: "admin".into(),
//!         compare: Some(types::ComparisonOperator::Contains),
//!     }],
//!     ..Default::default()
//! }
//! .send(&client)
//! .await?;
//! println!("{} admins", admins.count);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@common`] - Attribute values, keys, items, filters
//! - [`mod@table`] - Table lifecycle (CreateTable, DescribeTable, DeleteTable, ListTables, wait)
//! - [`mod@read`] - Read operations (GetItem, Scan, BatchGetItem)
//! - [`mod@write`] - Write operations (PutItem, UpdateItem, DeleteItem)

/// The client holding configuration, transport and signer.
pub mod client;

/// Common utilities for attribute values, keys, items and filters.
pub mod common;

/// Client configuration and credentials.
pub mod config;

/// Crate error type.
pub mod error;

/// The driver behind paginated and polling operations.
pub mod paginate;

/// Read operations for retrieving items.
pub mod read;

/// Request signing.
pub mod signer;

/// Table lifecycle operations.
pub mod table;

/// HTTP transport abstraction.
pub mod transport;

/// Write operations for modifying items.
pub mod write;

#[cfg(test)]
mod testing;

pub use client::Client;
pub use common::{attribute::AttributeValue, item::Item};
pub use config::{ClientConfig, Credentials};
pub use error::{Error, Result};
pub use paginate::RetryPolicy;
