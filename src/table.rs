//! Table lifecycle operations.
//!
//! This module provides operations for managing tables:
//! - Creating a table from a list of fields and a primary key
//! - Describing and deleting a table
//! - Listing table names
//! - Waiting until a table reaches a given status

/// Shared table description types.
pub mod common;

/// Create table operation.
pub mod create_table;

/// Delete table operation.
pub mod delete_table;

/// Describe table operation.
pub mod describe_table;

/// List tables operation, paginated over table names.
pub mod list_tables;

/// Polls a table until it reaches a status.
pub mod wait_for_table;
