//! Read operations for retrieving items.
//!
//! This module provides operations for reading items:
//! - Getting individual items by primary key
//! - Scanning entire tables with optional filters
//! - Batch retrieving items across tables, following unprocessed keys

/// Batch get item operation for retrieving multiple items efficiently.
pub mod batch_get_item;

/// Common utilities and types for read operations.
pub mod common;

/// Get item operation for retrieving a single item by primary key.
pub mod get_item;

/// Scan operation for retrieving all items from a table.
pub mod scan;
