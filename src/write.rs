//! Write operations for modifying items.
//!
//! This module provides operations for writing items:
//! - Putting new items or replacing existing ones
//! - Updating attributes of an item with a per-field action
//! - Deleting items by primary key

/// Common utilities and types for write operations.
pub mod common;

/// Delete item operation for removing items from tables.
pub mod delete_item;

/// Put item operation for creating or replacing items.
pub mod put_item;

/// Update item operation for modifying existing items.
pub mod update_item;
