//! Common building blocks shared by every operation.
//!
//! This module holds the attribute value model and its codec, key and item
//! types, scan filters and table name validation.

/// Attribute values, their wire tags and the attribute codec.
pub mod attribute;

/// Scan filter conditions.
pub mod filter;

/// Items and typed item conversion.
pub mod item;

/// Key types for identifying items in tables.
pub mod key;

/// Table name validation.
pub mod table_name;

pub(crate) mod wire;

use aws_sdk_dynamodb::types;

/// `ReturnConsumedCapacity` for a `capacity` flag: `TOTAL` when set, else `NONE`.
pub(crate) fn return_consumed_capacity(capacity: bool) -> types::ReturnConsumedCapacity {
    if capacity {
        types::ReturnConsumedCapacity::Total
    } else {
        types::ReturnConsumedCapacity::None
    }
}

/// Capacity consumed by an operation, as reported with `ReturnConsumedCapacity`.
#[derive(Clone, Debug, Default, serde::Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ConsumedCapacity {
    /// The table the capacity was consumed on.
    pub table_name: Option<String>,
    /// Total capacity units consumed.
    pub capacity_units: Option<f64>,
    /// Read capacity units consumed.
    pub read_capacity_units: Option<f64>,
    /// Write capacity units consumed.
    pub write_capacity_units: Option<f64>,
}

/// Sums the capacity reported by several round trips of one operation.
pub(crate) fn aggregate_capacity(capacities: Vec<ConsumedCapacity>) -> Option<ConsumedCapacity> {
    if capacities.is_empty() {
        return None;
    }
    let (cap, read, write, table) = capacities.into_iter().fold(
        (0.0, 0.0, 0.0, None),
        |(cap, read, write, table), capacity| {
            (
                cap + capacity.capacity_units.unwrap_or(0.0),
                read + capacity.read_capacity_units.unwrap_or(0.0),
                write + capacity.write_capacity_units.unwrap_or(0.0),
                table.or(capacity.table_name),
            )
        },
    );
    Some(ConsumedCapacity {
        table_name: table,
        capacity_units: Some(cap),
        read_capacity_units: Some(read),
        write_capacity_units: Some(write),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_capacity() {
        let capacities = vec![
            ConsumedCapacity {
                table_name: Some("a".to_string()),
                capacity_units: Some(1.5),
                ..Default::default()
            },
            ConsumedCapacity {
                capacity_units: Some(2.0),
                read_capacity_units: Some(2.0),
                ..Default::default()
            },
        ];
        let expected = ConsumedCapacity {
            table_name: Some("a".to_string()),
            capacity_units: Some(3.5),
            read_capacity_units: Some(2.0),
            write_capacity_units: Some(0.0),
        };
        assert_eq!(aggregate_capacity(capacities), Some(expected));
        assert_eq!(aggregate_capacity(Vec::new()), None);
    }
}
