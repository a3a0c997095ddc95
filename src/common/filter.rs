use crate::common::attribute::AttributeValue;

use aws_sdk_dynamodb::types;
use indexmap::IndexMap;
use serde::Serialize;

/// A scan filter on a single attribute.
///
/// ```rust
/// use aws_sdk_dynamodb::types::ComparisonOperator;
/// use dynamodb_wire::common::filter;
///
/// let adults = filter::Filter {
///     field: "age".to_string(),
///     value: 18.into(),
///     compare: Some(ComparisonOperator::Ge),
/// };
/// let johns = filter::Filter::equals("name", "John");
/// # let _ = (adults, johns);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    /// The attribute to compare.
    pub field: String,
    /// The value to compare against. Ignored by `NULL` and `NOT_NULL`.
    pub value: AttributeValue,
    /// The comparison, `EQ` when `None`.
    pub compare: Option<types::ComparisonOperator>,
}

impl Filter {
    /// Equality filter.
    pub fn equals(field: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            compare: None,
        }
    }
}

/// One entry of the `ScanFilter` map.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct FilterCondition {
    pub(crate) attribute_value_list: Vec<AttributeValue>,
    #[serde(serialize_with = "crate::common::wire::as_str")]
    pub(crate) comparison_operator: types::ComparisonOperator,
}

impl From<Filter> for (String, FilterCondition) {
    fn from(filter: Filter) -> Self {
        let comparison_operator = filter.compare.unwrap_or(types::ComparisonOperator::Eq);
        let attribute_value_list = match comparison_operator {
            types::ComparisonOperator::Null | types::ComparisonOperator::NotNull => Vec::new(),
            _ => vec![filter.value],
        };
        let condition = FilterCondition {
            attribute_value_list,
            comparison_operator,
        };
        (filter.field, condition)
    }
}

/// Renders filters into a `ScanFilter` map; a later filter on the same
/// field replaces an earlier one.
pub(crate) fn scan_filter(filters: Vec<Filter>) -> IndexMap<String, FilterCondition> {
    filters.into_iter().map(Into::into).collect()
}
