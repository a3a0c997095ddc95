use crate::client::Client;
use crate::common::{self, ConsumedCapacity, filter, item::Item};
use crate::error::{Error, Result};
use crate::paginate::{self, Cursor};
use crate::read;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ScanInput {
    #[serde(flatten)]
    read_operation: read::common::ReadInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<i32>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    scan_filter: IndexMap<String, filter::FilterCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exclusive_start_key: Option<Item>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ScanPage {
    #[serde(default)]
    items: Vec<Item>,
    #[serde(default)]
    count: i64,
    #[serde(default)]
    scanned_count: i64,
    last_evaluated_key: Option<Item>,
    consumed_capacity: Option<ConsumedCapacity>,
}

struct ScanCursor<F> {
    input: ScanInput,
    callback: F,
    count: i64,
    scanned_count: i64,
    capacities: Vec<ConsumedCapacity>,
    complete: bool,
}

impl<F: FnMut(Item)> Cursor for ScanCursor<F> {
    type Input = ScanInput;
    type Output = ScanPage;

    const TARGET: &'static str = "Scan";

    fn input(&self) -> &Self::Input {
        &self.input
    }

    fn advance(&mut self, page: Self::Output) -> Result<()> {
        page.items.into_iter().for_each(&mut self.callback);
        self.count += page.count;
        self.scanned_count += page.scanned_count;
        self.capacities.extend(page.consumed_capacity);
        self.complete = page.last_evaluated_key.is_none();
        self.input.exclusive_start_key = page.last_evaluated_key;
        Ok(())
    }

    fn is_complete(&self) -> bool {
        self.complete
    }
}

/// Scan results collected over every page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanOutput {
    /// Matching items, in page order.
    pub items: Vec<Item>,
    /// Number of matching items.
    pub count: i64,
    /// Number of items evaluated before filtering.
    pub scanned_count: i64,
    /// Capacity consumed over every page, when requested.
    pub consumed_capacity: Option<ConsumedCapacity>,
}

/// Scan operation.
///
/// Reads the whole table, page by page, following `LastEvaluatedKey`.
/// `limit` bounds the items evaluated per page, not the total.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::types::ComparisonOperator;
/// use dynamodb_wire::{Client, common, read};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let scan = read::scan::Scan {
///     read_args: read::common::ReadArgs {
///         table_name: "users".to_string(),
///         fields: Some(vec!["id".to_string(), "age".to_string()]),
///         ..Default::default()
///     },
///     filter: vec![common::filter::Filter {
///         field: "age".to_string(),
///         value: 18.into(),
///         compare: Some(ComparisonOperator::Ge),
///     }],
///     ..Default::default()
/// };
/// scan.each(client, |item| println!("{item:?}")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scan {
    /// Additional read operation arguments (table name, fields, consistent read).
    pub read_args: read::common::ReadArgs,
    /// Maximum number of items evaluated per page.
    pub limit: Option<i32>,
    /// Conditions every returned item must satisfy.
    pub filter: Vec<filter::Filter>,
    /// Resume a scan after this key.
    pub exclusive_start_key: Option<Item>,
}

impl TryFrom<Scan> for ScanInput {
    type Error = Error;

    fn try_from(scan: Scan) -> Result<Self> {
        let read_operation: read::common::ReadInput = scan.read_args.try_into()?;
        if scan.limit.is_some_and(|limit| limit < 1) {
            return Err(Error::Validation("limit must be at least 1".to_string()));
        }
        let operation = Self {
            read_operation,
            limit: scan.limit,
            scan_filter: filter::scan_filter(scan.filter),
            exclusive_start_key: scan.exclusive_start_key,
        };
        Ok(operation)
    }
}

impl Scan {
    #[tracing::instrument(name = "dynamodb_wire.scan", skip_all, err)]
    async fn run<F: FnMut(Item)>(self, client: &Client, callback: F) -> Result<ScanOutput> {
        let input: ScanInput = self.try_into()?;
        let mut cursor = ScanCursor {
            input,
            callback,
            count: 0,
            scanned_count: 0,
            capacities: Vec::new(),
            complete: false,
        };
        paginate::drive(client, client.config().pagination, &mut cursor).await?;
        Ok(ScanOutput {
            items: Vec::new(),
            count: cursor.count,
            scanned_count: cursor.scanned_count,
            consumed_capacity: common::aggregate_capacity(cursor.capacities),
        })
    }

    /// Calls `callback` once per matching item, in page order.
    pub async fn each<F: FnMut(Item)>(self, client: &Client, callback: F) -> Result<()> {
        self.run(client, callback).await?;
        Ok(())
    }

    /// Collects every matching item.
    pub async fn send(self, client: &Client) -> Result<ScanOutput> {
        let mut items = Vec::new();
        let output = self.run(client, |item| items.push(item)).await?;
        Ok(ScanOutput { items, ..output })
    }
}
