use crate::client::Client;
use crate::error::Result;
use crate::paginate::{self, Cursor};

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ListTablesInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    exclusive_start_table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListTablesOutput {
    #[serde(default)]
    table_names: Vec<String>,
    last_evaluated_table_name: Option<String>,
}

struct TableNames<F> {
    input: ListTablesInput,
    callback: F,
    complete: bool,
}

impl<F: FnMut(String)> Cursor for TableNames<F> {
    type Input = ListTablesInput;
    type Output = ListTablesOutput;

    const TARGET: &'static str = "ListTables";

    fn input(&self) -> &Self::Input {
        &self.input
    }

    fn advance(&mut self, output: Self::Output) -> Result<()> {
        output.table_names.into_iter().for_each(&mut self.callback);
        self.complete = output.last_evaluated_table_name.is_none();
        self.input.exclusive_start_table_name = output.last_evaluated_table_name;
        Ok(())
    }

    fn is_complete(&self) -> bool {
        self.complete
    }
}

/// List tables operation.
///
/// Follows `LastEvaluatedTableName` until the service stops returning one.
///
/// ```rust,no_run
/// use dynamodb_wire::{Client, table};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// table::list_tables::ListTables::default()
///     .each(client, |name| println!("{name}"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ListTables {
    /// Maximum number of names per page.
    pub limit: Option<i32>,
    /// Start listing after this table name.
    pub exclusive_start_table_name: Option<String>,
}

impl ListTables {
    /// Calls `callback` once per table name, in service order.
    #[tracing::instrument(name = "dynamodb_wire.list_tables", skip_all, err)]
    pub async fn each<F: FnMut(String)>(self, client: &Client, callback: F) -> Result<()> {
        let mut cursor = TableNames {
            input: ListTablesInput {
                exclusive_start_table_name: self.exclusive_start_table_name,
                limit: self.limit,
            },
            callback,
            complete: false,
        };
        paginate::drive(client, client.config().pagination, &mut cursor).await?;
        Ok(())
    }

    /// Collects every table name.
    pub async fn send(self, client: &Client) -> Result<Vec<String>> {
        let mut names = Vec::new();
        self.each(client, |name| names.push(name)).await?;
        Ok(names)
    }
}
