use crate::client::Client;
use crate::common::table_name;
use crate::error::Result;
use crate::table::common::{TableDescription, TableNameInput, TableOutput};

/// Describe table operation.
///
/// ```rust,no_run
/// use dynamodb_wire::{Client, table};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let description = table::describe_table::DescribeTable {
///     table_name: "users".to_string(),
/// }
/// .send(client)
/// .await?;
/// println!("{:?}", description.status());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct DescribeTable {
    /// The name of the table to describe.
    pub table_name: String,
}

impl DescribeTable {
    /// Execute the describe table operation.
    #[tracing::instrument(name = "dynamodb_wire.describe_table", skip_all, err)]
    pub async fn send(self, client: &Client) -> Result<TableDescription> {
        table_name::validate(&self.table_name)?;
        let input = TableNameInput {
            table_name: self.table_name,
        };
        let output: TableOutput = client.call("DescribeTable", &input).await?;
        Ok(output.table)
    }
}
