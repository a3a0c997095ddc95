use crate::client::Client;
use crate::common::table_name;
use crate::error::Result;
use crate::paginate::{self, Cursor, RetryPolicy};
use crate::table::common::{TableDescription, TableNameInput, TableOutput};

use aws_sdk_dynamodb::types;
use tracing::debug;

struct TableStatusPoll {
    input: TableNameInput,
    target: types::TableStatus,
    description: Option<TableDescription>,
}

impl Cursor for TableStatusPoll {
    type Input = TableNameInput;
    type Output = TableOutput;

    const TARGET: &'static str = "DescribeTable";

    fn input(&self) -> &Self::Input {
        &self.input
    }

    fn advance(&mut self, output: Self::Output) -> Result<()> {
        debug!(
            table_name = self.input.table_name.as_str(),
            status = output.table.table_status.as_deref().unwrap_or_default(),
            "polled table status"
        );
        self.description = Some(output.table);
        Ok(())
    }

    fn is_complete(&self) -> bool {
        self.description
            .as_ref()
            .and_then(TableDescription::status)
            .is_some_and(|status| status == self.target)
    }
}

/// The table as last described, once it reached the awaited status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaitForTableOutput {
    /// The final description.
    pub table: TableDescription,
    /// Number of describe calls issued.
    pub rounds: u32,
}

/// Describes a table until it reports the awaited status.
///
/// Waits for `ACTIVE` unless another status is given, pausing between calls
/// according to the client's polling policy or the one set here.
///
/// ```rust,no_run
/// use dynamodb_wire::{Client, RetryPolicy, table};
/// use std::time::Duration;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let ready = table::wait_for_table::WaitForTable {
///     table_name: "users".to_string(),
///     policy: Some(RetryPolicy {
///         max_rounds: Some(60),
///         delay: Duration::from_millis(500),
///     }),
///     ..Default::default()
/// }
/// .send(client)
/// .await?;
/// println!("ready after {} calls", ready.rounds);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaitForTable {
    /// The table to wait for.
    pub table_name: String,
    /// The awaited status, `ACTIVE` when unset.
    pub status: Option<types::TableStatus>,
    /// Overrides the client's polling policy.
    pub policy: Option<RetryPolicy>,
}

impl WaitForTable {
    /// Execute the wait.
    #[tracing::instrument(name = "dynamodb_wire.wait_for_table", skip_all, err)]
    pub async fn send(self, client: &Client) -> Result<WaitForTableOutput> {
        table_name::validate(&self.table_name)?;
        let policy = self.policy.unwrap_or(client.config().polling);
        let mut poll = TableStatusPoll {
            input: TableNameInput {
                table_name: self.table_name,
            },
            target: self.status.unwrap_or(types::TableStatus::Active),
            description: None,
        };
        let rounds = paginate::drive(client, policy, &mut poll).await?;
        Ok(WaitForTableOutput {
            table: poll.description.unwrap_or_default(),
            rounds,
        })
    }
}
