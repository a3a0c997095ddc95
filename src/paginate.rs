//! The round-trip driver behind every multi-request operation.
//!
//! Listing tables, scanning, batch-fetching and waiting for a table all share
//! one loop: send the current input, hand the output to the operation so it
//! can emit results and fold in the continuation, then stop once the
//! operation says it is complete. Rounds are strictly sequential; the next
//! input always depends on the previous output.

use crate::client::Client;
use crate::error::{Error, Result};

use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;

/// How many rounds a multi-request operation may take and how long to wait
/// between them.
///
/// ```rust
/// use dynamodb_wire::paginate::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy {
///     max_rounds: Some(30),
///     delay: Duration::from_secs(2),
/// };
/// # let _ = policy;
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Upper bound on round trips; `None` keeps going until complete.
    pub max_rounds: Option<u32>,
    /// Pause between two rounds.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Unbounded, one second between rounds. The default for table polling.
    #[must_use]
    pub fn polling() -> Self {
        Self {
            max_rounds: None,
            delay: Duration::from_secs(1),
        }
    }
}

/// Per-operation state threaded through [`drive`].
pub(crate) trait Cursor {
    /// Request payload.
    type Input: Serialize;
    /// Response payload.
    type Output: DeserializeOwned;

    /// Operation name sent in `x-amz-target`.
    const TARGET: &'static str;

    /// Payload for the next round, continuation included.
    fn input(&self) -> &Self::Input;

    /// Emits the results of one response and folds in its continuation.
    fn advance(&mut self, output: Self::Output) -> Result<()>;

    /// Whether the last response finished the operation.
    fn is_complete(&self) -> bool;
}

/// Runs a cursor to completion, returning the number of rounds issued.
///
/// A failed round ends the loop with that error; nothing is retried.
pub(crate) async fn drive<C: Cursor>(
    client: &Client,
    policy: RetryPolicy,
    cursor: &mut C,
) -> Result<u32> {
    let mut rounds = 0;
    loop {
        let output: C::Output = client.call(C::TARGET, cursor.input()).await?;
        rounds += 1;
        cursor.advance(output)?;
        if cursor.is_complete() {
            debug!(operation = C::TARGET, rounds, "operation complete");
            return Ok(rounds);
        }
        if policy.max_rounds.is_some_and(|max| rounds >= max) {
            return Err(Error::RoundsExhausted { rounds });
        }
        debug!(operation = C::TARGET, rounds, "continuing");
        if !policy.delay.is_zero() {
            tokio::time::sleep(policy.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;

    use serde::Deserialize;
    use serde_json::json;

    #[derive(Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct PageInput {
        #[serde(skip_serializing_if = "Option::is_none")]
        start: Option<u32>,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct PageOutput {
        entries: Vec<String>,
        next: Option<u32>,
    }

    struct Pages<'a> {
        input: PageInput,
        seen: &'a mut Vec<String>,
        complete: bool,
    }

    impl Cursor for Pages<'_> {
        type Input = PageInput;
        type Output = PageOutput;

        const TARGET: &'static str = "Pages";

        fn input(&self) -> &Self::Input {
            &self.input
        }

        fn advance(&mut self, output: Self::Output) -> Result<()> {
            self.seen.extend(output.entries);
            self.complete = output.next.is_none();
            self.input.start = output.next;
            Ok(())
        }

        fn is_complete(&self) -> bool {
            self.complete
        }
    }

    #[tokio::test]
    async fn test_drive_follows_continuation_until_complete() {
        let transport = ScriptedTransport::new([
            json!({"Entries": ["a", "b"], "Next": 1}),
            json!({"Entries": ["c"], "Next": 2}),
            json!({"Entries": ["d"]}),
        ]);
        let client = transport.client();
        let mut seen = Vec::new();
        let mut cursor = Pages {
            input: PageInput { start: None },
            seen: &mut seen,
            complete: false,
        };
        let rounds = drive(&client, RetryPolicy::default(), &mut cursor)
            .await
            .unwrap();
        assert_eq!(rounds, 3);
        assert_eq!(seen, vec!["a", "b", "c", "d"]);
        let bodies = transport.bodies();
        assert_eq!(bodies, vec![json!({}), json!({"Start": 1}), json!({"Start": 2})]);
        assert_eq!(transport.targets(), vec!["DynamoDB_20120810.Pages"; 3]);
    }

    #[tokio::test]
    async fn test_drive_stops_at_round_limit() {
        let transport = ScriptedTransport::new([
            json!({"Entries": [], "Next": 1}),
            json!({"Entries": [], "Next": 2}),
            json!({"Entries": []}),
        ]);
        let client = transport.client();
        let mut seen = Vec::new();
        let mut cursor = Pages {
            input: PageInput { start: None },
            seen: &mut seen,
            complete: false,
        };
        let policy = RetryPolicy {
            max_rounds: Some(2),
            ..Default::default()
        };
        let err = drive(&client, policy, &mut cursor).await.unwrap_err();
        assert!(matches!(err, Error::RoundsExhausted { rounds: 2 }));
        assert_eq!(transport.bodies().len(), 2);
    }

    #[tokio::test]
    async fn test_drive_stops_on_failed_round() {
        let transport = ScriptedTransport::new([json!({"Entries": ["a"], "Next": 1})]);
        let client = transport.client();
        let mut seen = Vec::new();
        let mut cursor = Pages {
            input: PageInput { start: None },
            seen: &mut seen,
            complete: false,
        };
        let err = drive(&client, RetryPolicy::default(), &mut cursor)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(seen, vec!["a"]);
    }
}
