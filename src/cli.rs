//! Command-line modes
//!
//! `vixen-control seq` prints the server's sequence listing, `vixen-control
//! status` prints the play status. Any other token, or none, runs the button
//! loop.

use serde_json::Value;
use std::io::Write;
use tracing::warn;

use crate::remote::ShowRemote;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Sequences,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Query(Query),
    Run,
}

impl Mode {
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("seq") => Mode::Query(Query::Sequences),
            Some("status") => Mode::Query(Query::Status),
            _ => Mode::Run,
        }
    }

    /// Only the first argument after the program name is considered
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let first = args.into_iter().nth(1);
        Self::from_token(first.as_deref())
    }
}

/// Issue exactly one request for `query` and print the reply as JSON.
/// A failed request is logged and printed as `null`; a reply that cannot be
/// re-encoded is an error, never a `null`.
pub async fn print_query<R, W>(remote: &R, query: Query, out: &mut W) -> std::io::Result<()>
where
    R: ShowRemote + ?Sized,
    W: Write,
{
    let reply = match query {
        Query::Sequences => remote.sequences().await.map_err(|e| {
            warn!(error = %e, "Could not get sequences");
        }),
        Query::Status => match remote.status().await {
            Ok(entries) => Ok(serde_json::to_value(entries)?),
            Err(e) => {
                warn!(error = %e, "Could not get status");
                Err(())
            }
        },
    };

    let reply = reply.unwrap_or(Value::Null);
    let text = serde_json::to_string_pretty(&reply)?;
    writeln!(out, "{}", text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::testing::{Call, RecordingRemote, StatusReply};
    use crate::remote::StatusEntry;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_mode_from_args() {
        assert_eq!(
            Mode::from_args(args(&["vixen-control", "seq"])),
            Mode::Query(Query::Sequences)
        );
        assert_eq!(
            Mode::from_args(args(&["vixen-control", "status"])),
            Mode::Query(Query::Status)
        );
        assert_eq!(Mode::from_args(args(&["vixen-control"])), Mode::Run);
        assert_eq!(Mode::from_args(args(&["vixen-control", "--help"])), Mode::Run);
        assert_eq!(Mode::from_args(args(&["vixen-control", "Status"])), Mode::Run);
        assert_eq!(
            Mode::from_args(args(&["vixen-control", "play", "status"])),
            Mode::Run
        );
    }

    #[tokio::test]
    async fn test_status_query_calls_status_once() {
        let remote = RecordingRemote::with_states(&[1]);
        let mut out = Vec::new();

        print_query(&remote, Query::Status, &mut out).await.unwrap();

        assert_eq!(remote.calls(), vec![Call::Status]);
        let printed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed, serde_json::json!([{"State": 1}]));
    }

    #[tokio::test]
    async fn test_successful_status_is_printed_verbatim() {
        let entry: StatusEntry = serde_json::from_value(serde_json::json!({
            "State": 0,
            "Name": "Holiday",
            "Position": 42
        }))
        .unwrap();
        let remote = RecordingRemote::new(StatusReply::Entries(vec![entry]));
        let mut out = Vec::new();

        print_query(&remote, Query::Status, &mut out).await.unwrap();

        let printed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            printed,
            serde_json::json!([{"State": 0, "Name": "Holiday", "Position": 42}])
        );

        let idle = RecordingRemote::with_states(&[]);
        let mut out = Vec::new();
        print_query(&idle, Query::Status, &mut out).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }

    #[tokio::test]
    async fn test_sequences_query_prints_listing() {
        let remote = RecordingRemote::with_states(&[]);
        let mut out = Vec::new();

        print_query(&remote, Query::Sequences, &mut out).await.unwrap();

        assert_eq!(remote.calls(), vec![Call::Sequences]);
        let printed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed[0]["Name"], "Holiday");
    }

    #[tokio::test]
    async fn test_failed_query_prints_null() {
        let remote = RecordingRemote::new(StatusReply::Timeout);
        let mut out = Vec::new();

        print_query(&remote, Query::Status, &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "null\n");
        assert_eq!(remote.calls(), vec![Call::Status]);
    }
}
