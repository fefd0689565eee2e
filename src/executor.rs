//! Conditional execution of built queries.
//!
//! A one-shot classification over the query's resolved statement type and the
//! triggering call's argument shapes. Only statement types with unambiguous
//! execution semantics fire automatically; everything else is handed back
//! unexecuted for explicit execution by the caller.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::descriptor::StatementGroup;
use crate::error::DialectResult;

/// One positional argument of a builder call, resolved to a tagged shape by
/// the builder before it reaches this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CallArg {
    /// A bare column or table identifier.
    Ident(String),
    /// A column-to-value mapping. Contents are not validated here; malformed
    /// maps surface from the connection layer.
    Map(serde_json::Map<String, serde_json::Value>),
    /// A raw SQL fragment.
    Raw(String),
    /// Any other positional value.
    Value(serde_json::Value),
}

/// Result of running a built query against its connection.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Affected or inserted row count.
    RowCount(u64),
    /// Fetched rows.
    Rows(Vec<HashMap<String, serde_json::Value>>),
}

/// A fully assembled query produced by the external builder.
///
/// The query owns all connection interaction; this core never touches a live
/// connection. `execute` and `done` are opaque, potentially blocking calls —
/// timeout and retry policy belong to the connection layer.
#[async_trait]
pub trait BuiltQuery: Send {
    /// The resolved statement family of this query.
    fn group(&self) -> StatementGroup;

    /// Run the query, returning a row count or result set.
    async fn execute(&mut self) -> DialectResult<QueryOutcome>;

    /// Fire-and-forget execution, used for direct inserts.
    async fn done(&mut self) -> DialectResult<QueryOutcome>;
}

/// Decide whether `query` should run now or be returned for chaining.
///
/// `Ok(None)` means "not executed": the caller keeps the query and must
/// execute it explicitly. Ambiguous argument shapes always fall through to
/// `None` rather than erroring.
///
/// | group             | arguments                  | action          |
/// |-------------------|----------------------------|-----------------|
/// | insert            | identifier + column map    | `done()`        |
/// | insert            | anything else              | not executed    |
/// | begin             | none                       | `execute()`     |
/// | begin             | any                        | not executed    |
/// | commit / rollback | always                     | `execute()`     |
/// | other             | always                     | not executed    |
pub async fn execute_conditionally<Q>(
    query: &mut Q,
    token: &str,
    args: &[CallArg],
) -> DialectResult<Option<QueryOutcome>>
where
    Q: BuiltQuery + ?Sized,
{
    let group = query.group();
    match group {
        StatementGroup::Insert => match args {
            [CallArg::Ident(target), CallArg::Map(_)] => {
                debug!(token, %group, target = target.as_str(), "executing insert directly");
                Ok(Some(query.done().await?))
            }
            _ => Ok(None),
        },
        StatementGroup::Begin if args.is_empty() => {
            debug!(token, %group, "executing transaction begin");
            Ok(Some(query.execute().await?))
        }
        StatementGroup::Begin => Ok(None),
        StatementGroup::Commit | StatementGroup::Rollback => {
            debug!(token, %group, "executing transaction end");
            Ok(Some(query.execute().await?))
        }
        _ => Ok(None),
    }
}
