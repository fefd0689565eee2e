//! Dialect adapter core for fluent SQL query builders.
//!
//! A dialect-agnostic builder emits an ordered stream of query tokens
//! (select, from, where, join, ...) and finally a built query object. This
//! crate supplies the per-dialect side of that conversation: which tokens
//! the dialect can act on, their canonical clause order, which tokens
//! aggregate or alias into others, a memoized known-token check shared by
//! every connection of a dialect, and the decision whether a finished query
//! runs immediately or is handed back for chaining.

pub mod cache;
pub mod classifier;
pub mod descriptor;
pub mod driver;
pub mod error;
pub mod executor;

pub use cache::KnownTokenCache;
pub use classifier::TokenClassifier;
pub use descriptor::{Dialect, DialectDescriptor, DescriptorBuilder, StatementGroup};
pub use executor::{execute_conditionally, BuiltQuery, CallArg, QueryOutcome};

pub mod prelude {
    pub use crate::cache::KnownTokenCache;
    pub use crate::classifier::TokenClassifier;
    pub use crate::descriptor::{Dialect, DialectDescriptor, DescriptorBuilder, StatementGroup};
    pub use crate::driver::{connection_string, ConnectionSettings};
    pub use crate::error::{DialectError, DialectResult};
    pub use crate::executor::{execute_conditionally, BuiltQuery, CallArg, QueryOutcome};
}
