//! Static per-dialect data: relevant tokens, clause ordering, operator
//! joining, aggregation flags and token aliases.
//!
//! A descriptor is pure data. It is built once per process per dialect and
//! shared by reference; classifiers and executors never copy the tables.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::error::{DialectError, DialectResult};

/// The broad statement family a query belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementGroup {
    Select,
    Insert,
    Update,
    Delete,
    Begin,
    Commit,
    Rollback,
    Union,
}

impl std::fmt::Display for StatementGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatementGroup::Select => write!(f, "SELECT"),
            StatementGroup::Insert => write!(f, "INSERT"),
            StatementGroup::Update => write!(f, "UPDATE"),
            StatementGroup::Delete => write!(f, "DELETE"),
            StatementGroup::Begin => write!(f, "BEGIN"),
            StatementGroup::Commit => write!(f, "COMMIT"),
            StatementGroup::Rollback => write!(f, "ROLLBACK"),
            StatementGroup::Union => write!(f, "UNION"),
        }
    }
}

/// Immutable lookup tables for one dialect.
///
/// Constructed through [`DescriptorBuilder`], which validates the structural
/// invariants at registration time. Absent entries are the normal case:
/// a token with no alias is its own canonical name, a token with no operator
/// entry renders its parameters as a list.
#[derive(Debug)]
pub struct DialectDescriptor {
    name: &'static str,
    relevant: HashSet<&'static str>,
    ordering: HashMap<StatementGroup, Vec<&'static str>>,
    operators: HashMap<&'static str, &'static str>,
    aggregate: HashSet<&'static str>,
    aliases: HashMap<&'static str, &'static str>,
}

impl DialectDescriptor {
    /// Dialect identity; also the key of its cache partition.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn relevant(&self) -> &HashSet<&'static str> {
        &self.relevant
    }

    pub(crate) fn ordering(&self, group: StatementGroup) -> Option<&[&'static str]> {
        self.ordering.get(&group).map(|seq| seq.as_slice())
    }

    pub(crate) fn operator(&self, token: &str) -> Option<&'static str> {
        self.operators.get(token).copied()
    }

    pub(crate) fn is_aggregate(&self, token: &str) -> bool {
        self.aggregate.contains(token)
    }

    pub(crate) fn alias_target(&self, token: &str) -> Option<&'static str> {
        self.aliases.get(token).copied()
    }
}

/// Fluent construction of a [`DialectDescriptor`].
///
/// `build` checks the configuration invariants: the alias map must be flat
/// (targets are never themselves aliases) and every ordering entry must
/// resolve, directly or via alias, to a member of the relevant set.
#[derive(Debug, Default)]
pub struct DescriptorBuilder {
    name: &'static str,
    relevant: HashSet<&'static str>,
    ordering: HashMap<StatementGroup, Vec<&'static str>>,
    operators: HashMap<&'static str, &'static str>,
    aggregate: HashSet<&'static str>,
    aliases: HashMap<&'static str, &'static str>,
}

impl DescriptorBuilder {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Token kinds this dialect's executor can act on.
    pub fn relevant(mut self, tokens: &[&'static str]) -> Self {
        self.relevant.extend(tokens);
        self
    }

    /// Canonical clause order for one statement family.
    pub fn ordering(mut self, group: StatementGroup, sequence: &[&'static str]) -> Self {
        self.ordering.insert(group, sequence.to_vec());
        self
    }

    /// Infix symbol joining multiple parameters of a token.
    pub fn operator(mut self, token: &'static str, symbol: &'static str) -> Self {
        self.operators.insert(token, symbol);
        self
    }

    /// Tokens that may be supplied repeatedly but collapse to one clause.
    pub fn aggregate(mut self, tokens: &[&'static str]) -> Self {
        self.aggregate.extend(tokens);
        self
    }

    /// Alias resolving to a different canonical token.
    pub fn alias(mut self, alias: &'static str, canonical: &'static str) -> Self {
        self.aliases.insert(alias, canonical);
        self
    }

    pub fn build(self) -> DialectResult<DialectDescriptor> {
        for (alias, target) in &self.aliases {
            if self.aliases.contains_key(target) {
                return Err(DialectError::descriptor(
                    self.name,
                    format!("alias chain: '{alias}' -> '{target}' is itself an alias"),
                ));
            }
        }
        for (group, sequence) in &self.ordering {
            for token in sequence {
                let canonical = self.aliases.get(token).unwrap_or(token);
                if !self.relevant.contains(canonical) {
                    return Err(DialectError::descriptor(
                        self.name,
                        format!("ordering entry '{token}' in group {group} is not a relevant token"),
                    ));
                }
            }
        }
        Ok(DialectDescriptor {
            name: self.name,
            relevant: self.relevant,
            ordering: self.ordering,
            operators: self.operators,
            aggregate: self.aggregate,
            aliases: self.aliases,
        })
    }
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    Sqlite,
    Postgres,
    Mysql,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::Sqlite
    }
}

impl Dialect {
    /// The shared descriptor for this dialect, built once per process.
    pub fn descriptor(&self) -> Arc<DialectDescriptor> {
        static SQLITE: OnceLock<Arc<DialectDescriptor>> = OnceLock::new();
        static POSTGRES: OnceLock<Arc<DialectDescriptor>> = OnceLock::new();
        static MYSQL: OnceLock<Arc<DialectDescriptor>> = OnceLock::new();

        let cell = match self {
            Dialect::Sqlite => &SQLITE,
            Dialect::Postgres => &POSTGRES,
            Dialect::Mysql => &MYSQL,
        };
        Arc::clone(cell.get_or_init(|| {
            let descriptor = base_tables(self.name())
                .build()
                .expect("built-in dialect tables are well formed");
            Arc::new(descriptor)
        }))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::Postgres => "postgres",
            Dialect::Mysql => "mysql",
        }
    }
}

/// Tables shared by the built-in dialects.
///
/// The three backends accept the same token surface; they differ in the
/// connection layer, not in clause grammar at this granularity.
fn base_tables(name: &'static str) -> DescriptorBuilder {
    DescriptorBuilder::new(name)
        .relevant(&[
            "select", "distinct", "from", "join", "on", "group_by", "having", "where", "order_by",
            "limit", "offset", "insert", "into", "values", "update", "set", "delete", "begin",
            "commit", "rollback", "union",
        ])
        .ordering(
            StatementGroup::Select,
            &[
                "select", "from", "join", "group_by", "having", "where", "order_by", "limit",
                "offset",
            ],
        )
        .ordering(StatementGroup::Insert, &["insert", "into", "values"])
        .ordering(StatementGroup::Update, &["update", "set", "where"])
        .ordering(StatementGroup::Delete, &["delete", "from", "where"])
        .ordering(StatementGroup::Union, &["union"])
        .operator("and", "AND")
        .operator("or", "OR")
        .aggregate(&["select", "where", "group_by", "having", "order_by", "set"])
        .alias("left_join", "join")
        .alias("right_join", "join")
        .alias("full_join", "join")
        .alias("inner_join", "join")
}
