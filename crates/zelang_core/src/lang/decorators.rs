//! Decorator vocabulary registry.
//!
//! This module centralizes recognized decorator spellings so downstream code
//! doesn't need stringly-typed comparisons. Unknown decorator names are legal in source;
//! [`from_str`] simply returns `None` for them and every consumer ignores them.
//!
//! ## Examples
//! ```rust
//! use zelang_core::lang::decorators::{self, DecoratorId};
//!
//! assert_eq!(decorators::from_str("autoincrement"), Some(DecoratorId::AutoIncrement));
//! assert_eq!(decorators::sql_constraint(DecoratorId::Required), Some(" NOT NULL"));
//! assert_eq!(decorators::from_str("Primary"), None);
//! ```

/// Stable identifier for recognized decorators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecoratorId {
    Table,
    Storage,
    Primary,
    AutoIncrement,
    Required,
    Unique,
    Timestamp,
    Route,
}

/// Metadata entry for a decorator.
#[derive(Debug, Clone, Copy)]
pub struct DecoratorInfo {
    pub id: DecoratorId,
    pub canonical: &'static str,
    /// Column constraint suffix contributed to `CREATE TABLE`, including the leading space.
    pub sql_constraint: Option<&'static str>,
}

/// Named argument for `@route(method: "POST")`.
pub const ROUTE_METHOD_ARG: &str = "method";

/// Registry of recognized decorators, in [`DecoratorId`] order.
pub const DECORATORS: &[DecoratorInfo] = &[
    info(DecoratorId::Table, "table", None),
    info(DecoratorId::Storage, "storage", None),
    info(DecoratorId::Primary, "primary", Some(" PRIMARY KEY")),
    info(DecoratorId::AutoIncrement, "autoincrement", Some(" AUTOINCREMENT")),
    info(DecoratorId::Required, "required", Some(" NOT NULL")),
    info(DecoratorId::Unique, "unique", Some(" UNIQUE")),
    info(DecoratorId::Timestamp, "timestamp", None),
    info(DecoratorId::Route, "route", None),
];

/// Resolve a decorator name to its stable id. Matching is case-sensitive.
pub fn from_str(name: &str) -> Option<DecoratorId> {
    DECORATORS.iter().find(|d| d.canonical == name).map(|d| d.id)
}

/// Return the canonical spelling for a decorator.
pub fn as_str(id: DecoratorId) -> &'static str {
    info_for(id).canonical
}

/// Return the metadata entry for a decorator.
pub fn info_for(id: DecoratorId) -> &'static DecoratorInfo {
    &DECORATORS[id as usize]
}

/// Return the `CREATE TABLE` constraint suffix a decorator contributes, if any.
pub fn sql_constraint(id: DecoratorId) -> Option<&'static str> {
    info_for(id).sql_constraint
}

const fn info(id: DecoratorId, canonical: &'static str, sql_constraint: Option<&'static str>) -> DecoratorInfo {
    DecoratorInfo {
        id,
        canonical,
        sql_constraint,
    }
}
