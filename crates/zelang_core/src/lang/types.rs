//! Domain type registry: the fixed mapping from zelang field types to C and SQL types.
//!
//! ## Notes
//! - Unrecognized type names (usually other struct names) are *not* an error. [`c_type_for`]
//!   passes them through unchanged and [`sql_type_for`] falls back to `TEXT`.
//! - [`StorageClass`] tells the generator which SQLite bind/column family a type uses.
//!
//! ## Examples
//! ```rust
//! use zelang_core::lang::types::{self, DomainTypeId};
//!
//! assert_eq!(types::from_str("datetime"), Some(DomainTypeId::DateTime));
//! assert_eq!(types::c_type_for("int"), "int64_t");
//! assert_eq!(types::c_type_for("Customer"), "Customer");
//! assert_eq!(types::sql_type_for("Customer"), "TEXT");
//! ```

/// Stable identifier for primitive domain types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainTypeId {
    Int,
    Float,
    String,
    Bool,
    Date,
    DateTime,
}

/// How a value of a domain type crosses the SQLite boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageClass {
    /// `sqlite3_bind_int64` / `sqlite3_column_int64`
    Int64,
    /// `sqlite3_bind_double` / `sqlite3_column_double`
    Double,
    /// `sqlite3_bind_text` / `sqlite3_column_text`, owned as a `strdup`'d `char*`
    Text,
    /// `sqlite3_bind_int` / `sqlite3_column_int`, narrowed to `int`
    Flag,
}

/// Metadata entry for a domain type.
#[derive(Debug, Clone, Copy)]
pub struct DomainTypeInfo {
    pub id: DomainTypeId,
    pub canonical: &'static str,
    pub c_type: &'static str,
    pub sql_type: &'static str,
    pub storage: StorageClass,
}

/// SQL type used for names missing from [`DOMAIN_TYPES`].
pub const FALLBACK_SQL_TYPE: &str = "TEXT";

/// Registry of domain types, in [`DomainTypeId`] order.
pub const DOMAIN_TYPES: &[DomainTypeInfo] = &[
    info(DomainTypeId::Int, "int", "int64_t", "INTEGER", StorageClass::Int64),
    info(DomainTypeId::Float, "float", "double", "REAL", StorageClass::Double),
    info(DomainTypeId::String, "string", "char*", "TEXT", StorageClass::Text),
    info(DomainTypeId::Bool, "bool", "int", "INTEGER", StorageClass::Flag),
    info(DomainTypeId::Date, "date", "char*", "TEXT", StorageClass::Text),
    info(DomainTypeId::DateTime, "datetime", "char*", "TEXT", StorageClass::Text),
];

/// Resolve a type spelling to a primitive domain type.
pub fn from_str(name: &str) -> Option<DomainTypeId> {
    DOMAIN_TYPES.iter().find(|t| t.canonical == name).map(|t| t.id)
}

/// Return the full metadata entry for a domain type.
pub fn info_for(id: DomainTypeId) -> &'static DomainTypeInfo {
    &DOMAIN_TYPES[id as usize]
}

/// Map a declared type name to its C spelling; unknown names pass through.
pub fn c_type_for(name: &str) -> &str {
    match from_str(name) {
        Some(id) => info_for(id).c_type,
        None => name,
    }
}

/// Map a declared type name to its SQL column type; unknown names become `TEXT`.
pub fn sql_type_for(name: &str) -> &'static str {
    from_str(name).map_or(FALLBACK_SQL_TYPE, |id| info_for(id).sql_type)
}

/// Return the storage class for a declared type name, or `None` for unknown names.
pub fn storage_for(name: &str) -> Option<StorageClass> {
    from_str(name).map(|id| info_for(id).storage)
}

const fn info(
    id: DomainTypeId,
    canonical: &'static str,
    c_type: &'static str,
    sql_type: &'static str,
    storage: StorageClass,
) -> DomainTypeInfo {
    DomainTypeInfo {
        id,
        canonical,
        c_type,
        sql_type,
        storage,
    }
}
