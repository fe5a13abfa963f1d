//! Shareable metadata for `zelang_core::lang` registries.
//!
//! The `zelang_core::lang` module is a set of **registry-first** vocabularies: keywords,
//! operators, punctuation, decorators and domain types. This submodule provides the small,
//! dependency-free metadata types that are reused across all registries.
//!
//! ## Notes
//! - These types are intentionally lightweight and `Copy`-friendly so registries can live in
//!   `const` tables.
//! - Metadata is meant for tooling/docs/diagnostics; enforcement of syntax rules still lives
//!   in the lexer/parser.
//!
//! ## See also
//! - [`crate::lang::keywords`]
//! - [`crate::lang::decorators`]
//! - [`crate::lang::types`]

/// Shared metadata shape for “registry-first” vocabulary items.
///
/// Registries that need extra per-item data (e.g. keyword category, decorator constraint text)
/// define their own info type with these fields plus the extension.
#[derive(Debug, Clone, Copy)]
pub struct LangItemInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub description: &'static str,
}

impl<Id> LangItemInfo<Id> {
    pub const fn new(id: Id, canonical: &'static str, description: &'static str) -> Self {
        Self {
            id,
            canonical,
            description,
        }
    }
}
