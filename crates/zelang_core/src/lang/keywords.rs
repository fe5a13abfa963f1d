//! Define the reserved keyword vocabulary for the zelang language.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records canonical spellings,
//! categories and short descriptions.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**: `Page` is a keyword, `page` is an identifier.
//! - [`KEYWORDS`] is ordered by [`KeywordId`] discriminant so [`info_for`] is a direct index; the
//!   registry guardrail tests enforce this.
//!
//! ## Examples
//! ```rust
//! use zelang_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("struct"), Some(KeywordId::Struct));
//! assert_eq!(keywords::as_str(KeywordId::DataList), "DataList");
//! assert_eq!(keywords::from_str("page"), None);
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Declarations
    Struct,
    Handler,

    // Primitive types
    Int,
    Float,
    String,
    Bool,
    Date,
    DateTime,
    Void,

    // Control flow
    If,
    Else,
    For,
    While,
    Return,

    // Literals
    True,
    False,

    // UI components
    Page,
    Section,
    Row,
    Column,
    Form,
    Input,
    Button,
    DataList,

    // HTTP
    Request,
    Response,
}

/// High-level grouping for documentation, tooling, and parser dispatch helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Declaration,
    /// A primitive field/return type (`int`, `string`, ... and `void`).
    Type,
    ControlFlow,
    Literal,
    /// A UI composition construct (`Page`, `Section`, ...).
    Component,
    Http,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub description: &'static str,
}

/// Registry of all keywords, in [`KeywordId`] order.
pub const KEYWORDS: &[KeywordInfo] = &[
    info(KeywordId::Struct, "struct", KeywordCategory::Declaration, "Declare a persisted record type."),
    info(KeywordId::Handler, "handler", KeywordCategory::Declaration, "Declare a request handler stub."),
    info(KeywordId::Int, "int", KeywordCategory::Type, "64-bit signed integer."),
    info(KeywordId::Float, "float", KeywordCategory::Type, "Double-precision float."),
    info(KeywordId::String, "string", KeywordCategory::Type, "Text value."),
    info(KeywordId::Bool, "bool", KeywordCategory::Type, "Boolean value."),
    info(KeywordId::Date, "date", KeywordCategory::Type, "Calendar date stored as text."),
    info(KeywordId::DateTime, "datetime", KeywordCategory::Type, "Timestamp stored as text."),
    info(KeywordId::Void, "void", KeywordCategory::Type, "No value (function return type only)."),
    info(KeywordId::If, "if", KeywordCategory::ControlFlow, "Conditional."),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow, "Alternative branch."),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow, "Counted loop."),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow, "Conditional loop."),
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow, "Return from a function."),
    info(KeywordId::True, "true", KeywordCategory::Literal, "Boolean true."),
    info(KeywordId::False, "false", KeywordCategory::Literal, "Boolean false."),
    info(KeywordId::Page, "Page", KeywordCategory::Component, "Top-level web page."),
    info(KeywordId::Section, "Section", KeywordCategory::Component, "Page section container."),
    info(KeywordId::Row, "Row", KeywordCategory::Component, "Layout row container."),
    info(KeywordId::Column, "Column", KeywordCategory::Component, "Layout column container."),
    info(KeywordId::Form, "Form", KeywordCategory::Component, "Create form bound to a struct."),
    info(KeywordId::Input, "Input", KeywordCategory::Component, "Form input control."),
    info(KeywordId::Button, "Button", KeywordCategory::Component, "Form button."),
    info(KeywordId::DataList, "DataList", KeywordCategory::Component, "Table listing a struct's rows."),
    info(KeywordId::Request, "Request", KeywordCategory::Http, "Incoming HTTP request type."),
    info(KeywordId::Response, "Response", KeywordCategory::Http, "Outgoing HTTP response type."),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Full metadata.
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    &KEYWORDS[id as usize]
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if `s` is a reserved word, `None` for ordinary identifiers.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

/// Return `true` for the primitive field types (`int`, `float`, `string`, `bool`, `date`,
/// `datetime`). `void` is a type keyword but never a field type.
pub fn is_field_type(id: KeywordId) -> bool {
    category(id) == KeywordCategory::Type && id != KeywordId::Void
}

/// Return `true` for UI component keywords.
pub fn is_component(id: KeywordId) -> bool {
    category(id) == KeywordCategory::Component
}

const fn info(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    description: &'static str,
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_types_exclude_void() {
        assert!(is_field_type(KeywordId::DateTime));
        assert!(is_field_type(KeywordId::Bool));
        assert!(!is_field_type(KeywordId::Void));
        assert!(!is_field_type(KeywordId::Page));
    }

    #[test]
    fn test_component_keywords_are_capitalized() {
        for info in KEYWORDS.iter().filter(|k| is_component(k.id)) {
            assert!(info.canonical.starts_with(char::is_uppercase), "{}", info.canonical);
        }
    }
}
