//! Operator vocabulary.
//!
//! zelang has no expression grammar yet (function bodies are opaque), but the lexer still
//! classifies operator spellings so bodies tokenize cleanly and diagnostics can name them.
//!
//! ## Examples
//! ```rust
//! use zelang_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("&&"), Some(OperatorId::AndAnd));
//! assert_eq!(operators::as_str(OperatorId::NotEq), "!=");
//! assert_eq!(operators::from_str("&"), None);
//! ```

use super::registry::LangItemInfo;

/// Stable identifier for operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Lt,
    Gt,
    Bang,
    EqEq,
    NotEq,
    LtEq,
    GtEq,
    AndAnd,
    OrOr,
}

/// Metadata entry for an operator.
pub type OperatorInfo = LangItemInfo<OperatorId>;

/// Registry of all operators, in [`OperatorId`] order.
pub const OPERATORS: &[OperatorInfo] = &[
    LangItemInfo::new(OperatorId::Assign, "=", "Assignment."),
    LangItemInfo::new(OperatorId::Plus, "+", "Addition."),
    LangItemInfo::new(OperatorId::Minus, "-", "Subtraction."),
    LangItemInfo::new(OperatorId::Star, "*", "Multiplication."),
    LangItemInfo::new(OperatorId::Slash, "/", "Division."),
    LangItemInfo::new(OperatorId::Lt, "<", "Less than."),
    LangItemInfo::new(OperatorId::Gt, ">", "Greater than."),
    LangItemInfo::new(OperatorId::Bang, "!", "Logical not."),
    LangItemInfo::new(OperatorId::EqEq, "==", "Equality."),
    LangItemInfo::new(OperatorId::NotEq, "!=", "Inequality."),
    LangItemInfo::new(OperatorId::LtEq, "<=", "Less than or equal."),
    LangItemInfo::new(OperatorId::GtEq, ">=", "Greater than or equal."),
    LangItemInfo::new(OperatorId::AndAnd, "&&", "Logical and."),
    LangItemInfo::new(OperatorId::OrOr, "||", "Logical or."),
];

/// Return the canonical spelling for an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for an operator.
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    &OPERATORS[id as usize]
}

/// Resolve an operator spelling to its identifier.
pub fn from_str(s: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.canonical == s).map(|o| o.id)
}
