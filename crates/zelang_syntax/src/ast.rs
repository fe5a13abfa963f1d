//! Abstract Syntax Tree definitions for zelang
//!
//! The tree is deliberately shallow: structs and their fields are parsed fully, while page,
//! component, handler and function bodies are kept as [`OpaqueBody`] spans that no consumer
//! interprets.

use zelang_core::lang::decorators::{self, DecoratorId};
use zelang_core::lang::keywords::KeywordId;

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

pub type Ident = String;

/// A program is an ordered sequence of top-level declarations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub declarations: Vec<Spanned<Declaration>>,
}

/// Top-level declarations.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Struct(StructDecl),
    Page(PageDecl),
    Handler(HandlerDecl),
    Function(FunctionDecl),
    Main(MainDecl),
}

// ============================================================================
// Decorators
// ============================================================================

/// `@name`, `@name(arg, key: value, ...)`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Decorator {
    pub name: Ident,
    /// Positional arguments, as literal text (string quotes already removed by the lexer).
    pub args: Vec<String>,
    /// Keyword arguments in source order.
    pub kwargs: Vec<(String, String)>,
}

impl Decorator {
    pub fn new(name: impl Into<Ident>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// The registry id for this decorator, or `None` for names the compiler does not know.
    pub fn id(&self) -> Option<DecoratorId> {
        decorators::from_str(&self.name)
    }

    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Keyword argument lookup; the last occurrence of `key` wins.
    pub fn kwarg(&self, key: &str) -> Option<&str> {
        self.kwargs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Declarations that carry a decorator list.
pub trait Decorated {
    fn decorators(&self) -> &[Decorator];

    /// First decorator with the given id.
    fn decorator(&self, id: DecoratorId) -> Option<&Decorator> {
        self.decorators().iter().find(|d| d.id() == Some(id))
    }

    fn has_decorator(&self, id: DecoratorId) -> bool {
        self.decorator(id).is_some()
    }

    /// Recognized decorator ids in source order; unknown names are skipped.
    fn decorator_ids(&self) -> impl Iterator<Item = DecoratorId> {
        self.decorators().iter().filter_map(Decorator::id)
    }
}

// ============================================================================
// Structs
// ============================================================================

/// `struct Name { fields }`: one persisted record type.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub name: Ident,
    pub decorators: Vec<Decorator>,
    pub fields: Vec<Spanned<FieldDecl>>,
}

/// `@decorators type[] name;`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: Ident,
    /// Declared type spelling: a primitive keyword or any identifier.
    pub ty: Ident,
    pub is_array: bool,
    pub decorators: Vec<Decorator>,
}

impl FieldDecl {
    pub fn new(name: impl Into<Ident>, ty: impl Into<Ident>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            is_array: false,
            decorators: Vec::new(),
        }
    }
}

impl Decorated for StructDecl {
    fn decorators(&self) -> &[Decorator] {
        &self.decorators
    }
}

impl Decorated for FieldDecl {
    fn decorators(&self) -> &[Decorator] {
        &self.decorators
    }
}

// ============================================================================
// Pages and UI components
// ============================================================================

/// A brace-balanced region of source that the parser skipped without interpreting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpaqueBody {
    /// From the opening `{` through the matching `}` (or end of input).
    pub span: Span,
}

impl OpaqueBody {
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    /// The raw body text, braces included.
    pub fn text<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.span.start..self.span.end)
    }
}

/// `Page Name { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct PageDecl {
    pub name: Ident,
    pub decorators: Vec<Decorator>,
    /// Components recognized inside the body (outline only; bodies stay opaque).
    pub components: Vec<Spanned<ComponentNode>>,
    pub body: OpaqueBody,
}

impl PageDecl {
    /// Path from `@route("/path")`, if declared.
    pub fn route(&self) -> Option<&str> {
        self.decorator(DecoratorId::Route).and_then(Decorator::first_arg)
    }
}

impl Decorated for PageDecl {
    fn decorators(&self) -> &[Decorator] {
        &self.decorators
    }
}

/// UI composition constructs that may appear inside a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Section,
    Row,
    Column,
    Form,
    Input,
    Button,
    DataList,
}

impl ComponentKind {
    pub fn from_keyword(id: KeywordId) -> Option<Self> {
        Some(match id {
            KeywordId::Section => Self::Section,
            KeywordId::Row => Self::Row,
            KeywordId::Column => Self::Column,
            KeywordId::Form => Self::Form,
            KeywordId::Input => Self::Input,
            KeywordId::Button => Self::Button,
            KeywordId::DataList => Self::DataList,
            _ => return None,
        })
    }

    /// Containers may hold child components; leaves may not.
    pub fn is_container(self) -> bool {
        matches!(self, Self::Section | Self::Row | Self::Column | Self::Form)
    }
}

/// `Kind(key: value, ...) { ... }` inside a page body.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentNode {
    pub kind: ComponentKind,
    pub args: Vec<String>,
    pub properties: Vec<(String, String)>,
    pub children: Vec<Spanned<ComponentNode>>,
    pub body: Option<OpaqueBody>,
}

impl ComponentNode {
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            args: Vec::new(),
            properties: Vec::new(),
            children: Vec::new(),
            body: None,
        }
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

// ============================================================================
// Handlers and functions
// ============================================================================

/// `type name` in a parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: Ident,
    pub name: Ident,
}

/// `handler name(params) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerDecl {
    pub name: Ident,
    pub params: Vec<Param>,
    pub decorators: Vec<Decorator>,
    pub body: Option<OpaqueBody>,
}

impl HandlerDecl {
    pub fn route(&self) -> Option<&str> {
        self.decorator(DecoratorId::Route).and_then(Decorator::first_arg)
    }
}

impl Decorated for HandlerDecl {
    fn decorators(&self) -> &[Decorator] {
        &self.decorators
    }
}

/// `type name(params) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub return_type: Ident,
    pub name: Ident,
    pub params: Vec<Param>,
    pub body: Option<OpaqueBody>,
}

/// A function declared with the name `main`.
#[derive(Debug, Clone, PartialEq)]
pub struct MainDecl {
    pub return_type: Ident,
    pub params: Vec<Param>,
    pub body: Option<OpaqueBody>,
}
