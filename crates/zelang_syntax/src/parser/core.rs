/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type, its [`ParseOutput`], and the top-level
/// `parse_program()` loop with statement dispatch.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.

/// Everything a parse produced: the program and the diagnostics recorded along the way.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseOutput {
    pub program: Program,
    pub diagnostics: Vec<CompileError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Diagnostics as `Line L:C: message` strings, in the order they were recorded.
    pub fn messages(&self) -> Vec<String> {
        crate::diagnostics::messages(&self.diagnostics)
    }
}

/// Parser state.
///
/// ## Notes
/// - Every statement parser leaves `cur` on the last token it consumed; the top-level loop
///   then advances one token, so each iteration makes progress even on malformed input.
/// - Errors never abort the parse. The construct being parsed returns `None` and the
///   diagnostic is kept.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    cur: Token,
    peek: Token,
    errors: Vec<CompileError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser pulling tokens from `lexer`.
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            cur,
            peek,
            errors: Vec::new(),
        }
    }

    /// Parse the entire input into a [`ParseOutput`].
    pub fn parse_program(mut self) -> ParseOutput {
        let mut declarations = Vec::new();

        while !self.cur.is_eof() {
            if let Some(decl) = self.statement() {
                declarations.push(decl);
            }
            self.next_token();
        }

        ParseOutput {
            program: Program { declarations },
            diagnostics: self.errors,
        }
    }

    /// Parse one top-level statement, or nothing for text the language does not recognize.
    fn statement(&mut self) -> Option<Spanned<Declaration>> {
        let start = self.cur.span;
        let decorated = self.cur_is_punct(PunctuationId::At);
        let decorators = if decorated { self.decorators() } else { Vec::new() };

        let kind = self.cur.kind;
        let decl = match kind {
            TokenKind::Keyword(KeywordId::Struct) => self.struct_decl(decorators).map(Declaration::Struct),
            TokenKind::Keyword(KeywordId::Page) => self.page_decl(decorators).map(Declaration::Page),
            TokenKind::Keyword(KeywordId::Handler) => self.handler_decl(decorators).map(Declaration::Handler),
            // Decorators only attach to structs, pages and handlers.
            _ if !decorated && kind.starts_function() => self.function_decl(),
            _ => None,
        }?;

        Some(Spanned::new(decl, start.merge(self.cur.span)))
    }
}
