/// Decorator and struct declaration parsing.
///
/// This chunk contains:
/// - Decorator runs (`@name`, `@name(args)`) and the shared argument-list parser
/// - `struct Name { fields }`
/// - Field declarations, including the field-level recovery policy

/// Positional and keyword arguments of a parenthesized argument list.
#[derive(Debug, Default)]
struct ArgList {
    positional: Vec<String>,
    keyword: Vec<(String, String)>,
}

/// Result of parsing one field inside a struct body.
enum FieldOutcome {
    Parsed(FieldDecl),
    /// The field was abandoned; skip the current token before trying again.
    Skip,
    /// The field was abandoned on a token that can continue the struct; retry from it.
    Resume,
}

impl<'a> Parser<'a> {
    // ========================================================================
    // Decorators
    // ========================================================================

    /// Parse consecutive decorators starting at `@`.
    ///
    /// Leaves `cur` on the first token after the run. An `@` not followed by an identifier ends
    /// the run; a missing `)` records a diagnostic and ends it too, keeping the decorators that
    /// were already complete.
    fn decorators(&mut self) -> Vec<Decorator> {
        let mut decorators = Vec::new();

        while self.cur_is_punct(PunctuationId::At) {
            self.next_token();
            if !self.cur_is(TokenKind::Ident) {
                return decorators;
            }

            let mut decorator = Decorator::new(self.cur.literal.clone());
            self.next_token();

            if self.cur_is_punct(PunctuationId::LParen) {
                let Some(args) = self.arg_list() else {
                    self.error_at_cur("expected ')' after decorator arguments");
                    return decorators;
                };
                decorator.args = args.positional;
                decorator.kwargs = args.keyword;
                self.next_token();
            }

            decorators.push(decorator);
        }

        decorators
    }

    /// Parse `( arg, key: value, ... )` with `cur` on `(`.
    ///
    /// Returns `None` when the list is not closed, leaving `cur` on the token that stopped it
    /// (a brace or end of input). On success `cur` is on the `)`.
    fn arg_list(&mut self) -> Option<ArgList> {
        let mut args = ArgList::default();
        self.next_token();

        while !self.cur_is_punct(PunctuationId::RParen) && !self.cur.is_eof() && !self.cur.kind.is_brace() {
            if !self.cur.kind.is_argument() {
                self.next_token();
                continue;
            }

            let literal = self.cur.literal.clone();
            self.next_token();

            if self.cur_is_punct(PunctuationId::Colon) {
                self.next_token();
                let value = if self.cur.kind.is_argument() {
                    let value = self.cur.literal.clone();
                    self.next_token();
                    value
                } else {
                    String::new()
                };
                args.keyword.push((literal, value));
            } else {
                args.positional.push(literal);
            }

            if self.cur_is_punct(PunctuationId::Comma) {
                self.next_token();
            }
        }

        self.cur_is_punct(PunctuationId::RParen).then_some(args)
    }

    // ========================================================================
    // Structs
    // ========================================================================

    /// `struct Name { field* }`, with `cur` on `struct`. Leaves `cur` on the closing `}`.
    fn struct_decl(&mut self, decorators: Vec<Decorator>) -> Option<StructDecl> {
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = self.cur.literal.clone();

        if !self.expect_peek_punct(PunctuationId::LBrace) {
            return None;
        }
        self.next_token();

        let mut fields = Vec::new();
        while !self.cur_is_punct(PunctuationId::RBrace) && !self.cur.is_eof() {
            let start = self.cur.span;
            match self.field_decl() {
                FieldOutcome::Parsed(field) => {
                    fields.push(Spanned::new(field, start.merge(self.cur.span)));
                    self.next_token();
                }
                FieldOutcome::Skip => self.next_token(),
                FieldOutcome::Resume => {}
            }
        }

        Some(StructDecl {
            name,
            decorators,
            fields,
        })
    }

    /// `@decorators type[] name;`. On success `cur` is on the `;`.
    ///
    /// Every failure path that returns [`FieldOutcome::Resume`] has consumed at least one token,
    /// so the struct loop cannot spin.
    fn field_decl(&mut self) -> FieldOutcome {
        let decorators = if self.cur_is_punct(PunctuationId::At) {
            self.decorators()
        } else {
            Vec::new()
        };

        if !self.cur.kind.is_field_type() {
            return self.abandon_field();
        }
        let ty = self.cur.literal.clone();
        self.next_token();

        let mut is_array = false;
        if self.cur_is_punct(PunctuationId::LBracket) {
            if !self.expect_peek_punct(PunctuationId::RBracket) {
                return FieldOutcome::Skip;
            }
            is_array = true;
            self.next_token();
        }

        if !self.cur_is(TokenKind::Ident) {
            return self.abandon_field();
        }
        let name = self.cur.literal.clone();
        self.next_token();

        if !self.cur_is_punct(PunctuationId::Semicolon) {
            self.error_at_cur("expected ';' after field declaration");
            return FieldOutcome::Resume;
        }

        FieldOutcome::Parsed(FieldDecl {
            name,
            ty,
            is_array,
            decorators,
        })
    }

    fn abandon_field(&self) -> FieldOutcome {
        if self.cur_is_punct(PunctuationId::RBrace) || self.cur.is_eof() {
            FieldOutcome::Resume
        } else {
            FieldOutcome::Skip
        }
    }
}
