/// Declarations with opaque bodies: pages, handlers and functions.
///
/// None of these bodies are parsed structurally. Pages get a component outline (see
/// `page_body` in the util chunk); handler and function bodies are skipped as balanced-brace
/// spans.
impl<'a> Parser<'a> {
    /// `Page Name { ... }`, with `cur` on `Page`. Leaves `cur` on the matching `}`.
    fn page_decl(&mut self, decorators: Vec<Decorator>) -> Option<PageDecl> {
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = self.cur.literal.clone();

        if !self.expect_peek_punct(PunctuationId::LBrace) {
            return None;
        }
        let (components, body) = self.page_body();

        Some(PageDecl {
            name,
            decorators,
            components,
            body,
        })
    }

    /// `handler name(type name, ...) { ... }`, with `cur` on `handler`.
    ///
    /// The body is optional. Leaves `cur` on the body's closing `}` or on the `)`.
    fn handler_decl(&mut self, decorators: Vec<Decorator>) -> Option<HandlerDecl> {
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = self.cur.literal.clone();

        if !self.expect_peek_punct(PunctuationId::LParen) {
            return None;
        }
        let params = self.param_list()?;
        let body = self.optional_body();

        Some(HandlerDecl {
            name,
            params,
            decorators,
            body,
        })
    }

    /// `type name(params) { ... }` or `type name(params);`, with `cur` on the return type.
    fn function_decl(&mut self) -> Option<Declaration> {
        let return_type = self.cur.literal.clone();
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = self.cur.literal.clone();

        let params = if self.peek_is_punct(PunctuationId::LParen) {
            self.next_token();
            self.param_list()?
        } else {
            Vec::new()
        };

        let body = if self.peek_is_punct(PunctuationId::Semicolon) {
            self.next_token();
            None
        } else {
            self.optional_body()
        };

        Some(if name == "main" {
            Declaration::Main(MainDecl {
                return_type,
                params,
                body,
            })
        } else {
            Declaration::Function(FunctionDecl {
                return_type,
                name,
                params,
                body,
            })
        })
    }

    /// Parse `type name` pairs with `cur` on `(`; on success `cur` is on `)`.
    ///
    /// A malformed entry ends the list. If that leaves the list unclosed a diagnostic is
    /// recorded and `None` returned.
    fn param_list(&mut self) -> Option<Vec<Param>> {
        let mut params = Vec::new();
        self.next_token();

        while !self.cur_is_punct(PunctuationId::RParen) && !self.cur.is_eof() {
            let ty = self.cur.literal.clone();
            self.next_token();

            if !self.cur_is(TokenKind::Ident) {
                break;
            }
            params.push(Param {
                ty,
                name: self.cur.literal.clone(),
            });
            self.next_token();

            if self.cur_is_punct(PunctuationId::Comma) {
                self.next_token();
            }
        }

        if self.cur_is_punct(PunctuationId::RParen) {
            Some(params)
        } else {
            self.error_at_cur("expected ')' after parameters");
            None
        }
    }

    /// Skip a `{ ... }` body if the lookahead opens one.
    fn optional_body(&mut self) -> Option<OpaqueBody> {
        if self.peek_is_punct(PunctuationId::LBrace) {
            self.next_token();
            Some(self.skip_block())
        } else {
            None
        }
    }
}
