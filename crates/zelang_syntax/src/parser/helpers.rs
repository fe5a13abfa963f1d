/// Token-stream helpers and diagnostics.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Advancing the `cur`/`peek` window (`next_token`)
/// - Checking the current or lookahead token
/// - `expect_peek`, which advances on a match and records a diagnostic otherwise
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Shift the lookahead into `cur` and pull a fresh lookahead from the lexer.
    fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.cur = std::mem::replace(&mut self.peek, next);
    }

    fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur.kind == kind
    }

    fn cur_is_punct(&self, id: PunctuationId) -> bool {
        self.cur.kind.is_punctuation(id)
    }

    fn peek_is_punct(&self, id: PunctuationId) -> bool {
        self.peek.kind.is_punctuation(id)
    }

    /// If the lookahead is `kind`, advance onto it; otherwise record
    /// `expected next token to be ..., got ... instead` at the lookahead.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek.kind == kind {
            self.next_token();
            true
        } else {
            self.peek_error(kind);
            false
        }
    }

    fn expect_peek_punct(&mut self, id: PunctuationId) -> bool {
        self.expect_peek(TokenKind::Punctuation(id))
    }

    fn peek_error(&mut self, expected: TokenKind) {
        let message = format!(
            "expected next token to be {}, got {} instead",
            expected, self.peek.kind
        );
        self.errors.push(CompileError::syntax(message, &self.peek));
    }

    /// Record a diagnostic positioned at the current token.
    fn error_at_cur(&mut self, message: &str) {
        self.errors.push(CompileError::syntax(message, &self.cur));
    }
}
