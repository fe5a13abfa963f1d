/// Brace-balanced skipping and the page component outline.
///
/// Page bodies are never parsed as statements. The scan below only tracks brace depth and
/// notes component keywords so callers can inspect the page layout; it records no diagnostics.

/// A container component whose `{` has been seen but not its matching `}`.
struct OpenComponent {
    node: ComponentNode,
    start: Span,
    body_start: Span,
    depth: usize,
}

/// Component tree being built while a page body is scanned.
#[derive(Default)]
struct Outline {
    open: Vec<OpenComponent>,
    roots: Vec<Spanned<ComponentNode>>,
}

impl Outline {
    fn attach(&mut self, node: Spanned<ComponentNode>) {
        match self.open.last_mut() {
            Some(parent) => parent.node.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn open(&mut self, node: ComponentNode, start: Span, body_start: Span, depth: usize) {
        self.open.push(OpenComponent {
            node,
            start,
            body_start,
            depth,
        });
    }

    /// Close the innermost open component if `depth` is the level its `{` opened.
    fn close(&mut self, depth: usize, end: Span) {
        if self.open.last().is_some_and(|open| open.depth == depth) {
            if let Some(open) = self.open.pop() {
                self.finish_component(open, end);
            }
        }
    }

    fn finish_component(&mut self, open: OpenComponent, end: Span) {
        let mut node = open.node;
        node.body = Some(OpaqueBody::new(open.body_start.merge(end)));
        self.attach(Spanned::new(node, open.start.merge(end)));
    }

    /// Components still open at end of input run to `end`.
    fn finish(mut self, end: Span) -> Vec<Spanned<ComponentNode>> {
        while let Some(open) = self.open.pop() {
            self.finish_component(open, end);
        }
        self.roots
    }
}

impl<'a> Parser<'a> {
    // ========================================================================
    // Utilities
    // ========================================================================

    /// Skip from the `{` at `cur` to its matching `}` (or end of input).
    fn skip_block(&mut self) -> OpaqueBody {
        let start = self.cur.span;
        let mut depth = 1usize;

        while depth > 0 {
            self.next_token();
            match self.cur.kind {
                TokenKind::Eof => break,
                TokenKind::Punctuation(PunctuationId::LBrace) => depth += 1,
                TokenKind::Punctuation(PunctuationId::RBrace) => depth -= 1,
                _ => {}
            }
        }

        OpaqueBody::new(start.merge(self.cur.span))
    }

    /// Skip a page body from the `{` at `cur`, collecting its component outline.
    fn page_body(&mut self) -> (Vec<Spanned<ComponentNode>>, OpaqueBody) {
        let start = self.cur.span;
        let mut outline = Outline::default();
        let mut depth = 1usize;

        self.next_token();
        loop {
            match self.cur.kind {
                TokenKind::Eof => break,
                TokenKind::Punctuation(PunctuationId::LBrace) => depth += 1,
                TokenKind::Punctuation(PunctuationId::RBrace) => {
                    outline.close(depth, self.cur.span);
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                TokenKind::Keyword(id) => {
                    if let Some(kind) = ComponentKind::from_keyword(id) {
                        if !self.component(kind, &mut depth, &mut outline) {
                            continue;
                        }
                    }
                }
                _ => {}
            }
            self.next_token();
        }

        let end = self.cur.span;
        (outline.finish(end), OpaqueBody::new(start.merge(end)))
    }

    /// Note one component starting at `cur`.
    ///
    /// Returns `false` when the component stopped on a token it did not consume (an unclosed
    /// argument list ending at a brace), so the caller must look at `cur` again.
    fn component(&mut self, kind: ComponentKind, depth: &mut usize, outline: &mut Outline) -> bool {
        let start = self.cur.span;
        let mut node = ComponentNode::new(kind);

        if self.peek_is_punct(PunctuationId::LParen) {
            self.next_token();
            match self.arg_list() {
                Some(args) => {
                    node.args = args.positional;
                    node.properties = args.keyword;
                }
                None => {
                    outline.attach(Spanned::new(node, start));
                    return false;
                }
            }
        }

        if !self.peek_is_punct(PunctuationId::LBrace) {
            outline.attach(Spanned::new(node, start.merge(self.cur.span)));
            return true;
        }
        self.next_token();

        if kind.is_container() {
            *depth += 1;
            outline.open(node, start, self.cur.span, *depth);
        } else {
            let body = self.skip_block();
            node.body = Some(body);
            outline.attach(Spanned::new(node, start.merge(body.span)));
        }
        true
    }
}
