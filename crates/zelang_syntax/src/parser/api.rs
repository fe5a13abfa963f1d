/// Parse zelang source into a [`ParseOutput`].
///
/// This is the main public entrypoint for parsing. It never fails; check
/// [`ParseOutput::diagnostics`] for problems.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse(source: &str) -> ParseOutput {
    let output = Parser::new(Lexer::new(source)).parse_program();
    tracing::debug!(
        declarations = output.program.declarations.len(),
        diagnostics = output.diagnostics.len(),
        "parsed program"
    );
    output
}
