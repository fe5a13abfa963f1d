#![no_main]

use libfuzzer_sys::fuzz_target;
use zelang::{lexer, parser};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        let tokens = lexer::lex(s);
        assert!(tokens.last().is_some_and(|t| t.kind == lexer::TokenKind::Eof));

        let output = parser::parse(s);
        for decl in &output.program.declarations {
            assert!(decl.span.end <= s.len());
        }
    }
});
