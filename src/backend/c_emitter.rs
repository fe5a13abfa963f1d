//! C code emitter - builds C source text
//!
//! A small line-oriented buffer with indentation tracking. Every writer returns
//! [`fmt::Result`] so generation failures surface as a single error instead of partial output.

use std::fmt::{self, Write};

/// Write one formatted, indented line to a [`CEmitter`], yielding a [`fmt::Result`].
macro_rules! emit {
    ($e:expr) => {
        $e.line("")
    };
    ($e:expr, $($arg:tt)*) => {
        $e.linef(format_args!($($arg)*))
    };
}
pub(crate) use emit;

/// A buffer for building C source code with consistent indentation
#[derive(Debug)]
pub struct CEmitter {
    buffer: String,
    indent_level: usize,
    indent_str: String,
}

impl Default for CEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl CEmitter {
    pub fn new() -> Self {
        Self::with_indent(4)
    }

    /// Create an emitter indenting with `width` spaces per level.
    pub fn with_indent(width: usize) -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            indent_str: " ".repeat(width),
        }
    }

    /// Get the generated code
    pub fn finish(self) -> String {
        self.buffer
    }

    /// Get current buffer as string slice
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Write a line with current indentation. Empty lines carry no trailing whitespace.
    pub fn line(&mut self, s: &str) -> fmt::Result {
        if !s.is_empty() {
            self.write_indent();
            self.buffer.push_str(s);
        }
        self.buffer.push('\n');
        Ok(())
    }

    /// Write a formatted line with current indentation
    pub fn linef(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.write_indent();
        self.buffer.write_fmt(args)?;
        self.buffer.push('\n');
        Ok(())
    }

    /// Write a blank line
    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(&self.indent_str);
        }
    }

    /// Increase indent level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indent level
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write `header {`, the body one level deeper, then `}`.
    pub fn block<F>(&mut self, header: &str, f: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.block_with_close(header, "}", f)
    }

    /// Like [`CEmitter::block`] with a custom closing line, e.g. `} Todo;`.
    pub fn block_with_close<F>(&mut self, header: &str, close: &str, f: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        emit!(self, "{header} {{")?;
        self.indent();
        f(self)?;
        self.dedent();
        self.line(close)
    }

    /// Write a `//` comment
    pub fn comment(&mut self, text: &str) -> fmt::Result {
        emit!(self, "// {text}")
    }

    /// Write a multi-line snippet authored with four-space indentation, re-indented to this
    /// emitter's width relative to the current level.
    pub fn source(&mut self, text: &str) -> fmt::Result {
        for raw in text.lines() {
            let trimmed = raw.trim_start_matches(' ');
            if trimmed.is_empty() {
                self.blank_line();
                continue;
            }
            let depth = (raw.len() - trimmed.len()) / 4;
            self.indent_level += depth;
            let result = self.line(trimmed);
            self.indent_level -= depth;
            result?;
        }
        Ok(())
    }
}

/// Quote `s` as a C string literal.
pub fn c_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_indents_body() {
        let mut e = CEmitter::new();
        e.block("int main(void)", |e| {
            e.line("return 0;")?;
            e.blank_line();
            Ok(())
        })
        .unwrap();
        assert_eq!(e.finish(), "int main(void) {\n    return 0;\n\n}\n");
    }

    #[test]
    fn test_custom_indent_and_close() {
        let mut e = CEmitter::with_indent(2);
        e.block_with_close("typedef struct Todo", "} Todo;", |e| emit!(e, "int64_t {};", "id"))
            .unwrap();
        assert_eq!(e.as_str(), "typedef struct Todo {\n  int64_t id;\n} Todo;\n");
    }

    #[test]
    fn test_source_reindents_snippets() {
        let mut e = CEmitter::with_indent(2);
        e.indent();
        e.source("if (x) {\n    y();\n\n}\n").unwrap();
        assert_eq!(e.finish(), "  if (x) {\n    y();\n\n  }\n");
    }

    #[test]
    fn test_c_string_escapes() {
        assert_eq!(c_string("a \"b\"\n"), r#""a \"b\"\n""#);
        assert_eq!(c_string("<td>%s</td>"), r#""<td>%s</td>""#);
    }
}
