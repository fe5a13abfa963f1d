//! C code generation from the zelang AST
//!
//! The generator makes one pass over a [`Program`]:
//! 1. Classify declarations into structs, pages and handlers (web mode if any page/handler)
//! 2. Emit the header, then every record type, then every struct's CRUD functions
//! 3. Emit either the web server (page renderer, request dispatch, server `main`) or a
//!    demonstration `main`
//!
//! ## Module Organization
//!
//! - `model.rs` - Per-struct view models (table name, columns, form fields)
//! - `records.rs` - Header, globals and `typedef struct` emission
//! - `storage.rs` - SQLite CRUD functions
//! - `web.rs` - HTML chrome, page renderer, form parsing, request dispatch, server `main`
//! - `demo.rs` - Demonstration `main` for programs without pages or handlers

mod demo;
pub mod model;
mod records;
mod storage;
mod web;

use zelang_syntax::ast::{Declaration, HandlerDecl, PageDecl, Program};

use super::GenerateError;
use super::c_emitter::CEmitter;
use super::config::GeneratorConfig;
use model::StructModel;

/// Declarations sorted by what the generator does with them.
///
/// Built fresh for every [`CGenerator::generate`] call and dropped when it returns.
#[derive(Debug)]
pub struct CompilationContext<'a> {
    pub structs: Vec<StructModel<'a>>,
    pub pages: Vec<&'a PageDecl>,
    pub handlers: Vec<&'a HandlerDecl>,
}

impl<'a> CompilationContext<'a> {
    pub fn classify(program: &'a Program) -> Self {
        let mut ctx = Self {
            structs: Vec::new(),
            pages: Vec::new(),
            handlers: Vec::new(),
        };

        for decl in &program.declarations {
            match &decl.node {
                Declaration::Struct(s) => ctx.structs.push(StructModel::new(s)),
                Declaration::Page(p) => ctx.pages.push(p),
                Declaration::Handler(h) => ctx.handlers.push(h),
                // Function bodies are opaque; nothing is emitted for them.
                Declaration::Function(_) | Declaration::Main(_) => {}
            }
        }

        ctx
    }

    /// Web mode: any page or handler was declared.
    pub fn is_web(&self) -> bool {
        !self.pages.is_empty() || !self.handlers.is_empty()
    }

    /// The struct that drives the page, routes and demo.
    pub fn primary_struct(&self) -> Option<&StructModel<'a>> {
        self.structs.first()
    }

    pub fn primary_page(&self) -> Option<&'a PageDecl> {
        self.pages.first().copied()
    }
}

/// C generator. Holds configuration only, so one instance can serve any number of programs.
#[derive(Debug, Clone, Default)]
pub struct CGenerator {
    config: GeneratorConfig,
}

impl CGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a complete C translation unit for `program`.
    #[tracing::instrument(skip_all, fields(declarations = program.declarations.len()))]
    pub fn generate(&self, program: &Program) -> Result<String, GenerateError> {
        let ctx = CompilationContext::classify(program);
        tracing::debug!(
            structs = ctx.structs.len(),
            pages = ctx.pages.len(),
            handlers = ctx.handlers.len(),
            web = ctx.is_web(),
            "classified declarations"
        );

        let mut e = CEmitter::with_indent(self.config.indent_width);
        records::emit_header(&mut e, &ctx)?;
        for model in &ctx.structs {
            records::emit_record(&mut e, model)?;
        }
        for model in &ctx.structs {
            storage::emit_crud(&mut e, model, &self.config)?;
        }

        if ctx.is_web() {
            web::emit_web(&mut e, &ctx, &self.config)?;
        } else {
            demo::emit_demo_main(&mut e, &ctx, &self.config)?;
        }

        Ok(e.finish())
    }
}

/// Generate C for `program` with the default configuration.
pub fn generate(program: &Program) -> Result<String, GenerateError> {
    CGenerator::default().generate(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zelang_syntax::parser;

    fn program(source: &str) -> Program {
        let output = parser::parse(source);
        assert!(output.diagnostics.is_empty(), "{:?}", output.messages());
        output.program
    }

    #[test]
    fn test_classification_keeps_encounter_order() {
        let program = program(
            "struct B { int x; } handler h() struct A { int y; } Page P { } int helper() { }",
        );
        let ctx = CompilationContext::classify(&program);
        let names: Vec<_> = ctx.structs.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(ctx.pages.len(), 1);
        assert_eq!(ctx.handlers.len(), 1);
        assert!(ctx.is_web());
        assert_eq!(ctx.primary_struct().map(|s| s.name), Some("B"));
    }

    #[test]
    fn test_handler_alone_enables_web_mode() {
        let program = program("handler ping()");
        assert!(CompilationContext::classify(&program).is_web());
    }

    #[test]
    fn test_empty_program_still_produces_main() {
        let code = generate(&Program::default()).unwrap();
        assert!(code.contains("#include <sqlite3.h>"));
        assert!(code.contains("int main(int argc, char *argv[])"));
        assert!(!code.contains("microhttpd"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let program = program(
            r#"@table("items") struct Item { @primary @autoincrement int id; string name; bool done; }
               @route("/") Page Home { }"#,
        );
        let generator = CGenerator::new(GeneratorConfig::default().with_port(9000));
        assert_eq!(generator.generate(&program).unwrap(), generator.generate(&program).unwrap());
    }
}
