//! Header, globals and record type emission.

use std::fmt;

use crate::backend::c_emitter::{CEmitter, c_string, emit};
use crate::backend::config::GeneratorConfig;
use crate::version::ZELANG_VERSION;

use super::CompilationContext;
use super::model::StructModel;

const BASE_INCLUDES: &[&str] = &["stdio.h", "stdlib.h", "string.h", "stdint.h", "sqlite3.h"];
const WEB_INCLUDES: &[&str] = &["ctype.h", "microhttpd.h"];

/// Banner, includes, the global handles and shared helpers.
pub(super) fn emit_header(e: &mut CEmitter, ctx: &CompilationContext<'_>) -> fmt::Result {
    emit!(e, "// Generated by zelang {ZELANG_VERSION}. Do not edit.")?;
    let web = ctx.is_web();
    let extra: &[&str] = if web { WEB_INCLUDES } else { &[] };
    for include in BASE_INCLUDES.iter().chain(extra) {
        emit!(e, "#include <{include}>")?;
    }
    e.blank_line();

    e.comment("Global database connection")?;
    e.line("sqlite3 *db = NULL;")?;
    e.blank_line();

    if web {
        e.comment("Global HTTP server")?;
        e.line("struct MHD_Daemon *http_daemon = NULL;")?;
        e.blank_line();
    }

    if !ctx.structs.is_empty() {
        e.comment("Copy a text column; SQL NULL stays NULL")?;
        e.block("static char* column_strdup(sqlite3_stmt *stmt, int col)", |e| {
            e.line("const unsigned char *text = sqlite3_column_text(stmt, col);")?;
            e.line("return text ? strdup((const char*)text) : NULL;")
        })?;
        e.blank_line();
    }
    Ok(())
}

/// `typedef struct X { ... } X;` with one member per field, arrays included.
pub(super) fn emit_record(e: &mut CEmitter, model: &StructModel<'_>) -> fmt::Result {
    emit!(e, "// Struct: {}", model.name)?;
    let header = format!("typedef struct {}", model.name);
    let close = format!("}} {};", model.name);
    e.block_with_close(&header, &close, |e| {
        for field in &model.fields {
            if field.is_array {
                emit!(e, "{}* {};", field.c_type, field.name)?;
                emit!(e, "int {}_count;", field.name)?;
            } else {
                emit!(e, "{} {};", field.c_type, field.name)?;
            }
        }
        Ok(())
    })?;
    e.blank_line();
    Ok(())
}

/// Start of `main`: open the database and create every table. Leaves the emitter inside the
/// function body.
pub(super) fn emit_main_prologue(
    e: &mut CEmitter,
    ctx: &CompilationContext<'_>,
    config: &GeneratorConfig,
) -> fmt::Result {
    e.line("int main(int argc, char *argv[]) {")?;
    e.indent();
    e.line("(void)argc;")?;
    e.line("(void)argv;")?;
    e.blank_line();
    e.comment("Initialize database")?;
    emit!(e, "int rc = sqlite3_open({}, &db);", c_string(&config.db_path))?;
    e.block("if (rc != SQLITE_OK)", |e| {
        e.line(r#"fprintf(stderr, "Cannot open database: %s\n", sqlite3_errmsg(db));"#)?;
        e.line("sqlite3_close(db);")?;
        e.line("return 1;")
    })?;
    e.line(r#"printf("Database opened successfully\n");"#)?;
    e.blank_line();

    for model in &ctx.structs {
        emit!(e, "{}_init_table();", model.name)?;
    }
    if !ctx.structs.is_empty() {
        e.blank_line();
    }
    Ok(())
}

/// End of `main`: close the database and return success.
pub(super) fn emit_main_epilogue(e: &mut CEmitter, farewell: Option<&str>) -> fmt::Result {
    e.comment("Close database")?;
    e.line("sqlite3_close(db);")?;
    if let Some(text) = farewell {
        emit!(e, "printf({});", c_string(&format!("{text}\n")))?;
    }
    e.line("return 0;")?;
    e.dedent();
    e.line("}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use zelang_syntax::parser;

    #[test]
    fn test_record_members_follow_declaration_order() {
        let output = parser::parse("struct Post { int id; string[] tags; Author author; float score; }");
        let zelang_syntax::ast::Declaration::Struct(decl) = &output.program.declarations[0].node else {
            panic!("Expected struct");
        };
        let mut e = CEmitter::new();
        emit_record(&mut e, &StructModel::new(decl)).unwrap();
        insta::assert_snapshot!(e.finish(), @r"
        // Struct: Post
        typedef struct Post {
            int64_t id;
            char** tags;
            int tags_count;
            Author author;
            double score;
        } Post;
        ");
    }
}
