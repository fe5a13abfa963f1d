//! SQLite CRUD emission
//!
//! Per struct, in this order: `X_init_table`, `X_create`, `X_find`, `X_all`, `X_delete`.
//! Reads use an explicit column list, so column indices always match [`FieldModel::column`].

use std::fmt;

use zelang_core::lang::types::StorageClass;

use crate::backend::c_emitter::{CEmitter, c_string, emit};
use crate::backend::config::GeneratorConfig;

use super::model::{FieldModel, StructModel};

pub(super) fn emit_crud(e: &mut CEmitter, model: &StructModel<'_>, config: &GeneratorConfig) -> fmt::Result {
    emit_init_table(e, model)?;
    emit_create(e, model)?;
    emit_find(e, model)?;
    emit_all(e, model, config)?;
    emit_delete(e, model)
}

/// `CREATE TABLE IF NOT EXISTS` over the persisted columns.
pub fn create_table_sql(model: &StructModel<'_>) -> String {
    let columns: Vec<_> = model
        .columns()
        .map(|f| format!("{} {}{}", f.name, f.sql_type, f.constraints))
        .collect();
    format!("CREATE TABLE IF NOT EXISTS {} ({})", model.table, columns.join(", "))
}

pub fn insert_sql(model: &StructModel<'_>) -> String {
    let names: Vec<_> = model.create_params().map(|f| f.name).collect();
    if names.is_empty() {
        return format!("INSERT INTO {} DEFAULT VALUES", model.table);
    }
    let placeholders = vec!["?"; names.len()].join(", ");
    format!("INSERT INTO {} ({}) VALUES ({placeholders})", model.table, names.join(", "))
}

/// `Todo* Todo_create(char* title, int done)`
pub fn create_signature(model: &StructModel<'_>) -> String {
    let params: Vec<_> = model
        .create_params()
        .map(|f| format!("{} {}", f.c_type, f.name))
        .collect();
    let params = if params.is_empty() { "void".to_string() } else { params.join(", ") };
    format!("{name}* {name}_create({params})", name = model.name)
}

fn emit_init_table(e: &mut CEmitter, model: &StructModel<'_>) -> fmt::Result {
    let header = format!("void {}_init_table(void)", model.name);
    e.block(&header, |e| {
        emit!(e, "const char *sql = {};", c_string(&create_table_sql(model)))?;
        e.blank_line();
        e.line("char *err_msg = NULL;")?;
        e.line("int rc = sqlite3_exec(db, sql, NULL, NULL, &err_msg);")?;
        e.line("if (rc != SQLITE_OK) {")?;
        e.indent();
        e.line(r#"fprintf(stderr, "SQL error: %s\n", err_msg);"#)?;
        e.line("sqlite3_free(err_msg);")?;
        e.dedent();
        e.line("} else {")?;
        e.indent();
        emit!(e, r#"printf("Table {} created successfully\n");"#, model.table)?;
        e.dedent();
        e.line("}")
    })?;
    e.blank_line();
    Ok(())
}

fn emit_create(e: &mut CEmitter, model: &StructModel<'_>) -> fmt::Result {
    let takes_row_id = model.columns().any(FieldModel::takes_row_id);

    e.block(&create_signature(model), |e| {
        emit!(e, "const char *sql = {};", c_string(&insert_sql(model)))?;
        emit_prepare(e, "return NULL;")?;

        let mut bound = false;
        for (index, field) in model.create_params().enumerate() {
            if let Some(call) = bind_call(field, index + 1) {
                e.line(&call)?;
                bound = true;
            }
        }
        if bound {
            e.blank_line();
        }

        e.line("rc = sqlite3_step(stmt);")?;
        e.block("if (rc != SQLITE_DONE)", |e| {
            e.line(r#"fprintf(stderr, "Failed to insert: %s\n", sqlite3_errmsg(db));"#)?;
            e.line("sqlite3_finalize(stmt);")?;
            e.line("return NULL;")
        })?;
        e.blank_line();

        if takes_row_id {
            e.line("int64_t last_insert_id = sqlite3_last_insert_rowid(db);")?;
        }
        e.line("sqlite3_finalize(stmt);")?;
        e.blank_line();

        emit_alloc(e, model)?;
        for field in model.columns() {
            if field.takes_row_id() {
                emit!(e, "obj->{} = last_insert_id;", field.name)?;
            } else if field.is_create_param() {
                if field.storage == Some(StorageClass::Text) {
                    emit!(e, "obj->{0} = {0} ? strdup({0}) : NULL;", field.name)?;
                } else {
                    emit!(e, "obj->{0} = {0};", field.name)?;
                }
            }
        }
        e.blank_line();
        e.line("return obj;")
    })?;
    e.blank_line();
    Ok(())
}

fn emit_find(e: &mut CEmitter, model: &StructModel<'_>) -> fmt::Result {
    let header = format!("{name}* {name}_find(int64_t id)", name = model.name);
    e.block(&header, |e| {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?",
            model.column_list(),
            model.table,
            model.key_column
        );
        emit!(e, "const char *sql = {};", c_string(&sql))?;
        emit_prepare(e, "return NULL;")?;

        e.line("sqlite3_bind_int64(stmt, 1, id);")?;
        e.blank_line();
        e.line("rc = sqlite3_step(stmt);")?;
        e.block("if (rc != SQLITE_ROW)", |e| {
            e.line("sqlite3_finalize(stmt);")?;
            e.line("return NULL;")
        })?;
        e.blank_line();

        emit_alloc(e, model)?;
        emit_column_reads(e, model)?;
        e.blank_line();
        e.line("sqlite3_finalize(stmt);")?;
        e.line("return obj;")
    })?;
    e.blank_line();
    Ok(())
}

fn emit_all(e: &mut CEmitter, model: &StructModel<'_>, config: &GeneratorConfig) -> fmt::Result {
    let name = model.name;
    let header = format!("{name}** {name}_all(int* count)");
    e.block(&header, |e| {
        let sql = format!("SELECT {} FROM {}", model.column_list(), model.table);
        emit!(e, "const char *sql = {};", c_string(&sql))?;
        e.line("sqlite3_stmt *stmt;")?;
        e.blank_line();
        e.line("int rc = sqlite3_prepare_v2(db, sql, -1, &stmt, NULL);")?;
        e.block("if (rc != SQLITE_OK)", |e| {
            e.line(r#"fprintf(stderr, "Failed to prepare statement: %s\n", sqlite3_errmsg(db));"#)?;
            e.line("*count = 0;")?;
            e.line("return NULL;")
        })?;
        e.blank_line();

        emit!(e, "int capacity = {};", config.list_capacity)?;
        emit!(e, "{name}** results = ({name}**)malloc(capacity * sizeof({name}*));")?;
        e.line("int n = 0;")?;
        e.blank_line();

        e.block("while ((rc = sqlite3_step(stmt)) == SQLITE_ROW)", |e| {
            e.block("if (n >= capacity)", |e| {
                e.line("capacity *= 2;")?;
                emit!(e, "results = ({name}**)realloc(results, capacity * sizeof({name}*));")
            })?;
            e.blank_line();
            emit_alloc(e, model)?;
            emit_column_reads(e, model)?;
            e.blank_line();
            e.line("results[n++] = obj;")
        })?;
        e.blank_line();

        e.line("sqlite3_finalize(stmt);")?;
        e.line("*count = n;")?;
        e.line("return results;")
    })?;
    e.blank_line();
    Ok(())
}

fn emit_delete(e: &mut CEmitter, model: &StructModel<'_>) -> fmt::Result {
    let header = format!("int {}_delete(int64_t id)", model.name);
    e.block(&header, |e| {
        let sql = format!("DELETE FROM {} WHERE {} = ?", model.table, model.key_column);
        emit!(e, "const char *sql = {};", c_string(&sql))?;
        emit_prepare(e, "return 0;")?;

        e.line("sqlite3_bind_int64(stmt, 1, id);")?;
        e.blank_line();
        e.line("rc = sqlite3_step(stmt);")?;
        e.line("sqlite3_finalize(stmt);")?;
        e.blank_line();
        e.block("if (rc != SQLITE_DONE)", |e| {
            e.line(r#"fprintf(stderr, "Failed to delete: %s\n", sqlite3_errmsg(db));"#)?;
            e.line("return 0;")
        })?;
        e.blank_line();
        e.line("return 1;")
    })?;
    e.blank_line();
    Ok(())
}

/// Declare `stmt`, prepare `sql`, and bail out with `on_error` if preparation fails.
fn emit_prepare(e: &mut CEmitter, on_error: &str) -> fmt::Result {
    e.line("sqlite3_stmt *stmt;")?;
    e.blank_line();
    e.line("int rc = sqlite3_prepare_v2(db, sql, -1, &stmt, NULL);")?;
    e.block("if (rc != SQLITE_OK)", |e| {
        e.line(r#"fprintf(stderr, "Failed to prepare statement: %s\n", sqlite3_errmsg(db));"#)?;
        e.line(on_error)
    })?;
    e.blank_line();
    Ok(())
}

/// Zeroed allocation, so members that are never filled (arrays, auto fields) start empty.
fn emit_alloc(e: &mut CEmitter, model: &StructModel<'_>) -> fmt::Result {
    emit!(e, "{0}* obj = ({0}*)calloc(1, sizeof({0}));", model.name)
}

fn emit_column_reads(e: &mut CEmitter, model: &StructModel<'_>) -> fmt::Result {
    for field in model.columns() {
        let Some(column) = field.column else { continue };
        let read = match field.storage {
            Some(StorageClass::Int64) => format!("sqlite3_column_int64(stmt, {column})"),
            Some(StorageClass::Double) => format!("sqlite3_column_double(stmt, {column})"),
            Some(StorageClass::Flag) => format!("sqlite3_column_int(stmt, {column})"),
            Some(StorageClass::Text) => format!("column_strdup(stmt, {column})"),
            None => continue,
        };
        emit!(e, "obj->{} = {read};", field.name)?;
    }
    Ok(())
}

fn bind_call(field: &FieldModel<'_>, index: usize) -> Option<String> {
    let name = field.name;
    Some(match field.storage? {
        StorageClass::Int64 => format!("sqlite3_bind_int64(stmt, {index}, {name});"),
        StorageClass::Double => format!("sqlite3_bind_double(stmt, {index}, {name});"),
        StorageClass::Flag => format!("sqlite3_bind_int(stmt, {index}, {name});"),
        StorageClass::Text => format!("sqlite3_bind_text(stmt, {index}, {name}, -1, SQLITE_TRANSIENT);"),
    })
}
