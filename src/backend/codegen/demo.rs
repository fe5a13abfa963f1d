//! Demonstration `main` for programs without pages or handlers.
//!
//! Exercises the first struct's CRUD functions with three sample records.

use std::fmt;

use zelang_core::lang::types::StorageClass;

use crate::backend::c_emitter::{CEmitter, c_string, emit};
use crate::backend::config::GeneratorConfig;

use super::CompilationContext;
use super::model::{FieldModel, StructModel};
use super::records;

/// Text arguments for the sample creates, one row per record.
const SAMPLES: [[&str; 2]; 3] = [["John Doe", "Class A"], ["Jane Smith", "Class B"], ["Bob Johnson", "Class A"]];

/// Text argument used once a sample row runs out of strings.
const FALLBACK_TEXT: &str = "Sample";

pub(super) fn emit_demo_main(e: &mut CEmitter, ctx: &CompilationContext<'_>, config: &GeneratorConfig) -> fmt::Result {
    records::emit_main_prologue(e, ctx, config)?;
    e.line(r#"printf("\n===== CRUD Operations Demo =====\n\n");"#)?;
    e.blank_line();

    if let Some(model) = ctx.primary_struct() {
        emit_creates(e, model)?;
        emit_find(e, model)?;
        emit_list(e, model)?;
        emit_delete(e, model)?;
    }

    e.line(r#"printf("\n===== Demo Complete =====\n");"#)?;
    e.blank_line();
    records::emit_main_epilogue(e, None)
}

/// Arguments for the `index`th sample create (zero-based).
///
/// Text parameters take the row's strings in order; every other parameter gets `(index + 1) * 10`.
pub fn sample_args(model: &StructModel<'_>, index: usize) -> Vec<String> {
    let row = &SAMPLES[index % SAMPLES.len()];
    let mut texts = row.iter();
    model
        .create_params()
        .map(|field| match field.storage {
            Some(StorageClass::Text) => c_string(texts.next().copied().unwrap_or(FALLBACK_TEXT)),
            Some(StorageClass::Double) => format!("{}.0", (index + 1) * 10),
            Some(StorageClass::Int64 | StorageClass::Flag) => ((index + 1) * 10).to_string(),
            None => field.zero_value().to_string(),
        })
        .collect()
}

fn emit_creates(e: &mut CEmitter, model: &StructModel<'_>) -> fmt::Result {
    let name = model.name;
    let var_prefix = name.to_lowercase();
    e.comment("CREATE: Insert records")?;
    e.line(r#"printf("Creating records...\n");"#)?;
    for i in 0..SAMPLES.len() {
        let var = format!("{var_prefix}{}", i + 1);
        emit!(e, "{name}* {var} = {name}_create({});", sample_args(model, i).join(", "))?;
        match model.key_field() {
            Some(key) => emit!(
                e,
                r#"if ({var}) printf("  Created {name} with ID: %lld\n", (long long){var}->{});"#,
                key.name
            )?,
            None => emit!(e, r#"if ({var}) printf("  Created {name}\n");"#)?,
        }
        e.blank_line();
    }
    Ok(())
}

fn emit_find(e: &mut CEmitter, model: &StructModel<'_>) -> fmt::Result {
    let name = model.name;
    e.comment("READ: Find by ID")?;
    e.line(r#"printf("\nFinding record by ID...\n");"#)?;
    emit!(e, "{name}* found = {name}_find(1);")?;
    e.block("if (found)", |e| {
        emit!(e, r#"printf("  Found {name}: ");"#)?;
        for field in model.columns() {
            if let Some(line) = print_field(field, "found") {
                e.line(&line)?;
            }
        }
        e.line(r#"printf("\n");"#)
    })?;
    e.blank_line();
    Ok(())
}

fn emit_list(e: &mut CEmitter, model: &StructModel<'_>) -> fmt::Result {
    let name = model.name;
    e.comment("READ: Get all records")?;
    e.line(r#"printf("\nGetting all records...\n");"#)?;
    e.line("int count = 0;")?;
    emit!(e, "{name}** all = {name}_all(&count);")?;
    e.line(r#"printf("  Found %d records:\n", count);"#)?;
    e.block("for (int i = 0; i < count; i++)", |e| {
        e.line(r#"printf("    [%d]", i + 1);"#)?;
        if let Some(key) = model.key_field() {
            emit!(e, r#"printf(" {}=%lld", (long long)all[i]->{});"#, key.name, key.name)?;
        }
        let first_text = model.columns().find(|f| f.storage == Some(StorageClass::Text));
        if let Some(field) = first_text {
            let value = format!("all[i]->{}", field.name);
            emit!(e, r#"printf(" {}=%s", {value} ? {value} : "(null)");"#, field.name)?;
        }
        e.line(r#"printf("\n");"#)
    })?;
    e.line("free(all);")?;
    e.blank_line();
    Ok(())
}

fn emit_delete(e: &mut CEmitter, model: &StructModel<'_>) -> fmt::Result {
    let name = model.name;
    e.comment("DELETE: Remove a record")?;
    e.line(r#"printf("\nDeleting record with ID=2...\n");"#)?;
    emit!(e, "int deleted = {name}_delete(2);")?;
    e.line(r#"if (deleted) printf("  Record deleted successfully\n");"#)?;
    e.blank_line();

    e.comment("Verify deletion")?;
    e.line(r#"printf("\nVerifying deletion...\n");"#)?;
    emit!(e, "all = {name}_all(&count);")?;
    e.line(r#"printf("  Remaining records: %d\n", count);"#)?;
    e.line("free(all);")?;
    e.blank_line();
    Ok(())
}

/// `printf` of one field of `var`, or `None` when the type has no printable form.
fn print_field(field: &FieldModel<'_>, var: &str) -> Option<String> {
    let name = field.name;
    let value = format!("{var}->{name}");
    let line = match field.storage? {
        StorageClass::Text => format!(r#"printf("{name}=%s ", {value} ? {value} : "(null)");"#),
        StorageClass::Int64 => format!(r#"printf("{name}=%lld ", (long long){value});"#),
        StorageClass::Double => format!(r#"printf("{name}=%f ", {value});"#),
        StorageClass::Flag => format!(r#"printf("{name}=%d ", {value});"#),
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zelang_syntax::ast::Program;
    use zelang_syntax::parser;

    fn program(source: &str) -> Program {
        let output = parser::parse(source);
        assert!(output.diagnostics.is_empty(), "{:?}", output.messages());
        output.program
    }

    fn demo_for(source: &str) -> String {
        let program = program(source);
        let ctx = CompilationContext::classify(&program);
        let mut e = CEmitter::new();
        emit_demo_main(&mut e, &ctx, &GeneratorConfig::default()).unwrap();
        e.finish()
    }

    #[test]
    fn test_sample_args_follow_parameter_types() {
        let program = program(
            "struct Student { @primary @autoincrement int id; string name; int age; string class; float gpa; }",
        );
        let ctx = CompilationContext::classify(&program);
        let model = &ctx.structs[0];
        assert_eq!(sample_args(model, 0), vec![r#""John Doe""#, "10", r#""Class A""#, "10.0"]);
        assert_eq!(sample_args(model, 2), vec![r#""Bob Johnson""#, "30", r#""Class A""#, "30.0"]);
    }

    #[test]
    fn test_extra_text_params_use_fallback() {
        let program = program("struct Note { string a; string b; string c; }");
        let ctx = CompilationContext::classify(&program);
        assert_eq!(
            sample_args(&ctx.structs[0], 1),
            vec![r#""Jane Smith""#, r#""Class B""#, r#""Sample""#]
        );
    }

    #[test]
    fn test_demo_flow() {
        let code = demo_for("struct Student { @primary @autoincrement int id; string name; int age; }");
        assert!(code.contains(r#"Student* student1 = Student_create("John Doe", 10);"#));
        assert!(code.contains(r#"Student* student3 = Student_create("Bob Johnson", 30);"#));
        assert!(code.contains(r#"printf("  Created Student with ID: %lld\n", (long long)student2->id);"#));
        assert!(code.contains("Student* found = Student_find(1);"));
        assert!(code.contains("Student** all = Student_all(&count);"));
        assert!(code.contains("int deleted = Student_delete(2);"));
        assert!(code.contains(r#"printf("  Remaining records: %d\n", count);"#));

        let create = code.find("Student_create(").unwrap_or(usize::MAX);
        let find = code.find("Student_find(1)").unwrap_or(0);
        let delete = code.find("Student_delete(2)").unwrap_or(0);
        assert!(create < find && find < delete);
    }

    #[test]
    fn test_struct_without_int_key_skips_id_prints() {
        let code = demo_for("struct Tag { @primary string label; }");
        assert!(code.contains(r#"if (tag1) printf("  Created Tag\n");"#));
        assert!(!code.contains("->id"));
    }

    #[test]
    fn test_no_structs_still_closes_database() {
        let code = demo_for("");
        assert!(code.contains("CRUD Operations Demo"));
        assert!(code.contains("sqlite3_close(db);"));
        assert!(code.trim_end().ends_with('}'));
        assert!(!code.contains("_create("));
    }
}
