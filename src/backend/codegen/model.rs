//! View models for C emission
//!
//! Every emitter reads a struct through a [`StructModel`] so that table naming, column order
//! and field classification are computed once and agree everywhere: the schema, the bind list,
//! column reads, HTML columns and form controls all derive from the same field list.

use zelang_core::lang::decorators::{self, DecoratorId};
use zelang_core::lang::types::{self, DomainTypeId, StorageClass};
use zelang_syntax::ast::{Decorated, FieldDecl, StructDecl};

/// Key column used when no field is marked `primary`.
pub const DEFAULT_KEY_COLUMN: &str = "id";

/// Field name that always renders as a multi-line text area.
pub const TEXTAREA_FIELD: &str = "description";

/// HTML control chosen for a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    TextArea,
    Checkbox,
    Number,
    Text,
}

/// One struct, prepared for emission.
#[derive(Debug, Clone)]
pub struct StructModel<'a> {
    pub name: &'a str,
    pub table: String,
    pub fields: Vec<FieldModel<'a>>,
    /// Column used by `find` and `delete`.
    pub key_column: &'a str,
}

/// One field, prepared for emission.
#[derive(Debug, Clone)]
pub struct FieldModel<'a> {
    pub name: &'a str,
    /// Declared type spelling.
    pub ty: &'a str,
    pub c_type: &'a str,
    pub sql_type: &'static str,
    /// `None` for type names outside the primitive table; such values are never bound or read.
    pub storage: Option<StorageClass>,
    pub is_array: bool,
    pub is_primary: bool,
    pub is_autoincrement: bool,
    pub is_timestamp: bool,
    pub is_required: bool,
    /// Constraint suffix for the schema, in decorator order.
    pub constraints: String,
    /// Zero-based position in the persisted column list; `None` for arrays.
    pub column: Option<usize>,
}

impl<'a> StructModel<'a> {
    pub fn new(decl: &'a StructDecl) -> Self {
        let mut next_column = 0;
        let fields: Vec<_> = decl
            .fields
            .iter()
            .map(|field| {
                let column = (!field.node.is_array).then(|| {
                    next_column += 1;
                    next_column - 1
                });
                FieldModel::new(&field.node, column)
            })
            .collect();

        let key_column = fields
            .iter()
            .find(|f| f.is_primary && !f.is_array)
            .map_or(DEFAULT_KEY_COLUMN, |f| f.name);

        Self {
            name: &decl.name,
            table: table_name(decl),
            fields,
            key_column,
        }
    }

    /// Persisted fields, in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &FieldModel<'a>> {
        self.fields.iter().filter(|f| !f.is_array)
    }

    /// Comma-separated persisted column names.
    pub fn column_list(&self) -> String {
        self.columns().map(|f| f.name).collect::<Vec<_>>().join(", ")
    }

    /// Fields supplied by the caller of `X_create`.
    pub fn create_params(&self) -> impl Iterator<Item = &FieldModel<'a>> {
        self.columns().filter(|f| f.is_create_param())
    }

    /// Fields that get a control in the generated create form.
    pub fn form_fields(&self) -> impl Iterator<Item = &FieldModel<'a>> {
        self.create_params().filter(|f| !f.is_primary)
    }

    /// The integer field holding the row identifier, if the struct declares one.
    ///
    /// Generated links and demo output print the key with `%lld`, so only `int` keys qualify.
    pub fn key_field(&self) -> Option<&FieldModel<'a>> {
        self.columns()
            .find(|f| f.name == self.key_column)
            .filter(|f| f.storage == Some(StorageClass::Int64))
    }

    pub fn create_path(&self) -> String {
        format!("/{}/create", self.table)
    }

    pub fn delete_path(&self) -> String {
        format!("/{}/delete", self.table)
    }
}

impl<'a> FieldModel<'a> {
    fn new(field: &'a FieldDecl, column: Option<usize>) -> Self {
        Self {
            name: &field.name,
            ty: &field.ty,
            c_type: types::c_type_for(&field.ty),
            sql_type: types::sql_type_for(&field.ty),
            storage: types::storage_for(&field.ty),
            is_array: field.is_array,
            is_primary: field.has_decorator(DecoratorId::Primary),
            is_autoincrement: field.has_decorator(DecoratorId::AutoIncrement),
            is_timestamp: field.has_decorator(DecoratorId::Timestamp),
            is_required: field.has_decorator(DecoratorId::Required),
            constraints: constraints(field),
            column,
        }
    }

    pub fn is_create_param(&self) -> bool {
        !self.is_array && !self.is_autoincrement && !self.is_timestamp
    }

    /// Whether `create` fills this field from the new row id.
    pub fn takes_row_id(&self) -> bool {
        self.is_autoincrement && (self.is_primary || self.name == DEFAULT_KEY_COLUMN)
    }

    pub fn input_kind(&self) -> InputKind {
        input_kind(self.name, self.ty)
    }

    pub fn label(&self) -> String {
        title_case(self.name)
    }

    /// Zero value of the field's C type, used for locals and unfilled members.
    ///
    /// Unknown type names get a plain `0`; the name may not be declared anywhere in the output.
    pub fn zero_value(&self) -> &'static str {
        match self.storage {
            Some(StorageClass::Text) => "NULL",
            Some(StorageClass::Double) => "0.0",
            Some(StorageClass::Int64 | StorageClass::Flag) | None => "0",
        }
    }
}

/// Table name for a struct: the `table` decorator's first argument (quotes stripped, used as
/// written even when empty), else the lowercased struct name plus `s`.
pub fn table_name(decl: &StructDecl) -> String {
    decl.decorator(DecoratorId::Table)
        .and_then(|d| d.first_arg())
        .map_or_else(|| format!("{}s", decl.name.to_lowercase()), |arg| arg.trim_matches('"').to_string())
}

/// Schema constraint suffix for a field, one entry per constraint decorator in source order.
pub fn constraints(field: &FieldDecl) -> String {
    field
        .decorator_ids()
        .filter_map(decorators::sql_constraint)
        .collect()
}

/// Form control for a field.
pub fn input_kind(name: &str, ty: &str) -> InputKind {
    if name == TEXTAREA_FIELD {
        return InputKind::TextArea;
    }
    match types::from_str(ty) {
        Some(DomainTypeId::Bool) => InputKind::Checkbox,
        Some(DomainTypeId::Int) => InputKind::Number,
        _ => InputKind::Text,
    }
}

/// Uppercase the first character: `title` → `Title`.
pub fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
