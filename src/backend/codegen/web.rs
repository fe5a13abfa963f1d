//! Web front end emission (libmicrohttpd)
//!
//! Only the first page and the first struct drive UI and routes. Later structs still get
//! records and CRUD functions, but no page, form or route.

use std::fmt;

use zelang_core::lang::decorators::{DecoratorId, ROUTE_METHOD_ARG};
use zelang_core::lang::types::StorageClass;
use zelang_syntax::ast::{Decorated, HandlerDecl, PageDecl};

use crate::backend::c_emitter::{CEmitter, c_string, emit};
use crate::backend::config::GeneratorConfig;

use super::CompilationContext;
use super::model::{FieldModel, InputKind, StructModel};
use super::records;

const HTML_HEADER: &str = include_str!("../templates/html_header.html");
const HTML_FOOTER: &str = include_str!("../templates/html_footer.html");

/// Bytes reserved for each decoded form name and value, terminator included.
pub const FORM_VALUE_BYTES: usize = 256;

const REDIRECT_BODY: &str = "<html><head><meta http-equiv='refresh' content='0;url=/'></head></html>";
const NOT_FOUND_BODY: &str = "<h1>404 Not Found</h1>";

pub(super) fn emit_web(e: &mut CEmitter, ctx: &CompilationContext<'_>, config: &GeneratorConfig) -> fmt::Result {
    emit_chrome(e)?;
    if let Some(page) = ctx.primary_page() {
        emit_page_renderer(e, page, ctx.primary_struct(), config)?;
    }
    emit_form_helpers(e, config)?;
    emit_handler_notes(e, &ctx.handlers)?;
    emit_dispatch(e, ctx, config)?;
    emit_server_main(e, ctx, config)
}

/// `render_<page>_page`
pub fn render_function_name(page: &PageDecl) -> String {
    format!("render_{}_page", page.name.to_lowercase())
}

/// The HTML control for one form field, newline included.
pub fn form_control_html(field: &FieldModel<'_>) -> String {
    let name = field.name;
    let required = if field.is_required { " required" } else { "" };
    match field.input_kind() {
        InputKind::TextArea => {
            format!("<textarea name='{name}' class='form-control' rows='3'{required}></textarea>\n")
        }
        InputKind::Checkbox => format!("<input type='checkbox' name='{name}' class='form-check-input'{required}>\n"),
        InputKind::Number => format!("<input type='number' name='{name}' class='form-control'{required}>\n"),
        InputKind::Text => format!("<input type='text' name='{name}' class='form-control'{required}>\n"),
    }
}

/// One-line summary of a handler for the generated listing: `name: METHOD /path (params)`.
pub fn handler_summary(handler: &HandlerDecl) -> String {
    let route = match handler.route() {
        Some(path) => {
            let method = handler
                .decorator(DecoratorId::Route)
                .and_then(|d| d.kwarg(ROUTE_METHOD_ARG))
                .unwrap_or("GET");
            format!("{method} {path}")
        }
        None => "(no route)".to_string(),
    };
    let params: Vec<_> = handler.params.iter().map(|p| format!("{} {}", p.ty, p.name)).collect();
    format!("{}: {route} ({})", handler.name, params.join(", "))
}

// ============================================================================
// HTML
// ============================================================================

fn emit_chrome(e: &mut CEmitter) -> fmt::Result {
    e.comment("HTML generation functions")?;
    emit_string_constant(e, "html_header", HTML_HEADER)?;
    e.blank_line();
    emit_string_constant(e, "html_footer", HTML_FOOTER)?;
    e.blank_line();
    Ok(())
}

fn emit_string_constant(e: &mut CEmitter, name: &str, text: &str) -> fmt::Result {
    emit!(e, "const char* {name} =")?;
    e.indent();
    let lines: Vec<_> = text.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        let terminator = if i + 1 == lines.len() { ";" } else { "" };
        emit!(e, "{}{terminator}", c_string(&format!("{line}\n")))?;
    }
    if lines.is_empty() {
        e.line("\"\";")?;
    }
    e.dedent();
    Ok(())
}

/// `offset += sprintf(html + offset, "<literal>");` with `%` escaped, so names never act as conversions.
fn append(e: &mut CEmitter, literal: &str) -> fmt::Result {
    emit!(e, "offset += sprintf(html + offset, {});", c_string(&literal.replace('%', "%%")))
}

/// `offset += sprintf(html + offset, "<format>", args);`
fn append_with(e: &mut CEmitter, format: &str, args: &str) -> fmt::Result {
    emit!(e, "offset += sprintf(html + offset, {}, {args});", c_string(format))
}

fn emit_page_renderer(
    e: &mut CEmitter,
    page: &PageDecl,
    model: Option<&StructModel<'_>>,
    config: &GeneratorConfig,
) -> fmt::Result {
    let header = format!("char* {}(void)", render_function_name(page));
    e.block(&header, |e| {
        emit!(e, "char* html = (char*)malloc({});", config.page_buffer_size)?;
        e.line("int offset = 0;")?;
        e.blank_line();

        emit!(e, "offset += sprintf(html + offset, html_header, {});", c_string(&page.name))?;
        append(e, &format!("<h1 class='mb-4'>{}</h1>\n", page.name))?;
        e.blank_line();

        if let Some(model) = model {
            emit_data_list(e, model)?;
            emit_create_form(e, model)?;
        }

        append_with(e, "%s", "html_footer")?;
        e.line("return html;")
    })?;
    e.blank_line();
    Ok(())
}

fn emit_data_list(e: &mut CEmitter, model: &StructModel<'_>) -> fmt::Result {
    e.comment("DataList - Show all records")?;
    append(e, "<h2>All Items</h2>\n")?;
    append(e, "<table class='table table-striped'>\n")?;
    append(e, "<thead><tr>")?;
    for field in model.columns() {
        append(e, &format!("<th>{}</th>", field.label()))?;
    }
    append(e, "<th>Actions</th>")?;
    append(e, "</tr></thead>\n")?;
    append(e, "<tbody>\n")?;
    e.blank_line();

    let name = model.name;
    e.line("int count = 0;")?;
    emit!(e, "{name}** items = {name}_all(&count);")?;
    e.block("for (int i = 0; i < count; i++)", |e| {
        append(e, "<tr>")?;
        for field in model.columns() {
            let value = format!("items[i]->{}", field.name);
            match field.storage {
                Some(StorageClass::Text) => append_with(e, "<td>%s</td>", &format!("{value} ? {value} : \"\""))?,
                Some(StorageClass::Int64) => append_with(e, "<td>%lld</td>", &format!("(long long){value}"))?,
                Some(StorageClass::Double) => append_with(e, "<td>%f</td>", &value)?,
                Some(StorageClass::Flag) => append_with(e, "<td>%s</td>", &format!("{value} ? \"Yes\" : \"No\""))?,
                None => append(e, "<td></td>")?,
            }
        }
        match model.key_field() {
            Some(key) => append_with(
                e,
                "<td><a href='%s?id=%lld' class='btn btn-sm btn-danger'>Delete</a></td>",
                &format!("{}, (long long)items[i]->{}", c_string(&model.delete_path()), key.name),
            )?,
            None => append(e, "<td></td>")?,
        }
        append(e, "</tr>\n")
    })?;
    e.line("free(items);")?;
    e.blank_line();
    append(e, "</tbody></table>\n")?;
    e.blank_line();
    Ok(())
}

fn emit_create_form(e: &mut CEmitter, model: &StructModel<'_>) -> fmt::Result {
    e.comment("Form - Add new record")?;
    append(e, "<h2 class='mt-5'>Add New Item</h2>\n")?;
    append(e, &format!("<form method='POST' action='{}'>\n", model.create_path()))?;
    for field in model.form_fields() {
        append(e, "<div class='mb-3'>\n")?;
        append(e, &format!("<label class='form-label'>{}</label>\n", field.label()))?;
        append(e, &form_control_html(field))?;
        append(e, "</div>\n")?;
    }
    append(e, "<button type='submit' class='btn btn-primary'>Add Item</button>\n")?;
    append(e, "</form>\n")?;
    e.blank_line();
    Ok(())
}

// ============================================================================
// Form parsing
// ============================================================================

fn emit_form_helpers(e: &mut CEmitter, config: &GeneratorConfig) -> fmt::Result {
    e.comment("URL decode helper: %XX escapes and '+' as space, bounded by cap")?;
    e.source(
        r"void url_decode(char *dst, const char *src, size_t cap) {
    char *end = dst + cap - 1;
    char a, b;
    while (*src && dst < end) {
        if ((*src == '%') && ((a = src[1]) && (b = src[2])) && (isxdigit(a) && isxdigit(b))) {
            if (a >= 'a') a -= 'a' - 'A';
            if (a >= 'A') a -= ('A' - 10);
            else a -= '0';
            if (b >= 'a') b -= 'a' - 'A';
            if (b >= 'A') b -= ('A' - 10);
            else b -= '0';
            *dst++ = 16 * a + b;
            src += 3;
        } else if (*src == '+') {
            *dst++ = ' ';
            src++;
        } else {
            *dst++ = *src++;
        }
    }
    *dst = '\0';
}
",
    )?;
    e.blank_line();

    let bytes = FORM_VALUE_BYTES;
    let limit = config.form_pair_limit;
    e.comment("Parse an application/x-www-form-urlencoded body into name/value pairs")?;
    e.source(&format!(
        r#"void parse_form_data(const char* data, size_t size, char fields[][{bytes}], char values[][{bytes}], int* count) {{
    char* datacopy = strndup(data, size);
    *count = 0;
    if (datacopy == NULL) return;

    char* pair = strtok(datacopy, "&");
    while (pair != NULL && *count < {limit}) {{
        char* eq = strchr(pair, '=');
        if (eq) {{
            *eq = '\0';
            url_decode(fields[*count], pair, {bytes});
            url_decode(values[*count], eq + 1, {bytes});
            (*count)++;
        }}
        pair = strtok(NULL, "&");
    }}
    free(datacopy);
}}
"#
    ))?;
    e.blank_line();
    Ok(())
}

// ============================================================================
// Dispatch
// ============================================================================

fn emit_handler_notes(e: &mut CEmitter, handlers: &[&HandlerDecl]) -> fmt::Result {
    if handlers.is_empty() {
        return Ok(());
    }
    e.comment("Declared handlers (bodies are not compiled):")?;
    for handler in handlers {
        e.comment(&format!("  {}", handler_summary(handler)))?;
    }
    e.blank_line();
    Ok(())
}

fn emit_dispatch(e: &mut CEmitter, ctx: &CompilationContext<'_>, config: &GeneratorConfig) -> fmt::Result {
    e.comment("Redirect the browser back to the index page")?;
    e.block("static enum MHD_Result redirect_home(struct MHD_Connection *connection)", |e| {
        emit!(e, "const char* body = {};", c_string(REDIRECT_BODY))?;
        e.line("struct MHD_Response *response = MHD_create_response_from_buffer(strlen(body), (void*)body, MHD_RESPMEM_PERSISTENT);")?;
        e.line(r#"MHD_add_response_header(response, "Location", "/");"#)?;
        e.line("enum MHD_Result ret = MHD_queue_response(connection, MHD_HTTP_SEE_OTHER, response);")?;
        e.line("MHD_destroy_response(response);")?;
        e.line("return ret;")
    })?;
    e.blank_line();

    e.comment("HTTP request handler")?;
    e.source(
        "enum MHD_Result handle_request(void *cls, struct MHD_Connection *connection,
                               const char *url, const char *method,
                               const char *version, const char *upload_data,
                               size_t *upload_data_size, void **con_cls) {",
    )?;
    e.indent();
    e.line("struct MHD_Response *response;")?;
    e.line("enum MHD_Result ret;")?;
    e.line("(void)cls;")?;
    e.line("(void)version;")?;
    e.blank_line();

    if let Some(model) = ctx.primary_struct() {
        emit_create_route(e, model, config)?;
        emit_delete_route(e, model)?;
    } else {
        if ctx.primary_page().is_none() {
            e.line("(void)url;")?;
            e.line("(void)method;")?;
        }
        e.line("(void)upload_data;")?;
        e.line("(void)upload_data_size;")?;
        e.line("(void)con_cls;")?;
        e.blank_line();
    }

    if let Some(page) = ctx.primary_page() {
        e.block(r#"if (strcmp(url, "/") == 0 && strcmp(method, "GET") == 0)"#, |e| {
            emit!(e, "char* html = {}();", render_function_name(page))?;
            e.line("response = MHD_create_response_from_buffer(strlen(html), (void*)html, MHD_RESPMEM_MUST_FREE);")?;
            e.line(r#"MHD_add_response_header(response, "Content-Type", "text/html");"#)?;
            e.line("ret = MHD_queue_response(connection, MHD_HTTP_OK, response);")?;
            e.line("MHD_destroy_response(response);")?;
            e.line("return ret;")
        })?;
        e.blank_line();
    }

    e.comment("404")?;
    emit!(e, "const char* not_found = {};", c_string(NOT_FOUND_BODY))?;
    e.line("response = MHD_create_response_from_buffer(strlen(not_found), (void*)not_found, MHD_RESPMEM_PERSISTENT);")?;
    e.line("ret = MHD_queue_response(connection, MHD_HTTP_NOT_FOUND, response);")?;
    e.line("MHD_destroy_response(response);")?;
    e.line("return ret;")?;
    e.dedent();
    e.line("}")?;
    e.blank_line();
    Ok(())
}

fn emit_create_route(e: &mut CEmitter, model: &StructModel<'_>, config: &GeneratorConfig) -> fmt::Result {
    let condition = format!(
        "if (strcmp(url, {}) == 0 && strcmp(method, \"POST\") == 0)",
        c_string(&model.create_path())
    );
    e.block(&condition, |e| {
        e.comment("First call: set up")?;
        e.block("if (*con_cls == NULL)", |e| {
            e.line("*con_cls = (void*)1;")?;
            e.line("return MHD_YES;")
        })?;
        e.blank_line();

        e.comment("Process POST data")?;
        e.block("if (*upload_data_size != 0)", |e| {
            emit!(e, "char fields[{}][{FORM_VALUE_BYTES}];", config.form_pair_limit)?;
            emit!(e, "char values[{}][{FORM_VALUE_BYTES}];", config.form_pair_limit)?;
            e.line("int count;")?;
            e.line("parse_form_data(upload_data, *upload_data_size, fields, values, &count);")?;
            e.blank_line();

            e.comment("Extract form values")?;
            for field in model.create_params() {
                emit!(e, "{} {} = {};", field.c_type, field.name, form_default(field))?;
            }
            e.block("for (int i = 0; i < count; i++)", |e| {
                for field in model.form_fields() {
                    if let Some(value) = form_coercion(field) {
                        emit!(
                            e,
                            "if (strcmp(fields[i], {}) == 0) {} = {value};",
                            c_string(field.name),
                            field.name
                        )?;
                    }
                }
                Ok(())
            })?;
            e.blank_line();

            let args: Vec<_> = model.create_params().map(|f| f.name).collect();
            emit!(e, "{}_create({});", model.name, args.join(", "))?;
            e.blank_line();
            e.line("*upload_data_size = 0;")?;
            e.line("return MHD_YES;")
        })?;
        e.blank_line();

        e.comment("Send redirect response")?;
        e.line("return redirect_home(connection);")
    })?;
    e.blank_line();
    Ok(())
}

fn emit_delete_route(e: &mut CEmitter, model: &StructModel<'_>) -> fmt::Result {
    let path = model.delete_path();
    let condition = format!(
        "if (strncmp(url, {}, {}) == 0 && strcmp(method, \"GET\") == 0)",
        c_string(&path),
        path.len()
    );
    e.block(&condition, |e| {
        e.line(r#"const char* id_str = MHD_lookup_connection_value(connection, MHD_GET_ARGUMENT_KIND, "id");"#)?;
        e.block("if (id_str)", |e| {
            e.line("int64_t id = atoll(id_str);")?;
            emit!(e, "{}_delete(id);", model.name)
        })?;
        e.line("return redirect_home(connection);")
    })?;
    e.blank_line();
    Ok(())
}

/// Value of a create argument when the form does not supply it.
fn form_default(field: &FieldModel<'_>) -> String {
    match field.storage {
        Some(StorageClass::Text) => "\"\"".to_string(),
        _ => field.zero_value().to_string(),
    }
}

/// Expression converting `values[i]` to the field's C type.
fn form_coercion(field: &FieldModel<'_>) -> Option<&'static str> {
    Some(match field.storage? {
        StorageClass::Text => "strdup(values[i])",
        StorageClass::Flag => "1",
        StorageClass::Int64 => "atoll(values[i])",
        StorageClass::Double => "atof(values[i])",
    })
}

// ============================================================================
// Server entry point
// ============================================================================

fn emit_server_main(e: &mut CEmitter, ctx: &CompilationContext<'_>, config: &GeneratorConfig) -> fmt::Result {
    records::emit_main_prologue(e, ctx, config)?;

    e.comment("Start HTTP server")?;
    emit!(e, "http_daemon = MHD_start_daemon(MHD_USE_SELECT_INTERNALLY, {}, NULL, NULL,", config.port)?;
    e.line("                               &handle_request, NULL, MHD_OPTION_END);")?;
    e.block("if (http_daemon == NULL)", |e| {
        e.line(r#"fprintf(stderr, "Failed to start HTTP server\n");"#)?;
        e.line("sqlite3_close(db);")?;
        e.line("return 1;")
    })?;
    e.blank_line();

    e.line(r#"printf("\n========================================\n");"#)?;
    emit!(e, r#"printf("Server running on http://localhost:{}\n");"#, config.port)?;
    e.line(r#"printf("Press ENTER to stop the server...\n");"#)?;
    e.line(r#"printf("========================================\n\n");"#)?;
    e.blank_line();
    e.line("getchar();")?;
    e.blank_line();

    e.comment("Stop HTTP server")?;
    e.line("MHD_stop_daemon(http_daemon);")?;
    e.blank_line();
    records::emit_main_epilogue(e, Some("Server stopped"))
}
