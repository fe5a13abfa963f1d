//! Snapshot tests for generated C
//!
//! Each test compiles a small zelang program and snapshots one generated function, so a change to
//! the emitted C shows up as a reviewable diff.
//!
//! Run with: `cargo test --test codegen_snapshot_tests`
//! Review changes: `cargo insta review`

use zelang::backend::generate;
use zelang::parser;

const PRODUCT: &str = "struct Product { @primary @autoincrement int id; @required string name; float price; }";

/// Generate C from zelang source
fn generate_c(source: &str) -> String {
    let output = parser::parse(source);
    assert!(output.diagnostics.is_empty(), "{:?}", output.messages());
    generate(&output.program).expect("generation failed")
}

/// The generated definition starting at `header`, through the closing brace at column zero.
fn definition(code: &str, header: &str) -> String {
    let start = code.find(header).unwrap_or_else(|| panic!("missing: {header}"));
    let len = code[start..].find("\n}\n").expect("unterminated definition") + 2;
    code[start..start + len].to_string()
}

#[test]
fn test_init_table_codegen() {
    let code = generate_c(PRODUCT);
    insta::assert_snapshot!(definition(&code, "void Product_init_table(void)"), @r#"
    void Product_init_table(void) {
        const char *sql = "CREATE TABLE IF NOT EXISTS products (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL, price REAL)";

        char *err_msg = NULL;
        int rc = sqlite3_exec(db, sql, NULL, NULL, &err_msg);
        if (rc != SQLITE_OK) {
            fprintf(stderr, "SQL error: %s\n", err_msg);
            sqlite3_free(err_msg);
        } else {
            printf("Table products created successfully\n");
        }
    }
    "#);
}

#[test]
fn test_create_codegen() {
    let code = generate_c(PRODUCT);
    insta::assert_snapshot!(definition(&code, "Product* Product_create("), @r#"
    Product* Product_create(char* name, double price) {
        const char *sql = "INSERT INTO products (name, price) VALUES (?, ?)";
        sqlite3_stmt *stmt;

        int rc = sqlite3_prepare_v2(db, sql, -1, &stmt, NULL);
        if (rc != SQLITE_OK) {
            fprintf(stderr, "Failed to prepare statement: %s\n", sqlite3_errmsg(db));
            return NULL;
        }

        sqlite3_bind_text(stmt, 1, name, -1, SQLITE_TRANSIENT);
        sqlite3_bind_double(stmt, 2, price);

        rc = sqlite3_step(stmt);
        if (rc != SQLITE_DONE) {
            fprintf(stderr, "Failed to insert: %s\n", sqlite3_errmsg(db));
            sqlite3_finalize(stmt);
            return NULL;
        }

        int64_t last_insert_id = sqlite3_last_insert_rowid(db);
        sqlite3_finalize(stmt);

        Product* obj = (Product*)calloc(1, sizeof(Product));
        obj->id = last_insert_id;
        obj->name = name ? strdup(name) : NULL;
        obj->price = price;

        return obj;
    }
    "#);
}

#[test]
fn test_delete_codegen() {
    let code = generate_c(PRODUCT);
    insta::assert_snapshot!(definition(&code, "int Product_delete("), @r#"
    int Product_delete(int64_t id) {
        const char *sql = "DELETE FROM products WHERE id = ?";
        sqlite3_stmt *stmt;

        int rc = sqlite3_prepare_v2(db, sql, -1, &stmt, NULL);
        if (rc != SQLITE_OK) {
            fprintf(stderr, "Failed to prepare statement: %s\n", sqlite3_errmsg(db));
            return 0;
        }

        sqlite3_bind_int64(stmt, 1, id);

        rc = sqlite3_step(stmt);
        sqlite3_finalize(stmt);

        if (rc != SQLITE_DONE) {
            fprintf(stderr, "Failed to delete: %s\n", sqlite3_errmsg(db));
            return 0;
        }

        return 1;
    }
    "#);
}

#[test]
fn test_header_codegen() {
    let code = generate_c("Page Home { }");
    let header_end = code.find("// HTML generation functions").expect("missing HTML section");
    let header = code[..header_end].replace(zelang::version::ZELANG_VERSION, "VERSION");
    insta::assert_snapshot!(header, @r"
    // Generated by zelang VERSION. Do not edit.
    #include <stdio.h>
    #include <stdlib.h>
    #include <string.h>
    #include <stdint.h>
    #include <sqlite3.h>
    #include <ctype.h>
    #include <microhttpd.h>

    // Global database connection
    sqlite3 *db = NULL;

    // Global HTTP server
    struct MHD_Daemon *http_daemon = NULL;
    ");
}

#[test]
fn test_handler_listing_codegen() {
    let code = generate_c(
        r#"@route("/api/items", method: "POST") handler add(Request req, Response res) { return; }
           @route("/health") handler health()
           handler orphan(int x)"#,
    );
    let start = code.find("// Declared handlers").expect("missing handler listing");
    let end = start + code[start..].find("\n\n").expect("unterminated listing");
    insta::assert_snapshot!(&code[start..end], @r"
    // Declared handlers (bodies are not compiled):
    //   add: POST /api/items (Request req, Response res)
    //   health: GET /health ()
    //   orphan: (no route) (int x)
    ");
}

// =============================================================================
// Web front end (tests/fixtures/product_web.zl)
// =============================================================================

const PRODUCT_WEB: &str = include_str!("fixtures/product_web.zl");

#[test]
fn test_url_decode_codegen() {
    let code = generate_c(PRODUCT_WEB);
    insta::assert_snapshot!(definition(&code, "void url_decode("), @r"
    void url_decode(char *dst, const char *src, size_t cap) {
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
    ");
}

#[test]
fn test_parse_form_data_codegen() {
    let code = generate_c(PRODUCT_WEB);
    insta::assert_snapshot!(definition(&code, "void parse_form_data("), @r#"
    void parse_form_data(const char* data, size_t size, char fields[][256], char values[][256], int* count) {
        char* datacopy = strndup(data, size);
        *count = 0;
        if (datacopy == NULL) return;

        char* pair = strtok(datacopy, "&");
        while (pair != NULL && *count < 10) {
            char* eq = strchr(pair, '=');
            if (eq) {
                *eq = '\0';
                url_decode(fields[*count], pair, 256);
                url_decode(values[*count], eq + 1, 256);
                (*count)++;
            }
            pair = strtok(NULL, "&");
        }
        free(datacopy);
    }
    "#);
}

#[test]
fn test_page_renderer_codegen() {
    let code = generate_c(PRODUCT_WEB);
    insta::assert_snapshot!(definition(&code, "char* render_p_page(void)"), @r#"
    char* render_p_page(void) {
        char* html = (char*)malloc(65536);
        int offset = 0;

        offset += sprintf(html + offset, html_header, "P");
        offset += sprintf(html + offset, "<h1 class='mb-4'>P</h1>\n");

        // DataList - Show all records
        offset += sprintf(html + offset, "<h2>All Items</h2>\n");
        offset += sprintf(html + offset, "<table class='table table-striped'>\n");
        offset += sprintf(html + offset, "<thead><tr>");
        offset += sprintf(html + offset, "<th>Id</th>");
        offset += sprintf(html + offset, "<th>Name</th>");
        offset += sprintf(html + offset, "<th>Price</th>");
        offset += sprintf(html + offset, "<th>Actions</th>");
        offset += sprintf(html + offset, "</tr></thead>\n");
        offset += sprintf(html + offset, "<tbody>\n");

        int count = 0;
        Product** items = Product_all(&count);
        for (int i = 0; i < count; i++) {
            offset += sprintf(html + offset, "<tr>");
            offset += sprintf(html + offset, "<td>%lld</td>", (long long)items[i]->id);
            offset += sprintf(html + offset, "<td>%s</td>", items[i]->name ? items[i]->name : "");
            offset += sprintf(html + offset, "<td>%f</td>", items[i]->price);
            offset += sprintf(html + offset, "<td><a href='%s?id=%lld' class='btn btn-sm btn-danger'>Delete</a></td>", "/products/delete", (long long)items[i]->id);
            offset += sprintf(html + offset, "</tr>\n");
        }
        free(items);

        offset += sprintf(html + offset, "</tbody></table>\n");

        // Form - Add new record
        offset += sprintf(html + offset, "<h2 class='mt-5'>Add New Item</h2>\n");
        offset += sprintf(html + offset, "<form method='POST' action='/products/create'>\n");
        offset += sprintf(html + offset, "<div class='mb-3'>\n");
        offset += sprintf(html + offset, "<label class='form-label'>Name</label>\n");
        offset += sprintf(html + offset, "<input type='text' name='name' class='form-control' required>\n");
        offset += sprintf(html + offset, "</div>\n");
        offset += sprintf(html + offset, "<div class='mb-3'>\n");
        offset += sprintf(html + offset, "<label class='form-label'>Price</label>\n");
        offset += sprintf(html + offset, "<input type='text' name='price' class='form-control'>\n");
        offset += sprintf(html + offset, "</div>\n");
        offset += sprintf(html + offset, "<button type='submit' class='btn btn-primary'>Add Item</button>\n");
        offset += sprintf(html + offset, "</form>\n");

        offset += sprintf(html + offset, "%s", html_footer);
        return html;
    }
    "#);
}

#[test]
fn test_request_dispatch_codegen() {
    let code = generate_c(PRODUCT_WEB);
    insta::assert_snapshot!(definition(&code, "enum MHD_Result handle_request("), @r#"
    enum MHD_Result handle_request(void *cls, struct MHD_Connection *connection,
                                const char *url, const char *method,
                                const char *version, const char *upload_data,
                                size_t *upload_data_size, void **con_cls) {
        struct MHD_Response *response;
        enum MHD_Result ret;
        (void)cls;
        (void)version;

        if (strcmp(url, "/products/create") == 0 && strcmp(method, "POST") == 0) {
            // First call: set up
            if (*con_cls == NULL) {
                *con_cls = (void*)1;
                return MHD_YES;
            }

            // Process POST data
            if (*upload_data_size != 0) {
                char fields[10][256];
                char values[10][256];
                int count;
                parse_form_data(upload_data, *upload_data_size, fields, values, &count);

                // Extract form values
                char* name = "";
                double price = 0.0;
                for (int i = 0; i < count; i++) {
                    if (strcmp(fields[i], "name") == 0) name = strdup(values[i]);
                    if (strcmp(fields[i], "price") == 0) price = atof(values[i]);
                }

                Product_create(name, price);

                *upload_data_size = 0;
                return MHD_YES;
            }

            // Send redirect response
            return redirect_home(connection);
        }

        if (strncmp(url, "/products/delete", 16) == 0 && strcmp(method, "GET") == 0) {
            const char* id_str = MHD_lookup_connection_value(connection, MHD_GET_ARGUMENT_KIND, "id");
            if (id_str) {
                int64_t id = atoll(id_str);
                Product_delete(id);
            }
            return redirect_home(connection);
        }

        if (strcmp(url, "/") == 0 && strcmp(method, "GET") == 0) {
            char* html = render_p_page();
            response = MHD_create_response_from_buffer(strlen(html), (void*)html, MHD_RESPMEM_MUST_FREE);
            MHD_add_response_header(response, "Content-Type", "text/html");
            ret = MHD_queue_response(connection, MHD_HTTP_OK, response);
            MHD_destroy_response(response);
            return ret;
        }

        // 404
        const char* not_found = "<h1>404 Not Found</h1>";
        response = MHD_create_response_from_buffer(strlen(not_found), (void*)not_found, MHD_RESPMEM_PERSISTENT);
        ret = MHD_queue_response(connection, MHD_HTTP_NOT_FOUND, response);
        MHD_destroy_response(response);
        return ret;
    }
    "#);
}
