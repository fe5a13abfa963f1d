#[cfg(test)]
/// Parser unit tests.
///
/// These cover each declaration form and the recovery behavior: diagnostics are recorded
/// without halting, and the top-level loop always terminates.
mod tests {
    use super::*;
    use zelang_core::lang::decorators::DecoratorId;

    fn parse_ok(source: &str) -> Program {
        let output = parse(source);
        assert!(output.diagnostics.is_empty(), "unexpected diagnostics: {:?}", output.messages());
        output.program
    }

    fn only_struct(program: &Program) -> &StructDecl {
        assert_eq!(program.declarations.len(), 1);
        match &program.declarations[0].node {
            Declaration::Struct(s) => s,
            other => panic!("Expected struct, got {other:?}"),
        }
    }

    fn field_names(decl: &StructDecl) -> Vec<&str> {
        decl.fields.iter().map(|f| f.node.name.as_str()).collect()
    }

    #[test]
    fn test_parse_struct_with_field_decorators() {
        let program = parse_ok(
            r#"
@table("products")
struct Product {
    @primary @autoincrement int id;
    @required string name;
    float price;
}
"#,
        );
        let product = only_struct(&program);
        assert_eq!(product.name, "Product");
        assert_eq!(product.decorators[0].first_arg(), Some("products"));
        assert_eq!(field_names(product), vec!["id", "name", "price"]);

        let id = &product.fields[0].node;
        assert_eq!(id.ty, "int");
        assert_eq!(
            id.decorator_ids().collect::<Vec<_>>(),
            vec![DecoratorId::Primary, DecoratorId::AutoIncrement]
        );
        assert!(product.fields[1].node.has_decorator(DecoratorId::Required));
        assert!(product.fields[2].node.decorators.is_empty());
    }

    #[test]
    fn test_parse_custom_and_array_field_types() {
        let program = parse_ok("struct Post { int[] tags; Author author; string title; }");
        let post = only_struct(&program);
        assert_eq!(field_names(post), vec!["tags", "author", "title"]);
        assert!(post.fields[0].node.is_array);
        assert_eq!(post.fields[1].node.ty, "Author");
        assert!(!post.fields[2].node.is_array);
    }

    #[test]
    fn test_missing_semicolon_keeps_following_fields() {
        let source = "struct User {\n    int id\n    string name;\n    bool active;\n}\n";
        let output = parse(source);

        insta::assert_debug_snapshot!(output.messages(), @r#"
        [
            "Line 3:5: expected ';' after field declaration",
        ]
        "#);
        let user = only_struct(&output.program);
        assert_eq!(field_names(user), vec!["name", "active"]);
    }

    #[test]
    fn test_decorator_keyword_arguments() {
        let program = parse_ok(r#"@route("/submit", method: "POST") handler submit(Request req, Response res) { return; }"#);
        let Declaration::Handler(handler) = &program.declarations[0].node else {
            panic!("Expected handler");
        };
        let route = &handler.decorators[0];
        assert_eq!(route.args, vec!["/submit".to_string()]);
        assert_eq!(route.kwarg("method"), Some("POST"));
        assert_eq!(handler.route(), Some("/submit"));
    }

    #[test]
    fn test_unclosed_decorator_arguments_are_reported() {
        let output = parse(r#"@table("users" struct User { int id; }"#);
        assert_eq!(
            output.messages(),
            vec!["Line 1:28: expected ')' after decorator arguments".to_string()]
        );
        assert!(
            !output
                .program
                .declarations
                .iter()
                .any(|d| matches!(d.node, Declaration::Struct(_)))
        );
    }

    #[test]
    fn test_decorators_before_other_text_are_discarded() {
        let output = parse("@route(\"/\") int helper() { }");
        assert!(output.program.declarations.is_empty());
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_struct_name() {
        let output = parse("struct { int id; }");
        assert_eq!(
            output.messages()[0],
            "Line 1:8: expected next token to be identifier, got '{' instead"
        );
    }

    #[test]
    fn test_page_body_is_skipped_with_outline() {
        let source = r#"
@route("/")
Page Home {
    Section(title: "Todos") {
        DataList(source: "todos");
        Form { Input(name: "title") Button("Add") }
    }
    Row { }
}
struct Todo { string title; }
"#;
        let program = parse_ok(source);
        assert_eq!(program.declarations.len(), 2);

        let Declaration::Page(page) = &program.declarations[0].node else {
            panic!("Expected page");
        };
        assert_eq!(page.name, "Home");
        assert_eq!(page.route(), Some("/"));

        let body = page.body.text(source).unwrap_or_default();
        assert!(body.starts_with('{') && body.ends_with('}'));
        assert!(body.contains("Row { }"));

        let kinds: Vec<_> = page.components.iter().map(|c| c.node.kind).collect();
        assert_eq!(kinds, vec![ComponentKind::Section, ComponentKind::Row]);

        let section = &page.components[0].node;
        assert_eq!(section.property("title"), Some("Todos"));
        let children: Vec<_> = section.children.iter().map(|c| c.node.kind).collect();
        assert_eq!(children, vec![ComponentKind::DataList, ComponentKind::Form]);

        let form = &section.children[1].node;
        assert_eq!(form.children.len(), 2);
        assert_eq!(form.children[1].node.args, vec!["Add".to_string()]);

        assert!(matches!(program.declarations[1].node, Declaration::Struct(_)));
    }

    #[test]
    fn test_unterminated_page_runs_to_end_of_input() {
        let output = parse("Page Broken { Section { ");
        assert!(output.diagnostics.is_empty());
        let Declaration::Page(page) = &output.program.declarations[0].node else {
            panic!("Expected page");
        };
        assert_eq!(page.components.len(), 1);
        assert!(page.components[0].node.body.is_some());
    }

    #[test]
    fn test_handler_params_and_body() {
        let source = "handler list(Request req, Response res) { if (x) { return; } }\nhandler ping()";
        let program = parse_ok(source);
        assert_eq!(program.declarations.len(), 2);

        let Declaration::Handler(list) = &program.declarations[0].node else {
            panic!("Expected handler");
        };
        let params: Vec<_> = list.params.iter().map(|p| (p.ty.as_str(), p.name.as_str())).collect();
        assert_eq!(params, vec![("Request", "req"), ("Response", "res")]);
        let body = list.body.and_then(|b| b.text(source));
        assert_eq!(body, Some("{ if (x) { return; } }"));

        let Declaration::Handler(ping) = &program.declarations[1].node else {
            panic!("Expected handler");
        };
        assert!(ping.params.is_empty());
        assert!(ping.body.is_none());
    }

    #[test]
    fn test_functions_and_main() {
        let program = parse_ok("void log(string msg) { }\nint count;\nint main() { return 0; }");
        assert_eq!(program.declarations.len(), 3);

        match &program.declarations[0].node {
            Declaration::Function(f) => {
                assert_eq!(f.return_type, "void");
                assert_eq!(f.name, "log");
                assert_eq!(f.params.len(), 1);
                assert!(f.body.is_some());
            }
            other => panic!("Expected function, got {other:?}"),
        }
        match &program.declarations[1].node {
            Declaration::Function(f) => assert!(f.body.is_none()),
            other => panic!("Expected prototype, got {other:?}"),
        }
        match &program.declarations[2].node {
            Declaration::Main(m) => assert_eq!(m.return_type, "int"),
            other => panic!("Expected main, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_top_level_text_is_skipped_silently() {
        let program = parse_ok("foo bar; Section { } 42 \"text\" struct A { int x; }");
        assert_eq!(only_struct(&program).name, "A");
    }

    #[test]
    fn test_garbage_input_terminates() {
        let output = parse("@@@ ((( }}} & | $ ;;; [ ] struct");
        assert!(output.program.declarations.is_empty());
        assert_eq!(
            output.messages().last().map(String::as_str),
            Some("Line 1:33: expected next token to be identifier, got end of input instead")
        );
    }

    #[test]
    fn test_declaration_spans_cover_source() {
        let source = "struct A { int x; }";
        let program = parse_ok(source);
        let span = program.declarations[0].span;
        assert_eq!(&source[span.start..span.end], source);
    }
}
