use serde::Deserialize;
use serde_loose::{from_json_str, parse_json, parse_toml, Error, Interop, LineBreak};

fn json_error(source: &str) -> Error {
    parse_json(source, LineBreak::Lf, Interop::None).unwrap_err()
}

fn toml_error(source: &str) -> Error {
    parse_toml(source, LineBreak::Lf, Interop::None).unwrap_err()
}

#[test]
fn test_error_reports_line_column_and_source_line() {
    let err = json_error("{\n  ok: 1,\n  \"ddd\"=4 aaa\n}");
    assert_eq!(err.message(), "Expect object closing bracket '}'");
    assert_eq!(err.line(), Some(3));
    assert_eq!(err.column(), Some(11));
    assert_eq!(err.source_line(), Some("  \"ddd\"=4 aaa"));

    let rendered = err.to_string();
    assert!(rendered.contains("Line 3, Col 11"));
    assert!(rendered.contains("\"ddd\"=4 aaa"));
}

#[test]
fn test_trailing_token_inside_object_is_not_a_partial_object() {
    let err = json_error(r#"{"ddd"=4 aaa}"#);
    assert_eq!(err.message(), "Expect object closing bracket '}'");
    assert_eq!((err.line(), err.column()), (Some(1), Some(10)));
}

#[test]
fn test_tabs_count_as_four_columns() {
    let err = json_error("[\n\t1 x]");
    assert_eq!(err.line(), Some(2));
    assert_eq!(err.column(), Some(7));
}

#[test]
fn test_crlf_counts_as_one_line_break() {
    let err = json_error("[1,\r\n2,\r\n:]");
    assert_eq!(err.line(), Some(3));
    assert_eq!(err.column(), Some(1));
}

#[test]
fn test_garbage_inside_array_is_rejected() {
    let source = "[ 1 , 2 , '3abd' , 4 aa , null ]";
    let err = json_error(source);
    assert_eq!(err.message(), "Expect array closing bracket ']'");
    assert_eq!(err.column(), Some(22));
}

#[test]
fn test_trailing_input_is_rejected() {
    assert_eq!(json_error("1 2").message(), "Expect termination");
    assert_eq!(json_error("{} {}").message(), "Expect termination");
    assert_eq!(toml_error("a = 1\n]").message(), "Expect termination");
}

#[test]
fn test_string_errors() {
    assert_eq!(
        json_error("'abc").message(),
        "An unexpected termination has appeared in the string literal."
    );
    assert_eq!(
        json_error("\"abc\ndef\"").message(),
        "An unexpected newline has appeared in the string literal."
    );
    assert_eq!(
        json_error("[1, /* open").message(),
        "An unexpected termination has appeared in the block comment."
    );
}

#[test]
fn test_number_errors() {
    assert!(json_error("-0x0080").message().starts_with("Invalid number"));
    assert!(json_error("9223372036854775808s64").message().starts_with("Invalid number"));
    assert!(json_error("-1u64").message().starts_with("Invalid number"));
    assert!(json_error("0xffffffffffffffff").message().starts_with("Invalid number"));
}

#[test]
fn test_date_errors() {
    assert!(json_error("2023-02-30").message().starts_with("Invalid date"));
    assert!(json_error("[25:00]").message().starts_with("Invalid time"));
    assert!(json_error("10000-01-01").message().contains("out of range"));
}

#[test]
fn test_toml_structure_errors() {
    assert_eq!(toml_error("a = 1 2\n").message(), "Expect object property value");
    assert_eq!(toml_error("[a\nk = 1").message(), "Expect table closing bracket ']'");
    assert_eq!(
        toml_error("[[a]\nk = 1").message(),
        "Expect array of table closing bracket ']]'"
    );
    assert_eq!(toml_error("[a] k = 1").message(), "Expect line break or EOF");

    let err = toml_error("title = 'x'\n\n[owner]\nname = \n");
    assert_eq!(err.message(), "Expect object property value");
    assert_eq!(err.line(), Some(4));
}

#[test]
fn test_conversion_errors_are_not_syntax_errors() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Port {
        port: u8,
    }

    let err = from_json_str::<Port>("{port: [80]}").unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }), "{:?}", err);
    assert_eq!(err.line(), None);
    assert_eq!(err.source_line(), None);

    let err = from_json_str::<Port>("{port: 70000}").unwrap_err();
    assert!(err.to_string().contains("out of range"), "{}", err);
}

#[test]
fn test_deep_nesting_is_an_error_not_a_crash() {
    let depth = 50_000;
    let arrays = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    let err = json_error(&arrays);
    assert_eq!(err.message(), "Max recursion depth exceeded");
    assert_eq!(err.line(), Some(1));

    let objects = format!("a = {}1{}", "{b = ".repeat(depth), "}".repeat(depth));
    assert_eq!(toml_error(&objects).message(), "Max recursion depth exceeded");
}
