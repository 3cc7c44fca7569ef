use chrono::NaiveDate;
use serde_loose::{parse_toml, value, Interop, LineBreak, Value};

fn toml(source: &str) -> Value {
    parse_toml(source, LineBreak::Lf, Interop::None).unwrap()
}

#[test]
fn test_header_reopened_after_subtable() {
    let expected = value!({ "x": { "a": 1.0, "y": { "z": { "b": 2.0 } } } });
    assert_eq!(toml("\n[x.y.z]\nb=2\n[x]\na=1\n"), expected);
    assert_eq!(toml("\n[x]\na=1\n[x.y.z]\nb=2\n"), expected);
}

#[test]
fn test_top_level_dotted_keys() {
    let expected = value!({ "foo": 1.0, "bar": { "baz": 2.0 } });
    assert_eq!(toml("foo=1\nbar.baz=2\n"), expected);
    assert_eq!(toml("foo = 1\nbar . baz = 2\n"), expected);
    assert_eq!(toml("\"foo\" = 1\n\"bar\" . \"baz\" = 2\n"), expected);
}

#[test]
fn test_table_declared_three_times() {
    let source = "
        fff=999

        [x]
        zz=0

        [x.y.z]
        aa=1
        bb=2

        [x]
        cc=3
    ";
    assert_eq!(
        toml(source),
        value!({
            "fff": 999.0,
            "x": { "zz": 0.0, "y": { "z": { "aa": 1.0, "bb": 2.0 } }, "cc": 3.0 }
        })
    );
}

#[test]
fn test_reopened_table_overwrites_subtable_shallowly() {
    let source = r#"
        "fff" = -999.0

        [ "x" ]
        "zz" = 0.0

        [ "x" . y . "z" ]
        "aa" = -1.0
        "bb" = 2.0

        [ x ]
        # merge it
        cc = 3.0
        # replaces the earlier [x.y.z]
        "y" . z . "dd" = 4
    "#;
    assert_eq!(
        toml(source),
        value!({
            "fff": (-999.0),
            "x": { "zz": 0.0, "y": { "z": { "dd": 4.0 } }, "cc": 3.0 }
        })
    );
}

#[test]
fn test_nested_header_reopened() {
    let source = "
        fff=999
        [x.y]
        zz=0
        [x.y.z]
        aa=1
        bb=2
        [x.y]
        cc=3
    ";
    assert_eq!(
        toml(source),
        value!({
            "fff": 999.0,
            "x": { "y": { "zz": 0.0, "z": { "aa": 1.0, "bb": 2.0 }, "cc": 3.0 } }
        })
    );
}

#[test]
fn test_interleaved_dotted_keys_preserve_first_appearance_order() {
    let source = r#"
        apple.type = "fruit"
        orange.type = "fruit"

        apple.skin = "thin"
        orange.skin = "thick"

        apple.color = "red"
        orange.color = "orange"
    "#;
    let value = toml(source);
    let apple = value.get("apple").and_then(Value::as_object).unwrap();
    assert_eq!(apple.keys().collect::<Vec<_>>(), vec!["type", "skin", "color"]);
    assert_eq!(value.pointer(&["orange", "color"]), Some(&Value::from("orange")));
}

#[test]
fn test_bare_keys_with_digits_and_dashes() {
    let source = "
        key = \"value1\"
        bare_key = \"value2\"
        bare-key = \"value3\"
        1234 = \"value4\"
        -3.14 = \"value5\"
    ";
    let expected = value!({
        "key": "value1",
        "bare_key": "value2",
        "bare-key": "value3",
        "1234": "value4",
        "-3": { "14": "value5" }
    });
    assert_eq!(toml(source), expected);

    let inline = "
        foo = {
            key: \"value1\",
            bare_key: \"value2\",
            bare-key: \"value3\",
            1234: \"value4\",
            -3.14: \"value5\",
        }
    ";
    assert_eq!(toml(inline), value!({ "foo": (expected) }));
}

#[test]
fn test_table_arrays() {
    let source = "
        fff=999
        [[x]]
        aa=1
        bb=2
        [[x]]
        aa=3
        bb=4
    ";
    assert_eq!(
        toml(source),
        value!({
            "fff": 999.0,
            "x": [{ "aa": 1.0, "bb": 2.0 }, { "aa": 3.0, "bb": 4.0 }]
        })
    );
}

#[test]
fn test_subtable_of_latest_table_array_element() {
    let source = "
        fff=999
        [[x]]
        aa=1
        bb=2
        [x.y]
        cc=11
        [[x]]
        aa=3
        bb=4
        [x.y]
        cc=21
    ";
    assert_eq!(
        toml(source),
        value!({
            "fff": 999.0,
            "x": [
                { "aa": 1.0, "bb": 2.0, "y": { "cc": 11.0 } },
                { "aa": 3.0, "bb": 4.0, "y": { "cc": 21.0 } }
            ]
        })
    );
}

#[test]
fn test_nested_table_arrays_with_subtables() {
    let source = "
        fff=999
        [[x.y.z]]
        aa=1
        bb=2
        [x.y.z.p]
        cc=11
        dd=12
        [[x.y.z]]
        aa=3
        bb=4
        [x.y.z.p]
        cc=21
        dd=22
    ";
    assert_eq!(
        toml(source),
        value!({
            "fff": 999.0,
            "x": { "y": { "z": [
                { "aa": 1.0, "bb": 2.0, "p": { "cc": 11.0, "dd": 12.0 } },
                { "aa": 3.0, "bb": 4.0, "p": { "cc": 21.0, "dd": 22.0 } }
            ] } }
        })
    );
}

#[test]
fn test_toml_string_forms() {
    let source = r#"
basic = "tab\tquote\""
raw = 'C:\Users\nodejs'
multi = """
Roses are red
Violets are blue"""
trimmed = """\
    The quick brown \
    fox."""
raw_multi = '''
first line
  second \n line'''
"#;
    let value = toml(source);
    assert_eq!(value.get("basic"), Some(&Value::from("tab\tquote\"")));
    assert_eq!(value.get("raw"), Some(&Value::from(r"C:\Users\nodejs")));
    assert_eq!(
        value.get("multi"),
        Some(&Value::from("Roses are red\nViolets are blue"))
    );
    assert_eq!(value.get("trimmed"), Some(&Value::from("The quick brown fox.")));
    assert_eq!(
        value.get("raw_multi"),
        Some(&Value::from("first line\n  second \\n line"))
    );
}

#[test]
fn test_multiline_strings_follow_line_break_option() {
    let value = parse_toml("s = '''\na\nb'''", LineBreak::CrLf, Interop::None).unwrap();
    assert_eq!(value.get("s"), Some(&Value::from("a\r\nb")));
}

#[test]
fn test_offset_date_time_is_normalized_to_utc() {
    let value = toml("dob = 1979-05-27T07:32:00-08:00\nday = 1979-05-27");
    let expected = NaiveDate::from_ymd_opt(1979, 5, 27)
        .unwrap()
        .and_hms_opt(15, 32, 0)
        .unwrap()
        .and_utc();
    assert_eq!(value.get("dob").and_then(Value::as_datetime), Some(&expected));
    assert_eq!(
        value.get("day").and_then(Value::as_datetime).map(|d| d.date_naive()),
        NaiveDate::from_ymd_opt(1979, 5, 27)
    );
}

#[test]
fn test_comments_and_inline_containers() {
    let source = "
# leading comment
[server]   // header comment
host = 'localhost' # trailing
ports = [ 8000, 8001,
          8002 ]
limits = { cpu = 2, mem.soft = 512 }
";
    let value = toml(source);
    assert_eq!(value.pointer(&["server", "host"]), Some(&Value::from("localhost")));
    assert_eq!(
        value.pointer(&["server", "ports"]).and_then(Value::as_array).map(Vec::len),
        Some(3)
    );
    assert_eq!(
        value.pointer(&["server", "limits", "mem", "soft"]),
        Some(&Value::Float64(512.0))
    );
}

#[test]
fn test_empty_document() {
    assert_eq!(toml(""), value!({}));
    assert_eq!(toml("\n# nothing\n"), value!({}));
}

#[test]
fn test_adjacent_literals_concatenate() {
    assert_eq!(toml(r#"str1 = "foo" "bar""#), value!({ "str1": "foobar" }));
    assert_eq!(toml("str2 = 'a' \"b\" '''c'''\n"), value!({ "str2": "abc" }));
    assert_eq!(toml("\"a\" 'b' = 1"), value!({ "ab": 1.0 }));
}
