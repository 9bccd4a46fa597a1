//! Purpose: Lock decoder contract expectations with corpus + differential coverage.
//! Exports: Integration tests only (no runtime exports).
//! Role: Catch semantic drift between the in-crate decoder and the serde_json baseline.
//! Invariants: Decoded values are compared through the shared widening bridge.
//! Invariants: Differential checks assert parity where behavior should match today.
//! Notes: Negative-zero integers diverge on purpose and are asserted directly.

use maplite::api::{
    DecodeOptions, ErrorKind, JsonValue, decode_object, decode_object_with, decode_value, to_json,
    to_json_pretty,
};

fn parse_maplite(input: &str) -> Result<JsonValue, String> {
    decode_value(input).map_err(|err| err.to_string())
}

fn parse_serde_json(input: &str) -> Result<JsonValue, String> {
    serde_json::from_str::<serde_json::Value>(input)
        .map(|value| JsonValue::from_serde(&value))
        .map_err(|err| err.to_string())
}

fn assert_differential_parity(input: &str) {
    let ours = parse_maplite(input);
    let serde = parse_serde_json(input);
    match (ours, serde) {
        (Ok(a), Ok(b)) => assert_eq!(a, b, "decoded value mismatch for {input:?}"),
        (Err(_), Err(_)) => {}
        (left, right) => {
            panic!("decode outcome mismatch for {input:?}: ours={left:?}, serde={right:?}")
        }
    }
}

#[test]
fn corpus_valid_payloads_match_serde() {
    let corpus = [
        r#"{"a":1,"b":"ok"}"#,
        r#"[1,2,3,{"x":true}]"#,
        r#"{"nested":{"arr":[{"k":"v"}]}}"#,
        r#"{"unicode":"☃"}"#,
        r#"{"emoji":"😀"}"#,
        r#"{"raw":"héllo 🦀"}"#,
        r#"{"pair":"\ud83d\ude00","bmp":"\u2603"}"#,
        r#"{"escapes":"a\"b\\c\/d\b\f\n\r\t"}"#,
        r#"{"empty_obj":{},"empty_arr":[]}"#,
        "  {\n\t\"spaced\" :  1 , \"more\" : [ true ] }  ",
        r#"{"big":9223372036854775807,"small":-9223372036854775808}"#,
        r#"{"floats":[1.0,2.5,1e2,1E+2,2e-3,-0.5]}"#,
        "null",
        "true",
        r#""just a string""#,
        "-12",
    ];

    for case in corpus {
        assert_differential_parity(case);
    }
}

#[test]
fn corpus_malformed_payloads_match_serde() {
    let corpus = [
        "",
        "   ",
        "{",
        "}",
        r#"{"a": }"#,
        r#"{"a" 1}"#,
        r#"{"a":1,}"#,
        "[1,",
        "[1,]",
        "[1 2]",
        "tru",
        "nul",
        "falsy",
        "nul€",
        r#"{"a": falsé}"#,
        r#""unterminated"#,
        r#""bad escape \q""#,
        r#""lonely \ud800 surrogate""#,
        "01",
        "+1",
        "--1",
        "1.",
        "1e",
        ".5",
        "{} {}",
        "@",
        r#"{"n":1e309}"#,
        "\u{A0}",
    ];

    for case in corpus {
        assert_differential_parity(case);
    }
}

#[test]
fn corpus_duplicate_keys_match_serde() {
    assert_differential_parity(r#"{"a":1,"a":2}"#);
    let map = decode_object(r#"{"x":1,"y":2,"x":3}"#).expect("decode");
    assert_eq!(map.len(), 2);
    assert_eq!(map["x"], JsonValue::Int(3));
    assert_eq!(
        map.keys().collect::<Vec<_>>(),
        vec![&"x".to_string(), &"y".to_string()]
    );
}

#[test]
fn corpus_integer_beyond_i64_matches_serde() {
    assert_differential_parity(r#"{"n":18446744073709551615}"#);
    assert_differential_parity(r#"{"n":9223372036854775808}"#);
}

// serde_json keeps "-0" as a float to preserve the sign; this decoder applies
// the integral rule uniformly, so the divergence is asserted directly.
#[test]
fn negative_zero_decodes_as_integer_zero() {
    assert_eq!(decode_value("-0").expect("decode"), JsonValue::Int(0));
    let map = decode_object(r#"{"n":-0}"#).expect("decode");
    assert_eq!(map["n"], JsonValue::Int(0));
}

#[test]
fn round_trip_preserves_maps_under_the_widening_rule() {
    let mut map = maplite::api::JsonMap::new();
    map.insert("name".to_string(), JsonValue::from("ada"));
    map.insert("age".to_string(), JsonValue::Int(36));
    map.insert("ratio".to_string(), JsonValue::Float(2.5));
    map.insert("whole".to_string(), JsonValue::Float(3.0));
    map.insert("flag".to_string(), JsonValue::Bool(true));
    map.insert("gap".to_string(), JsonValue::Null);
    map.insert(
        "items".to_string(),
        JsonValue::Array(vec![JsonValue::Int(1), JsonValue::from("two")]),
    );

    let value = JsonValue::Object(map);
    let compact = decode_object(&to_json(&value)).expect("compact decode");
    let pretty = decode_object(&to_json_pretty(&value)).expect("pretty decode");
    assert_eq!(JsonValue::Object(compact), value);
    assert_eq!(JsonValue::Object(pretty), value);
}

#[test]
fn key_order_follows_the_document() {
    let map = decode_object(r#"{"a":1,"b":2,"c":3}"#).expect("decode");
    assert_eq!(
        map.keys().collect::<Vec<_>>(),
        vec![&"a".to_string(), &"b".to_string(), &"c".to_string()]
    );
}

#[test]
fn non_object_roots_fail_with_top_level_kind() {
    for text in ["[1,2,3]", "42"] {
        let err = decode_object(text).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::TopLevel, "{text}");
    }
}

#[test]
fn malformed_documents_fail_with_syntax_kind() {
    for text in ["{", r#"{"a": }"#] {
        let err = decode_object(text).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Syntax, "{text}");
    }
}

#[test]
fn blank_documents_fail_with_empty_kind() {
    for text in ["", "   "] {
        let err = decode_object(text).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Empty, "{text:?}");
    }
}

#[test]
fn narrow_integers_widen_to_i64_entries() {
    let mut sample = maplite::api::JsonMap::new();
    sample.insert("byteValue".to_string(), JsonValue::Int(123));
    sample.insert("shortValue".to_string(), JsonValue::Int(1234));

    let encoded = to_json_pretty(&JsonValue::Object(sample));
    let decoded = decode_object(&encoded).expect("decode");

    assert_eq!(decoded["byteValue"].as_i64(), Some(123));
    assert_eq!(decoded["shortValue"].as_i64(), Some(1234));
    assert!(decoded.values().all(|value| value.type_name() == "int"));
}

#[test]
fn syntax_errors_carry_byte_offsets() {
    let cases = [
        (r#"{"a": }"#, 6),
        ("   @", 3),
        ("{} {}", 3),
        (r#"{"a" 1}"#, 5),
    ];
    for (text, offset) in cases {
        let err = decode_value(text).expect_err("err");
        assert_eq!(err.offset(), Some(offset), "{text}");
    }
}

#[test]
fn default_depth_bound_rejects_pathological_nesting() {
    let deep = |depth: usize| format!("{}0{}", "[".repeat(depth), "]".repeat(depth));
    assert!(decode_value(&deep(100)).is_ok());
    let err = decode_value(&deep(200)).expect_err("err");
    assert_eq!(err.kind(), ErrorKind::Syntax);

    let options = DecodeOptions { max_depth: 300 };
    let mut wrapped = String::from("{\"deep\":");
    wrapped.push_str(&deep(250));
    wrapped.push('}');
    assert!(decode_object_with(&wrapped, options).is_ok());
}

#[test]
fn concurrent_decodes_do_not_interfere() {
    let handles: Vec<_> = (0..8i64)
        .map(|idx| {
            std::thread::spawn(move || {
                let text = format!("{{\"idx\": {idx}, \"tags\": [{idx}, {idx}]}}");
                let map = decode_object(&text).expect("decode");
                assert_eq!(map["idx"], JsonValue::Int(idx));
                map.len()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().expect("join"), 2);
    }
}
