use indoc::indoc;
use serde_plist_xml::{Dictionary, Error, Value, from_str};

#[test]
fn every_kind_of_value() {
    let xml = indoc! {"
        <plist version=\"1.0\">
        <dict>
            <key>b</key><true/>
            <key>i</key><integer>-3</integer>
            <key>r</key><real>2.5</real>
            <key>s</key><string>text</string>
            <key>d</key><date>2020-01-02T03:04:05Z</date>
            <key>x</key><data>aGk=</data>
            <key>a</key><array><false/><integer>1</integer></array>
            <key>m</key><dict/>
        </dict>
        </plist>
    "};
    let v: Value = from_str(xml).unwrap();
    assert_eq!(v.get("b"), Some(&Value::Boolean(true)));
    assert_eq!(v.get("i").and_then(Value::as_integer), Some(-3));
    assert_eq!(v.get("r").and_then(Value::as_real), Some(2.5));
    assert_eq!(v.get("s").and_then(Value::as_str), Some("text"));
    assert_eq!(
        v.get("d").and_then(Value::as_date).map(|d| d.to_string()),
        Some("2020-01-02T03:04:05Z".to_owned())
    );
    assert_eq!(v.get("x").and_then(Value::as_data), Some(&b"hi"[..]));
    assert_eq!(
        v.get("a"),
        Some(&Value::Array(vec![Value::Boolean(false), Value::Integer(1)]))
    );
    assert_eq!(v.get("m"), Some(&Value::Dictionary(Dictionary::new())));
    assert_eq!(v.tag(), "dict");
}

#[test]
fn unknown_tag_is_not_a_value() {
    let err = from_str::<Value>("<color>red</color>").unwrap_err();
    match err {
        Error::UnexpectedToken { expected, .. } => assert_eq!(expected, "<plist value>"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn integer_outside_i64_is_an_error_for_value() {
    let err = from_str::<Value>("<integer>9223372036854775808</integer>").unwrap_err();
    assert!(err.is_conversion(), "{err:?}");
}

#[test]
fn invalid_date_inside_value() {
    let err = from_str::<Value>("<array><date>2020-13-40T00:00:00Z</date></array>").unwrap_err();
    assert!(matches!(err, Error::Date { .. }), "{err:?}");
}

#[test]
fn dict_key_spelled_like_the_date_marker_stays_a_key() {
    let xml = "<dict><key>$__plist_private_date</key><string>2020-01-02T03:04:05Z</string><key>x</key><true/></dict>";
    let v: Value = from_str(xml).unwrap();
    let dict = v.as_dictionary().expect("dictionary");
    assert_eq!(dict.len(), 2);
    assert_eq!(
        v.get("$__plist_private_date").and_then(Value::as_str),
        Some("2020-01-02T03:04:05Z")
    );
    assert_eq!(v.get("x").and_then(Value::as_bool), Some(true));
}
