use std::collections::{BTreeMap, HashMap};

use indoc::indoc;
use serde::Deserialize;
use serde_plist_xml::{Decoder, Error, from_str};

#[test]
fn array_of_integers() {
    let v: Vec<i32> = from_str("<array><integer>4</integer><integer>2</integer></array>").unwrap();
    assert_eq!(v, vec![4, 2]);
}

#[test]
fn empty_arrays() {
    assert!(from_str::<Vec<i32>>("<array></array>").unwrap().is_empty());
    assert!(from_str::<Vec<i32>>("<array/>").unwrap().is_empty());
}

#[test]
fn comments_and_whitespace_between_elements() {
    let xml = " <!-- use spaces and comments inside--> <array><!-- --><real>4</real> <real>2</real><!-- --> </array> <!-- -->";
    let v: Vec<f32> = from_str(xml).unwrap();
    assert_eq!(v, vec![4.0, 2.0]);
}

#[test]
fn mismatched_end_tag_is_malformed_xml() {
    let err = from_str::<Vec<i32>>("<array></integer>").unwrap_err();
    assert!(matches!(err, Error::Xml { .. }), "{err:?}");
}

#[test]
fn nested_arrays() {
    let xml = indoc! {"
        <array>
            <array><integer>1</integer></array>
            <array/>
            <array><integer>2</integer><integer>3</integer></array>
        </array>
    "};
    let v: Vec<Vec<u8>> = from_str(xml).unwrap();
    assert_eq!(v, vec![vec![1], vec![], vec![2, 3]]);
}

#[test]
fn decoding_replaces_previous_array_content() {
    let mut target = vec![9, 9, 9];
    let mut decoder = Decoder::new("<array><integer>1</integer></array>".as_bytes());
    decoder.decode_into(&mut target).unwrap();
    assert_eq!(target, vec![1]);
}

#[test]
fn tuple_and_fixed_array() {
    let t: (i32, String, bool) =
        from_str("<array><integer>1</integer><string>x</string><true/></array>").unwrap();
    assert_eq!(t, (1, "x".to_owned(), true));

    let a: [u8; 2] = from_str("<array><integer>1</integer><integer>2</integer></array>").unwrap();
    assert_eq!(a, [1, 2]);
}

#[test]
fn fixed_array_with_extra_elements() {
    let err = from_str::<[u8; 1]>("<array><integer>1</integer><integer>2</integer></array>")
        .unwrap_err();
    match err {
        Error::UnexpectedToken { expected, .. } => assert_eq!(expected, "</array>"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn array_element_type_mismatch() {
    let err = from_str::<Vec<i32>>("<array><integer>1</integer><string>2</string></array>")
        .unwrap_err();
    assert!(err.is_unexpected_token(), "{err:?}");
}

#[test]
fn dict_into_maps() {
    let xml = "<dict><key>b</key><integer>2</integer><key>a</key><integer>1</integer></dict>";
    let m: BTreeMap<String, i64> = from_str(xml).unwrap();
    assert_eq!(m.into_iter().collect::<Vec<_>>(), vec![("a".into(), 1), ("b".into(), 2)]);

    let m: HashMap<String, i64> = from_str(xml).unwrap();
    assert_eq!(m["b"], 2);
}

#[test]
fn dict_without_key_element() {
    let err = from_str::<HashMap<String, i64>>("<dict><string>a</string></dict>").unwrap_err();
    match err {
        Error::UnexpectedToken { expected, .. } => assert_eq!(expected, "<key>"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn dict_key_without_value() {
    let err = from_str::<HashMap<String, i64>>("<dict><key>a</key></dict>").unwrap_err();
    assert!(err.is_unexpected_token(), "{err:?}");
}

#[derive(Debug, Deserialize, PartialEq, Default)]
#[serde(default)]
struct S1 {
    #[serde(rename = "I")]
    i: i32,
    #[serde(rename = "B")]
    b: bool,
}

#[test]
fn derived_struct() {
    let xml = "<dict><key>B</key><true/><key>I</key><integer>42</integer></dict>";
    assert_eq!(from_str::<S1>(xml).unwrap(), S1 { i: 42, b: true });
    assert_eq!(
        from_str::<Option<Box<S1>>>(xml).unwrap(),
        Some(Box::new(S1 { i: 42, b: true }))
    );
}

#[test]
fn empty_dict_gives_default_record() {
    assert_eq!(from_str::<S1>("<dict></dict>").unwrap(), S1::default());
}

#[test]
fn record_needs_dict() {
    let err = from_str::<S1>("<not-dict></not-dict>").unwrap_err();
    assert!(err.is_unexpected_token(), "{err:?}");
}

#[test]
fn unknown_key_without_value() {
    let err = from_str::<S1>("<dict><key>I</key><integer>1</integer><key>X</key></dict>")
        .unwrap_err();
    match err {
        Error::UnexpectedToken { expected, .. } => assert_eq!(expected, "<any key>"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[derive(Debug, Deserialize, PartialEq)]
struct Library {
    name: String,
    tracks: Vec<Track>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Track {
    title: String,
    #[serde(default)]
    seconds: u32,
}

#[test]
fn unknown_keys_are_skipped_whatever_they_hold() {
    let xml = indoc! {"
        <?xml version=\"1.0\" encoding=\"UTF-8\"?>
        <!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">
        <plist version=\"1.0\">
        <dict>
            <key>name</key><string>Mine</string>
            <key>extra</key>
            <dict>
                <key>deep</key><array><array><data>AA==</data></array></array>
            </dict>
            <key>tracks</key>
            <array>
                <dict><key>title</key><string>One</string><key>seconds</key><integer>61</integer></dict>
                <dict><key>title</key><string>Two</string><key>bpm</key><real>120.5</real></dict>
            </array>
        </dict>
        </plist>
    "};
    let lib: Library = from_str(xml).unwrap();
    assert_eq!(
        lib,
        Library {
            name: "Mine".into(),
            tracks: vec![
                Track { title: "One".into(), seconds: 61 },
                Track { title: "Two".into(), seconds: 0 },
            ],
        }
    );
}

#[test]
fn missing_required_field_is_reported() {
    let err = from_str::<Track>("<dict><key>seconds</key><integer>1</integer></dict>").unwrap_err();
    assert!(err.to_string().contains("title"), "{err}");
    assert!(err.offset().is_some());
}
