use serde::Deserialize;
use serde_plist_xml::fields::{FieldDescriptor, Record};
use serde_plist_xml::{Value, from_str, plist_record};

plist_record! {
    #[derive(Debug, Default, PartialEq)]
    struct S2 {
        a: i32 => "C",
        b: i32,
        c: i32 => "A",
        d: i32 => "-",
    }
}

#[test]
fn tags_swap_names() {
    let xml = "<dict><key>b</key><integer>1</integer><key>A</key><integer>2</integer><key>C</key><integer>3</integer></dict>";
    let s: S2 = from_str(xml).unwrap();
    assert_eq!(s, S2 { a: 3, b: 1, c: 2, d: 0 });
}

#[test]
fn skipped_field_keeps_default() {
    let xml = "<dict><key>b</key><integer>1</integer><key>A</key><integer>2</integer><key>C</key><integer>3</integer><key>d</key><integer>5</integer></dict>";
    let s: S2 = from_str(xml).unwrap();
    assert_eq!(s, S2 { a: 3, b: 1, c: 2, d: 0 });
}

#[test]
fn renamed_field_also_binds_by_natural_name() {
    let xml = "<dict><key>a</key><integer>7</integer><key>c</key><integer>8</integer></dict>";
    assert_eq!(from_str::<S2>(xml).unwrap(), S2 { a: 7, b: 0, c: 8, d: 0 });
}

plist_record! {
    #[derive(Debug, Default, PartialEq)]
    struct Named {
        name: String => "Name",
    }
}

#[test]
fn natural_name_fallback_for_single_renamed_field() {
    let named: Named = from_str("<dict><key>name</key><string>x</string></dict>").unwrap();
    assert_eq!(named.name, "x");
    let named: Named = from_str("<dict><key>Name</key><string>y</string></dict>").unwrap();
    assert_eq!(named.name, "y");
}

#[test]
fn table_is_built_once_in_declaration_order() {
    let first = S2::field_table() as *const _;
    let second = S2::field_table() as *const _;
    assert_eq!(first, second);

    let names: Vec<_> = S2::field_table().fields().iter().map(|f| f.name).collect();
    assert_eq!(names, ["a", "b", "c", "d"]);
    assert_eq!(
        S2::field_table().fields()[3],
        FieldDescriptor {
            name: "d",
            rename: None,
            skip: true,
            options: vec![],
        }
    );
}

plist_record! {
    #[derive(Debug, Default)]
    pub struct Settings {
        pub title: String => "Title,omitempty",
        pub extra: Option<Value> => "Extra",
        pub sizes: Vec<u32> => "Sizes",
    }
}

#[test]
fn record_with_nested_values() {
    let xml = "<plist version=\"1.0\"><dict>\
        <key>Sizes</key><array><integer>16</integer><integer>32</integer></array>\
        <key>Title</key><string>Icons</string>\
        <key>Unknown</key><dict><key>x</key><true/></dict>\
        <key>Extra</key><dict><key>on</key><false/></dict>\
        </dict></plist>";
    let s: Settings = from_str(xml).unwrap();
    assert_eq!(s.title, "Icons");
    assert_eq!(s.sizes, vec![16, 32]);
    let extra = s.extra.unwrap();
    assert_eq!(extra.get("on").and_then(Value::as_bool), Some(false));
}

#[test]
fn record_field_error_propagates() {
    let xml = "<dict><key>Sizes</key><array><integer>-1</integer></array></dict>";
    let err = from_str::<Settings>(xml).unwrap_err();
    assert!(err.is_conversion(), "{err:?}");
}

// Derived structs get overrides and skipping from serde attributes.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
struct Derived {
    #[serde(rename = "C")]
    a: i32,
    b: i32,
    #[serde(rename = "A")]
    c: i32,
    #[serde(skip)]
    d: i32,
}

#[test]
fn serde_attributes_match_tags() {
    let xml = "<dict><key>b</key><integer>1</integer><key>A</key><integer>2</integer><key>C</key><integer>3</integer><key>d</key><integer>5</integer></dict>";
    let s: Derived = from_str(xml).unwrap();
    assert_eq!(s, Derived { a: 3, b: 1, c: 2, d: 0 });
}
