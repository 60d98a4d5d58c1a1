use serde::Deserialize;
use serde_plist_xml::from_str;

#[derive(Debug, Deserialize, PartialEq)]
enum Shape {
    Empty,
    Circle(f64),
    Point(i32, i32),
    Rect { w: u32, h: u32 },
}

#[test]
fn unit_variant_from_string() {
    assert_eq!(from_str::<Shape>("<string>Empty</string>").unwrap(), Shape::Empty);
}

#[test]
fn unit_variant_from_dict() {
    let s: Shape = from_str("<dict><key>Empty</key><true/></dict>").unwrap();
    assert_eq!(s, Shape::Empty);
}

#[test]
fn newtype_tuple_and_struct_variants() {
    assert_eq!(
        from_str::<Shape>("<dict><key>Circle</key><real>1.5</real></dict>").unwrap(),
        Shape::Circle(1.5)
    );
    assert_eq!(
        from_str::<Shape>(
            "<dict><key>Point</key><array><integer>1</integer><integer>-2</integer></array></dict>"
        )
        .unwrap(),
        Shape::Point(1, -2)
    );
    assert_eq!(
        from_str::<Shape>(
            "<dict><key>Rect</key><dict><key>w</key><integer>3</integer><key>h</key><integer>4</integer></dict></dict>"
        )
        .unwrap(),
        Shape::Rect { w: 3, h: 4 }
    );
}

#[test]
fn unknown_variant() {
    let err = from_str::<Shape>("<string>Triangle</string>").unwrap_err();
    assert!(err.to_string().contains("Triangle"), "{err}");
}

#[test]
fn enum_dict_with_two_keys() {
    let err = from_str::<Shape>(
        "<dict><key>Circle</key><real>1</real><key>Empty</key><true/></dict>",
    )
    .unwrap_err();
    assert!(err.is_unexpected_token(), "{err:?}");
}

#[test]
fn enums_in_collections() {
    let v: Vec<Shape> = from_str(
        "<array><string>Empty</string><dict><key>Circle</key><real>2</real></dict></array>",
    )
    .unwrap();
    assert_eq!(v, vec![Shape::Empty, Shape::Circle(2.0)]);
}
