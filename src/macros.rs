//! Public macros: option construction and keyed-record declaration.

/// Construct [`crate::Options`] from `Default` and a list of field assignments.
///
/// Example:
///
/// ```rust
/// let options = serde_plist_xml::options! {
///     plist_root: false,
///     max_depth: Some(64),
/// };
/// assert!(options.strict_booleans);
/// ```
#[macro_export]
macro_rules! options {
    ( $( $field:ident : $value:expr ),* $(,)? ) => {{
        let mut opt = $crate::Options::default();
        $(
            #[allow(deprecated)]
            {
                opt.$field = $value;
            }
        )*
        opt
    }};
}

/// Declare a struct that decodes from a plist `<dict>` using per-field tag strings.
///
/// A field may be followed by `=> "tag"`. The first comma-separated component
/// of the tag, if non-empty, is the key the field binds to; `"-"` means the
/// field never binds. See [`crate::fields::FieldTable::resolve`] for the
/// exact precedence. Keys that bind to nothing have their value skipped.
///
/// The struct must implement `Default`; fields without a key in the document
/// keep their default value.
///
/// ```rust
/// serde_plist_xml::plist_record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Track {
///         pub name: String => "Name",
///         pub year: u16 => "Year",
///         pub rating: u8,
///         pub cached: bool => "-",
///     }
/// }
///
/// let xml = "<dict><key>Name</key><string>Intro</string>\
///            <key>Year</key><integer>1999</integer>\
///            <key>cached</key><true/></dict>";
/// let track: Track = serde_plist_xml::from_str(xml).unwrap();
/// assert_eq!(track.name, "Intro");
/// assert_eq!(track.year, 1999);
/// assert!(!track.cached);
/// ```
#[macro_export]
macro_rules! plist_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty $(=> $tag:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::fields::Record for $name {
            fn field_table() -> &'static $crate::fields::FieldTable {
                static TABLE: ::std::sync::OnceLock<$crate::fields::FieldTable> =
                    ::std::sync::OnceLock::new();
                TABLE.get_or_init(|| {
                    $crate::fields::FieldTable::new(&[
                        $( (::core::stringify!($field), $crate::__plist_tag!($($tag)?)) ),*
                    ])
                })
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                struct RecordVisitor;

                impl<'de> $crate::__private::serde::de::Visitor<'de> for RecordVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                        f.write_str(::core::concat!("a plist dict for ", ::core::stringify!($name)))
                    }

                    fn visit_map<A>(self, mut map: A) -> ::core::result::Result<$name, A::Error>
                    where
                        A: $crate::__private::serde::de::MapAccess<'de>,
                    {
                        let table = <$name as $crate::fields::Record>::field_table();
                        let mut out = <$name as ::core::default::Default>::default();
                        while let ::core::option::Option::Some(key) =
                            map.next_key::<::std::string::String>()?
                        {
                            let bound = table.resolve(&key);
                            $(
                                if bound == ::core::option::Option::Some(::core::stringify!($field)) {
                                    out.$field = map.next_value()?;
                                    continue;
                                }
                            )*
                            map.next_value::<$crate::__private::serde::de::IgnoredAny>()?;
                        }
                        ::core::result::Result::Ok(out)
                    }
                }

                deserializer.deserialize_struct(::core::stringify!($name), &[], RecordVisitor)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __plist_tag {
    () => {
        ""
    };
    ($tag:literal) => {
        $tag
    };
}
