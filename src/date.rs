//! `Date`: the plist `<date>` instant.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

/// Struct name the decoder recognizes as a request for a `<date>` element.
pub(crate) const DATE_STRUCT: &str = "$__plist_private_Date";
/// Single field of the synthetic map a `<date>` element is presented as.
pub(crate) const DATE_FIELD: &str = "$__plist_private_date";

/// A UTC instant with one-second resolution, as stored in `<date>` elements.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use serde_plist_xml::Date;
///
/// let date: Date = serde_plist_xml::from_str("<date>2016-05-04T03:02:01Z</date>").unwrap();
/// assert_eq!(date, Date::from(Utc.with_ymd_and_hms(2016, 5, 4, 3, 2, 1).unwrap()));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(DateTime<Utc>);

impl Date {
    /// `strftime` layout of a plist `<date>` body.
    pub const FORMAT: &'static str = "%Y-%m-%dT%H:%M:%SZ";

    /// Parse a `<date>` body.
    pub fn parse(text: &str) -> Result<Self, chrono::ParseError> {
        NaiveDateTime::parse_from_str(text, Self::FORMAT).map(|naive| Date(naive.and_utc()))
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for Date {
    fn from(value: DateTime<Utc>) -> Self {
        Date(value)
    }
}

impl From<Date> for DateTime<Utc> {
    fn from(value: Date) -> Self {
        value.0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

/// First key of a map handed to [`Date`] or [`crate::Value`].
///
/// The date entry's key arrives as bytes; `<key>` elements always arrive as
/// strings, so a document key can never pose as a date.
pub(crate) enum MapKey {
    Date,
    Name(String),
}

impl<'de> Deserialize<'de> for MapKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MapKeyVisitor;

        impl<'de> Visitor<'de> for MapKeyVisitor {
            type Value = MapKey;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a dict key")
            }

            fn visit_str<E>(self, v: &str) -> Result<MapKey, E> {
                Ok(MapKey::Name(v.to_owned()))
            }

            fn visit_string<E>(self, v: String) -> Result<MapKey, E> {
                Ok(MapKey::Name(v))
            }

            fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<MapKey, E> {
                if v == DATE_FIELD.as_bytes() {
                    Ok(MapKey::Date)
                } else {
                    Err(E::invalid_value(de::Unexpected::Bytes(v), &self))
                }
            }
        }

        deserializer.deserialize_identifier(MapKeyVisitor)
    }
}

/// Reads the payload of the synthetic date map.
pub(crate) fn date_from_map<'de, A: MapAccess<'de>>(mut map: A) -> Result<Date, A::Error> {
    let text: String = map.next_value()?;
    Date::parse(&text).map_err(de::Error::custom)
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DateVisitor;

        impl<'de> Visitor<'de> for DateVisitor {
            type Value = Date;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a plist date")
            }

            // Formats other than plist hand dates over as text.
            fn visit_str<E: de::Error>(self, v: &str) -> Result<Date, E> {
                Date::parse(v).map_err(E::custom)
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Date, A::Error> {
                match map.next_key::<MapKey>()? {
                    Some(MapKey::Date) => date_from_map(map),
                    _ => Err(de::Error::custom("expected a plist date")),
                }
            }
        }

        deserializer.deserialize_struct(DATE_STRUCT, &[DATE_FIELD], DateVisitor)
    }
}
