use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::date::Date;
use crate::error::Error;

/// Parse an `<integer>` body as a base-10 integer of exactly the target width.
///
/// Overflow is reported, never truncated.
pub(crate) fn parse_integer<T>(text: &str, ty: &'static str) -> Result<T, Error>
where
    T: FromStr<Err = ParseIntError>,
{
    text.parse::<T>().map_err(|cause| Error::Integer {
        literal: text.to_owned(),
        ty,
        cause,
        offset: None,
    })
}

/// Parse a `<real>` body at the precision of `T`.
pub(crate) fn parse_real<T>(text: &str, ty: &'static str) -> Result<T, Error>
where
    T: FromStr<Err = ParseFloatError>,
{
    text.parse::<T>().map_err(|cause| Error::Float {
        literal: text.to_owned(),
        ty,
        cause,
        offset: None,
    })
}

/// Parse a `<date>` body (`YYYY-MM-DDThh:mm:ssZ`).
pub(crate) fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text).map_err(|cause| Error::Date {
        literal: text.to_owned(),
        cause,
        offset: None,
    })
}

/// Decode a `<data>` body. Property lists wrap base64 over several lines, so
/// ASCII whitespace anywhere in the body is ignored.
pub(crate) fn decode_data(text: &str) -> Result<Vec<u8>, Error> {
    let cleaned: Vec<u8> = text.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    STANDARD
        .decode(cleaned)
        .map_err(|cause| Error::Base64 {
            cause,
            offset: None,
        })
}
