//! Defines the decode error and the byte offset it was detected at.
use std::borrow::Cow;
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::sync::Arc;

use serde::de;

use crate::tokens::Token;

/// Error type compatible with `serde::de::Error`.
///
/// Every variant carries the byte offset into the input at which the problem
/// was detected. The offset is `None` only for errors raised by a Serde
/// visitor before the decoder had a chance to attach a position.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Free-form error, usually raised by a visitor through [`de::Error::custom`].
    Message {
        msg: String,
        offset: Option<u64>,
    },
    /// The token stream does not follow the plist grammar at this point.
    UnexpectedToken {
        /// Human description of what would have been accepted, like `<integer>`.
        expected: Cow<'static, str>,
        /// The token that was found instead.
        got: Token,
        offset: Option<u64>,
    },
    /// The target type has no plist representation (unit, unit struct).
    CannotBindKind {
        kind: &'static str,
        offset: Option<u64>,
    },
    /// `<integer>` body is malformed or does not fit the target width.
    Integer {
        literal: String,
        ty: &'static str,
        cause: ParseIntError,
        offset: Option<u64>,
    },
    /// `<real>` body is not a floating point literal.
    Float {
        literal: String,
        ty: &'static str,
        cause: ParseFloatError,
        offset: Option<u64>,
    },
    /// `<date>` body is not a `YYYY-MM-DDThh:mm:ssZ` timestamp.
    Date {
        literal: String,
        cause: chrono::ParseError,
        offset: Option<u64>,
    },
    /// `<data>` body is not valid standard base64.
    Base64 {
        cause: base64::DecodeError,
        offset: Option<u64>,
    },
    /// Containers are nested deeper than [`crate::Options::max_depth`] allows.
    DepthExceeded {
        limit: usize,
        offset: Option<u64>,
    },
    /// Malformed XML, passed through from the tokenizer.
    Xml {
        cause: Arc<quick_xml::Error>,
        offset: Option<u64>,
    },
}

impl Error {
    pub(crate) fn msg<S: Into<String>>(s: S) -> Self {
        Error::Message {
            msg: s.into(),
            offset: None,
        }
    }

    pub(crate) fn unexpected<E: Into<Cow<'static, str>>>(expected: E, got: Token) -> Self {
        Error::UnexpectedToken {
            expected: expected.into(),
            got,
            offset: None,
        }
    }

    pub(crate) fn cannot_bind(kind: &'static str) -> Self {
        Error::CannotBindKind { kind, offset: None }
    }

    pub(crate) fn xml(cause: quick_xml::Error) -> Self {
        Error::Xml {
            cause: Arc::new(cause),
            offset: None,
        }
    }

    fn offset_mut(&mut self) -> &mut Option<u64> {
        match self {
            Error::Message { offset, .. }
            | Error::UnexpectedToken { offset, .. }
            | Error::CannotBindKind { offset, .. }
            | Error::Integer { offset, .. }
            | Error::Float { offset, .. }
            | Error::Date { offset, .. }
            | Error::Base64 { offset, .. }
            | Error::DepthExceeded { offset, .. }
            | Error::Xml { offset, .. } => offset,
        }
    }

    /// Attach/override the byte offset of this error and return it.
    pub(crate) fn with_offset(mut self, set_offset: u64) -> Self {
        *self.offset_mut() = Some(set_offset);
        self
    }

    /// Attach `set_offset` only when the error does not know its position yet.
    pub(crate) fn with_offset_if_unknown(mut self, set_offset: u64) -> Self {
        let offset = self.offset_mut();
        if offset.is_none() {
            *offset = Some(set_offset);
        }
        self
    }

    /// Byte offset into the input where the error was detected, if known.
    pub fn offset(&self) -> Option<u64> {
        match self {
            Error::Message { offset, .. }
            | Error::UnexpectedToken { offset, .. }
            | Error::CannotBindKind { offset, .. }
            | Error::Integer { offset, .. }
            | Error::Float { offset, .. }
            | Error::Date { offset, .. }
            | Error::Base64 { offset, .. }
            | Error::DepthExceeded { offset, .. }
            | Error::Xml { offset, .. } => *offset,
        }
    }

    /// True for errors that describe a grammar mismatch.
    pub fn is_unexpected_token(&self) -> bool {
        matches!(self, Error::UnexpectedToken { .. })
    }

    /// True for numeric, date and base64 conversion failures.
    pub fn is_conversion(&self) -> bool {
        matches!(
            self,
            Error::Integer { .. } | Error::Float { .. } | Error::Date { .. } | Error::Base64 { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Message { msg, offset } => fmt_with_offset(f, msg, *offset),
            Error::UnexpectedToken {
                expected,
                got,
                offset,
            } => fmt_with_offset(
                f,
                &format!("unexpected token: expected {expected}, got {got}"),
                *offset,
            ),
            Error::CannotBindKind { kind, offset } => fmt_with_offset(
                f,
                &format!("cannot decode plist into {kind}"),
                *offset,
            ),
            Error::Integer {
                literal,
                ty,
                cause,
                offset,
            } => fmt_with_offset(f, &format!("invalid {ty} `{literal}`: {cause}"), *offset),
            Error::Float {
                literal,
                ty,
                cause,
                offset,
            } => fmt_with_offset(f, &format!("invalid {ty} `{literal}`: {cause}"), *offset),
            Error::Date {
                literal,
                cause,
                offset,
            } => fmt_with_offset(f, &format!("invalid date `{literal}`: {cause}"), *offset),
            Error::Base64 { cause, offset } => {
                fmt_with_offset(f, &format!("invalid base64 in <data>: {cause}"), *offset)
            }
            Error::DepthExceeded { limit, offset } => fmt_with_offset(
                f,
                &format!("nesting deeper than {limit} containers"),
                *offset,
            ),
            Error::Xml { cause, offset } => {
                fmt_with_offset(f, &format!("malformed XML: {cause}"), *offset)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Integer { cause, .. } => Some(cause),
            Error::Float { cause, .. } => Some(cause),
            Error::Date { cause, .. } => Some(cause),
            Error::Base64 { cause, .. } => Some(cause),
            Error::Xml { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

impl de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::msg(msg.to_string())
    }
}

/// Print a message optionally suffixed with "at offset N".
fn fmt_with_offset(f: &mut fmt::Formatter<'_>, msg: &str, offset: Option<u64>) -> fmt::Result {
    match offset {
        Some(offset) => write!(f, "{msg} at offset {offset}"),
        None => write!(f, "{msg}"),
    }
}
