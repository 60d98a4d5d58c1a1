//! Significant tokens: a compact layer over the XML event stream of `quick_xml::Reader`.
//!
//! Responsibilities
//! - Provide owned, simplified tokens (`Token`) for the plist decoder.
//! - Hide comments, processing instructions, the XML declaration and DOCTYPE.
//! - Hide whitespace-only text between elements (but not inside `<string>`).
//! - Split empty-element tags (`<true/>`) into a start and an end token.
//! - Track the byte offset for diagnostics.

use std::fmt;
use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::Error;

/// One attribute of a start tag, with entities resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A start tag: local name plus attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartTag {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

impl StartTag {
    /// Value of the attribute called `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }
}

/// Token kinds the decoder works with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Start(StartTag),
    End { name: String },
    /// Character data (text or CDATA) with entities resolved.
    Text(String),
    /// The underlying source is exhausted.
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Start(tag) => write!(f, "<{}>", tag.name),
            Token::End { name } => write!(f, "</{name}>"),
            Token::Text(text) => write!(f, "text {text:?}"),
            Token::Eof => f.write_str("EOF"),
        }
    }
}

/// Source of tokens for the decoder.
pub(crate) trait TokenSource {
    /// Pull the next significant token.
    ///
    /// Returns:
    /// - `Ok(Token::Eof)` at true end-of-stream, and on every call after that,
    /// - `Err(Error)` if the tokenizer rejects the input.
    fn next(&mut self) -> Result<Token, Error>;

    /// Read the raw body of the element `name` that was just opened, consuming its end tag.
    ///
    /// Whitespace is kept. Text interrupted by comments is joined.
    fn read_text(&mut self, name: &str) -> Result<String, Error>;

    /// Consume everything up to and including the end tag of the element just opened.
    fn skip_element(&mut self) -> Result<(), Error>;

    /// Byte offset of the tokenizer in the input.
    fn offset(&self) -> u64;
}

/// Live token source that wraps `quick_xml::Reader`.
pub(crate) struct XmlTokens<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    /// End tag still owed for an empty-element tag that was reported as a start.
    pending_end: Option<String>,
}

impl<R: BufRead> XmlTokens<R> {
    pub(crate) fn new(input: R) -> Self {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().check_end_names = true;
        Self {
            reader,
            buf: Vec::new(),
            pending_end: None,
        }
    }

    /// Next token including whitespace-only text; insignificant markup is skipped.
    fn pull(&mut self) -> Result<Token, Error> {
        if let Some(name) = self.pending_end.take() {
            return Ok(Token::End { name });
        }
        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(err) => {
                    let offset = self.reader.buffer_position() as u64;
                    return Err(Error::xml(err).with_offset(offset));
                }
            };
            let offset = self.reader.buffer_position() as u64;
            let token = match event {
                Event::Start(start) => {
                    Token::Start(start_tag(&start).map_err(|err| err.with_offset(offset))?)
                }
                Event::Empty(start) => {
                    let tag = start_tag(&start).map_err(|err| err.with_offset(offset))?;
                    self.pending_end = Some(tag.name.clone());
                    Token::Start(tag)
                }
                Event::End(end) => Token::End {
                    name: utf8_name(end.local_name().as_ref())
                        .map_err(|err| err.with_offset(offset))?,
                },
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|err| Error::xml(err).with_offset(offset))?;
                    Token::Text(text.into_owned())
                }
                Event::CData(data) => {
                    let text = String::from_utf8(data.into_inner().into_owned()).map_err(|_| {
                        Error::msg("CDATA section is not valid UTF-8").with_offset(offset)
                    })?;
                    Token::Text(text)
                }
                Event::Eof => Token::Eof,
                Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => continue,
            };
            return Ok(token);
        }
    }
}

impl<R: BufRead> TokenSource for XmlTokens<R> {
    fn next(&mut self) -> Result<Token, Error> {
        loop {
            match self.pull()? {
                Token::Text(text) if text.trim().is_empty() => continue,
                token => return Ok(token),
            }
        }
    }

    fn read_text(&mut self, name: &str) -> Result<String, Error> {
        let mut out = String::new();
        loop {
            match self.pull()? {
                Token::Text(text) => out.push_str(&text),
                Token::End { .. } => return Ok(out),
                other => {
                    return Err(Error::unexpected(format!("</{name}>"), other)
                        .with_offset(self.offset()));
                }
            }
        }
    }

    fn skip_element(&mut self) -> Result<(), Error> {
        let mut depth = 1usize;
        while depth != 0 {
            match self.pull()? {
                Token::Start(_) => depth += 1,
                Token::End { .. } => depth -= 1,
                Token::Text(_) => {}
                Token::Eof => {
                    return Err(
                        Error::unexpected("element end", Token::Eof).with_offset(self.offset())
                    );
                }
            }
        }
        Ok(())
    }

    fn offset(&self) -> u64 {
        self.reader.buffer_position() as u64
    }
}

fn utf8_name(raw: &[u8]) -> Result<String, Error> {
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|_| Error::msg("tag name is not valid UTF-8"))
}

fn start_tag(start: &BytesStart<'_>) -> Result<StartTag, Error> {
    let name = utf8_name(start.local_name().as_ref())?;
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|err| Error::xml(err.into()))?;
        attributes.push(Attribute {
            name: utf8_name(attr.key.local_name().as_ref())?,
            value: attr.unescape_value().map_err(Error::xml)?.into_owned(),
        });
    }
    Ok(StartTag { name, attributes })
}
