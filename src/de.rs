//! Streaming Serde deserializer over plist XML tokens (no DOM).
//!
//! Supported:
//! - Scalars: `<string>`, `<integer>` (exact width, base 10), `<real>`,
//!   `<true/>`/`<false/>`, `<date>`, `<data>` (base64).
//! - Arbitrarily nested `<array>` and `<dict>`.
//! - Records: derived structs, and [`plist_record!`](crate::plist_record) structs.
//! - Dynamic values via `deserialize_any` (see [`crate::Value`]).
//! - Externally-tagged enums: `<string>Variant</string>` or a single-key `<dict>`.
//!
//! Error policy:
//! - The first error of a decode is latched by the [`ErrorLedger`] and is what
//!   every public entry point returns.
//! - Every error is also forwarded, once, to the optional error sink.

mod date_access;

use std::io::{BufRead, BufReader, Read};

use serde::de::value::{SeqDeserializer, StringDeserializer};
use serde::de::{self, DeserializeOwned, Deserializer as _, IntoDeserializer, Visitor};

use crate::date::DATE_STRUCT;
use crate::error::Error;
use crate::ledger::ErrorLedger;
use crate::options::Options;
use crate::parse_scalars::{decode_data, parse_date, parse_integer, parse_real};
use crate::tokens::{StartTag, Token, TokenSource, XmlTokens};
use date_access::DateAccess;

/// Small immutable runtime configuration that `Deser` needs.
#[derive(Clone, Copy)]
pub(crate) struct Cfg {
    /// If true, `<true/>`/`<false/>` must be empty.
    pub(crate) strict_booleans: bool,
    /// Container nesting limit, if any.
    pub(crate) max_depth: Option<usize>,
}

impl Cfg {
    #[inline]
    pub(crate) fn from_options(options: &Options) -> Self {
        Self {
            strict_booleans: options.strict_booleans,
            max_depth: options.max_depth,
        }
    }
}

/// The streaming Serde deserializer over a [`TokenSource`].
///
/// One `Deser` decodes exactly one plist value. Where do values come from: the
/// token source, starting with `opener` if the start tag of the value was
/// already read by the caller (array elements, `Option`, newtypes). Where do
/// values go: into the Serde `Visitor` of the target type, whose choice of
/// `deserialize_*` method is the target kind that is matched against the tag.
pub(crate) struct Deser<'a, 'k> {
    tokens: &'a mut dyn TokenSource,
    ledger: &'a mut ErrorLedger<'k>,
    cfg: Cfg,
    /// Number of enclosing containers.
    depth: usize,
    opener: Option<StartTag>,
}

impl<'a, 'k> Deser<'a, 'k> {
    pub(crate) fn new(
        tokens: &'a mut dyn TokenSource,
        ledger: &'a mut ErrorLedger<'k>,
        cfg: Cfg,
    ) -> Self {
        Self {
            tokens,
            ledger,
            cfg,
            depth: 0,
            opener: None,
        }
    }

    /// Deserializer for another value at the same nesting depth.
    fn reborrow(&mut self, opener: Option<StartTag>) -> Deser<'_, 'k> {
        Deser {
            tokens: &mut *self.tokens,
            ledger: &mut *self.ledger,
            cfg: self.cfg,
            depth: self.depth,
            opener,
        }
    }

    /// Deserializer for the content of a container opened by this one.
    fn child(&mut self) -> Deser<'_, 'k> {
        let mut de = self.reborrow(None);
        de.depth += 1;
        de
    }

    /// Record `err` in the ledger (with the current offset if it has none) and return it.
    fn fail(&mut self, err: Error) -> Error {
        let offset = self.tokens.offset();
        self.ledger.record(err.with_offset_if_unknown(offset))
    }

    fn next_token(&mut self) -> Result<Token, Error> {
        self.tokens.next().map_err(|err| self.fail(err))
    }

    /// Start tag of the value to decode: the opener if one was handed over,
    /// otherwise the next significant token, which then must be a start tag.
    fn open(&mut self) -> Result<StartTag, Error> {
        self.open_as("<any token>")
    }

    /// Like [`Self::open`], naming `expected` when no start tag follows.
    fn open_as(&mut self, expected: &'static str) -> Result<StartTag, Error> {
        if let Some(tag) = self.opener.take() {
            return Ok(tag);
        }
        match self.next_token()? {
            Token::Start(tag) => Ok(tag),
            other => Err(self.fail(Error::unexpected(expected, other))),
        }
    }

    fn mismatch(&mut self, expected: &'static str, tag: StartTag) -> Error {
        self.fail(Error::unexpected(expected, Token::Start(tag)))
    }

    /// Open the value and require its tag to be `name`.
    fn expect_tag(&mut self, name: &str, expected: &'static str) -> Result<StartTag, Error> {
        let tag = self.open()?;
        if tag.name == name {
            Ok(tag)
        } else {
            Err(self.mismatch(expected, tag))
        }
    }

    /// Body text of the element `tag`, consuming its end tag.
    fn body(&mut self, tag: &StartTag) -> Result<String, Error> {
        self.tokens
            .read_text(&tag.name)
            .map_err(|err| self.fail(err))
    }

    /// Open a scalar element `name` and return its body with the body's offset.
    fn scalar(&mut self, name: &str, expected: &'static str) -> Result<(String, u64), Error> {
        let tag = self.expect_tag(name, expected)?;
        let offset = self.tokens.offset();
        let text = self.body(&tag)?;
        Ok((text, offset))
    }

    /// Attach `offset` to a conversion failure and record it.
    fn convert<T>(&mut self, result: Result<T, Error>, offset: u64) -> Result<T, Error> {
        result.map_err(|err| self.fail(err.with_offset(offset)))
    }

    fn skip(&mut self, tag: &StartTag) -> Result<(), Error> {
        log::trace!("skipping <{}> element", tag.name);
        self.tokens.skip_element().map_err(|err| self.fail(err))
    }

    /// Check the nesting limit before entering a container.
    fn enter(&mut self) -> Result<(), Error> {
        match self.cfg.max_depth {
            Some(limit) if self.depth >= limit => Err(self.fail(Error::DepthExceeded {
                limit,
                offset: None,
            })),
            _ => Ok(()),
        }
    }

    /// Value of an already opened `<true>` or `<false>`.
    fn read_bool(&mut self, tag: StartTag) -> Result<bool, Error> {
        let value = tag.name == "true";
        if self.cfg.strict_booleans {
            let text = self.body(&tag)?;
            if !text.trim().is_empty() {
                return Err(self.fail(Error::unexpected(
                    format!("</{}>", tag.name),
                    Token::Text(text),
                )));
            }
        } else {
            self.skip(&tag)?;
        }
        Ok(value)
    }

    /// Bytes of an already opened `<data>`.
    fn read_data(&mut self, tag: StartTag) -> Result<Vec<u8>, Error> {
        let offset = self.tokens.offset();
        let text = self.body(&tag)?;
        self.convert(decode_data(&text), offset)
    }

    /// Present an already opened `<date>` as the synthetic date map.
    fn visit_date<'de, V: Visitor<'de>>(&mut self, tag: StartTag, visitor: V) -> Result<V::Value, Error> {
        let offset = self.tokens.offset();
        let text = self.body(&tag)?;
        self.convert(parse_date(&text), offset)?;
        visitor.visit_map(DateAccess::new(text))
    }

    /// Stream the elements of an already opened `<array>`.
    fn visit_array<'de, V: Visitor<'de>>(&mut self, visitor: V) -> Result<V::Value, Error> {
        self.enter()?;
        let mut access = ArrayAccess {
            de: self.child(),
            done: false,
        };
        let value = visitor.visit_seq(&mut access)?;
        access.finish()?;
        Ok(value)
    }

    /// Stream the key/value pairs of an already opened `<dict>`.
    fn visit_dict<'de, V: Visitor<'de>>(&mut self, visitor: V) -> Result<V::Value, Error> {
        self.enter()?;
        let mut access = DictAccess {
            de: self.child(),
            done: false,
        };
        let value = visitor.visit_map(&mut access)?;
        access.finish()?;
        Ok(value)
    }
}

macro_rules! deserialize_integer {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<V: Visitor<'de>>(mut self, visitor: V) -> Result<V::Value, Self::Error> {
                let (text, offset) = self.scalar("integer", "<integer>")?;
                let v = parse_integer::<$ty>(&text, stringify!($ty));
                visitor.$visit(self.convert(v, offset)?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for Deser<'_, '_> {
    type Error = Error;

    /// Dynamic target: the tag name decides which kind of value is produced.
    ///
    /// `<integer>` is visited as `i64`, `<real>` as `f64`, `<data>` as a byte
    /// buffer and `<date>` as the synthetic date map that [`crate::Date`] and
    /// [`crate::Value`] recognize.
    fn deserialize_any<V: Visitor<'de>>(mut self, visitor: V) -> Result<V::Value, Self::Error> {
        let tag = self.open()?;
        match tag.name.as_str() {
            "true" | "false" => {
                let b = self.read_bool(tag)?;
                visitor.visit_bool(b)
            }
            "integer" => {
                let offset = self.tokens.offset();
                let text = self.body(&tag)?;
                let v = parse_integer::<i64>(&text, "i64");
                visitor.visit_i64(self.convert(v, offset)?)
            }
            "real" => {
                let offset = self.tokens.offset();
                let text = self.body(&tag)?;
                let v = parse_real::<f64>(&text, "f64");
                visitor.visit_f64(self.convert(v, offset)?)
            }
            "string" => {
                let text = self.body(&tag)?;
                visitor.visit_string(text)
            }
            "date" => self.visit_date(tag, visitor),
            "data" => {
                let bytes = self.read_data(tag)?;
                visitor.visit_byte_buf(bytes)
            }
            "array" => self.visit_array(visitor),
            "dict" => self.visit_dict(visitor),
            _ => Err(self.mismatch("<plist value>", tag)),
        }
    }

    fn deserialize_bool<V: Visitor<'de>>(mut self, visitor: V) -> Result<V::Value, Self::Error> {
        let tag = self.open()?;
        if tag.name != "true" && tag.name != "false" {
            return Err(self.mismatch("<true> or <false>", tag));
        }
        let b = self.read_bool(tag)?;
        visitor.visit_bool(b)
    }

    deserialize_integer! {
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_i128 => visit_i128(i128),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_u128 => visit_u128(u128),
    }

    fn deserialize_f32<V: Visitor<'de>>(mut self, visitor: V) -> Result<V::Value, Self::Error> {
        let (text, offset) = self.scalar("real", "<real>")?;
        let v = parse_real::<f32>(&text, "f32");
        visitor.visit_f32(self.convert(v, offset)?)
    }

    fn deserialize_f64<V: Visitor<'de>>(mut self, visitor: V) -> Result<V::Value, Self::Error> {
        let (text, offset) = self.scalar("real", "<real>")?;
        let v = parse_real::<f64>(&text, "f64");
        visitor.visit_f64(self.convert(v, offset)?)
    }

    /// A `<string>` holding exactly one Unicode scalar value.
    fn deserialize_char<V: Visitor<'de>>(mut self, visitor: V) -> Result<V::Value, Self::Error> {
        let (text, offset) = self.scalar("string", "<string>")?;
        let mut it = text.chars();
        match (it.next(), it.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(self.fail(
                Error::msg(format!("invalid char `{text}`: expected a single character"))
                    .with_offset(offset),
            )),
        }
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V: Visitor<'de>>(mut self, visitor: V) -> Result<V::Value, Self::Error> {
        let (text, _) = self.scalar("string", "<string>")?;
        visitor.visit_string(text)
    }

    /// `<data>`, base64-decoded.
    fn deserialize_bytes<V: Visitor<'de>>(mut self, visitor: V) -> Result<V::Value, Self::Error> {
        let tag = self.expect_tag("data", "<data>")?;
        let bytes = self.read_data(tag)?;
        visitor.visit_byte_buf(bytes)
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        self.deserialize_bytes(visitor)
    }

    /// Plist has no null: an optional target always receives a value,
    /// decoded from the same start tag.
    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V: Visitor<'de>>(mut self, _visitor: V) -> Result<V::Value, Self::Error> {
        let _ = self.open()?;
        Err(self.fail(Error::cannot_bind("unit")))
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        mut self,
        name: &'static str,
        _visitor: V,
    ) -> Result<V::Value, Self::Error> {
        let _ = self.open()?;
        Err(self.fail(Error::cannot_bind(name)))
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        visitor.visit_newtype_struct(self)
    }

    /// `<array>` elements, or the decoded bytes of a `<data>` element.
    ///
    /// The target collection is built fresh by its visitor, so decoding never
    /// appends to previous content.
    fn deserialize_seq<V: Visitor<'de>>(mut self, visitor: V) -> Result<V::Value, Self::Error> {
        let tag = self.open()?;
        match tag.name.as_str() {
            "array" => self.visit_array(visitor),
            "data" => {
                let bytes = self.read_data(tag)?;
                let mut seq = SeqDeserializer::<_, Error>::new(bytes.into_iter());
                let value = visitor.visit_seq(&mut seq)?;
                seq.end().map_err(|err| self.fail(err))?;
                Ok(value)
            }
            _ => Err(self.mismatch("<array>", tag)),
        }
    }

    fn deserialize_tuple<V: Visitor<'de>>(
        self,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(mut self, visitor: V) -> Result<V::Value, Self::Error> {
        let _ = self.expect_tag("dict", "<dict>")?;
        self.visit_dict(visitor)
    }

    /// Records come from `<dict>`; [`crate::Date`] asks for `<date>` through its private name.
    fn deserialize_struct<V: Visitor<'de>>(
        mut self,
        name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        if name == DATE_STRUCT {
            let tag = self.expect_tag("date", "<date>")?;
            return self.visit_date(tag, visitor);
        }
        self.deserialize_map(visitor)
    }

    /// Externally-tagged enum: `<string>Variant</string>` for unit variants,
    /// `<dict><key>Variant</key>payload</dict>` for the others.
    fn deserialize_enum<V: Visitor<'de>>(
        mut self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        let tag = self.open()?;
        match tag.name.as_str() {
            "string" => {
                let variant: StringDeserializer<Error> = self.body(&tag)?.into_deserializer();
                visitor.visit_enum(variant)
            }
            "dict" => {
                self.enter()?;
                let variant = match self.next_token()? {
                    Token::Start(key) if key.name == "key" => self.body(&key)?,
                    other => return Err(self.fail(Error::unexpected("<key>", other))),
                };
                let value = visitor.visit_enum(VariantDeser {
                    de: self.child(),
                    variant,
                })?;
                match self.next_token()? {
                    Token::End { .. } => Ok(value),
                    other => Err(self.fail(Error::unexpected("</dict>", other))),
                }
            }
            _ => Err(self.mismatch("<string> or <dict>", tag)),
        }
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        self.deserialize_string(visitor)
    }

    /// Skip the next element entirely, whatever it contains.
    ///
    /// This is how the value of a dict key without a matching field is dropped.
    fn deserialize_ignored_any<V: Visitor<'de>>(mut self, visitor: V) -> Result<V::Value, Self::Error> {
        let tag = self.open_as("<any key>")?;
        self.skip(&tag)?;
        visitor.visit_unit()
    }
}

/// Streaming `SeqAccess` over the elements of one `<array>`.
struct ArrayAccess<'b, 'k> {
    de: Deser<'b, 'k>,
    /// Set once `</array>` has been consumed.
    done: bool,
}

impl ArrayAccess<'_, '_> {
    /// Consume `</array>` if the visitor stopped before reaching it.
    fn finish(&mut self) -> Result<(), Error> {
        if self.done {
            return Ok(());
        }
        match self.de.next_token()? {
            Token::End { .. } => {
                self.done = true;
                Ok(())
            }
            other => Err(self.de.fail(Error::unexpected("</array>", other))),
        }
    }
}

impl<'de> de::SeqAccess<'de> for ArrayAccess<'_, '_> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, Error>
    where
        T: de::DeserializeSeed<'de>,
    {
        if self.done {
            return Ok(None);
        }
        match self.de.next_token()? {
            Token::Start(tag) => seed.deserialize(self.de.reborrow(Some(tag))).map(Some),
            Token::End { .. } => {
                self.done = true;
                Ok(None)
            }
            other => Err(self.de.fail(Error::unexpected("</array>", other))),
        }
    }
}

/// Streaming `MapAccess` over the `<key>`/value pairs of one `<dict>`.
struct DictAccess<'b, 'k> {
    de: Deser<'b, 'k>,
    /// Set once `</dict>` has been consumed.
    done: bool,
}

impl DictAccess<'_, '_> {
    fn finish(&mut self) -> Result<(), Error> {
        if self.done {
            return Ok(());
        }
        match self.de.next_token()? {
            Token::End { .. } => {
                self.done = true;
                Ok(())
            }
            other => Err(self.de.fail(Error::unexpected("</dict>", other))),
        }
    }
}

impl<'de> de::MapAccess<'de> for DictAccess<'_, '_> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Error>
    where
        K: de::DeserializeSeed<'de>,
    {
        if self.done {
            return Ok(None);
        }
        match self.de.next_token()? {
            Token::End { .. } => {
                self.done = true;
                Ok(None)
            }
            Token::Start(tag) if tag.name == "key" => {
                let key: StringDeserializer<Error> = self.de.body(&tag)?.into_deserializer();
                seed.deserialize(key).map(Some)
            }
            Token::Start(tag) => Err(self.de.mismatch("<key>", tag)),
            other => Err(self.de.fail(Error::unexpected("</dict>", other))),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Error>
    where
        V: de::DeserializeSeed<'de>,
    {
        seed.deserialize(self.de.reborrow(None))
    }
}

/// `EnumAccess` for the `<dict><key>Variant</key>payload</dict>` form.
struct VariantDeser<'b, 'k> {
    de: Deser<'b, 'k>,
    variant: String,
}

impl<'de, 'b, 'k> de::EnumAccess<'de> for VariantDeser<'b, 'k> {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<S>(self, seed: S) -> Result<(S::Value, Self), Error>
    where
        S: de::DeserializeSeed<'de>,
    {
        let name: StringDeserializer<Error> = self.variant.clone().into_deserializer();
        let value = seed.deserialize(name)?;
        Ok((value, self))
    }
}

impl<'de> de::VariantAccess<'de> for VariantDeser<'_, '_> {
    type Error = Error;

    /// The payload of a unit variant carries no information and is skipped.
    fn unit_variant(self) -> Result<(), Error> {
        self.de.deserialize_ignored_any(de::IgnoredAny)?;
        Ok(())
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value, Error>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(self.de)
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value, Error> {
        self.de.deserialize_seq(visitor)
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        self.de.deserialize_map(visitor)
    }
}

/// Reusable plist decoder over one input stream.
///
/// A `Decoder` owns the tokenizer and the [`ErrorLedger`] for its input. Once
/// a decode fails, the first error stays latched: every later call returns it
/// without reading further.
///
/// ```rust
/// use serde_plist_xml::Decoder;
///
/// let xml = "<integer>1</integer> <integer>2</integer>";
/// let mut decoder = Decoder::new(xml.as_bytes());
/// let a: i32 = decoder.decode().unwrap();
/// let b: i32 = decoder.decode().unwrap();
/// decoder.end().unwrap();
/// assert_eq!((a, b), (1, 2));
/// ```
pub struct Decoder<'k, R> {
    tokens: XmlTokens<R>,
    ledger: ErrorLedger<'k>,
    cfg: Cfg,
    plist_root: bool,
}

impl<'k, R: Read> Decoder<'k, BufReader<R>> {
    /// Decoder over any byte stream, with default options.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, Options::default())
    }

    pub fn with_options(reader: R, options: Options) -> Self {
        Self::from_buf_read(BufReader::new(reader), options)
    }

    /// Decoder that also streams every error to `sink` as it is detected.
    pub fn with_error_sink(reader: R, options: Options, sink: impl FnMut(&Error) + 'k) -> Self {
        Self::from_buf_read_with_error_sink(BufReader::new(reader), options, sink)
    }
}

impl<'k, R: BufRead> Decoder<'k, R> {
    /// Decoder over an already buffered source, such as `&[u8]`.
    pub fn from_buf_read(input: R, options: Options) -> Self {
        Self::build(input, &options, ErrorLedger::new())
    }

    pub fn from_buf_read_with_error_sink(
        input: R,
        options: Options,
        sink: impl FnMut(&Error) + 'k,
    ) -> Self {
        Self::build(input, &options, ErrorLedger::with_sink(sink))
    }

    fn build(input: R, options: &Options, ledger: ErrorLedger<'k>) -> Self {
        Self {
            tokens: XmlTokens::new(input),
            ledger,
            cfg: Cfg::from_options(options),
            plist_root: options.plist_root,
        }
    }

    /// Decode the next top-level value.
    pub fn decode<T: DeserializeOwned>(&mut self) -> Result<T, Error> {
        if let Some(err) = self.ledger.primary() {
            return Err(err.clone());
        }
        log::trace!("decoding plist value at offset {}", self.tokens.offset());
        let result = self.decode_document();
        self.settle(result)
    }

    /// Decode the next top-level value into `target`.
    ///
    /// `target` is only written when the whole value decoded successfully.
    /// A failed decode never leaves it partially populated.
    pub fn decode_into<T: DeserializeOwned>(&mut self, target: &mut T) -> Result<(), Error> {
        *target = self.decode()?;
        Ok(())
    }

    /// Require the rest of the input to hold nothing but insignificant content.
    pub fn end(&mut self) -> Result<(), Error> {
        if let Some(err) = self.ledger.primary() {
            return Err(err.clone());
        }
        let result = match self.tokens.next() {
            Ok(Token::Eof) => Ok(()),
            Ok(other) => Err(Error::unexpected("EOF", other).with_offset(self.tokens.offset())),
            Err(err) => Err(err),
        };
        self.settle(result)
    }

    /// The first error this decoder ran into, if any.
    pub fn primary_error(&self) -> Option<&Error> {
        self.ledger.primary()
    }

    fn decode_document<T: DeserializeOwned>(&mut self) -> Result<T, Error> {
        let plist_root = self.plist_root;
        let mut de = Deser::new(&mut self.tokens, &mut self.ledger, self.cfg);
        let head = de.open()?;
        if !(plist_root && head.name == "plist") {
            de.opener = Some(head);
            return T::deserialize(de);
        }
        log::trace!("unwrapping <plist> root, version {:?}", head.attribute("version"));
        let value = T::deserialize(de.reborrow(None))?;
        match de.next_token()? {
            Token::End { .. } => Ok(value),
            other => Err(de.fail(Error::unexpected("</plist>", other))),
        }
    }

    /// Turn a raw decode result into the public one: the latched primary error
    /// wins; an error nobody recorded yet (raised by a visitor) is recorded now.
    fn settle<T>(&mut self, result: Result<T, Error>) -> Result<T, Error> {
        if let Some(primary) = self.ledger.primary() {
            return Err(primary.clone());
        }
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                let offset = self.tokens.offset();
                Err(self.ledger.record(err.with_offset_if_unknown(offset)))
            }
        }
    }
}

/// Deserialize a `T` from a plist XML string.
///
/// The input must hold exactly one value (optionally inside a `<plist>`
/// element); anything significant after it is an error.
///
/// ```rust
/// let v: Vec<i32> = serde_plist_xml::from_str(
///     "<array><integer>4</integer><integer>2</integer></array>",
/// ).unwrap();
/// assert_eq!(v, vec![4, 2]);
/// ```
pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, Error> {
    from_slice(input.as_bytes())
}

/// Deserialize a `T` from plist XML bytes.
pub fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T, Error> {
    from_slice_with_options(input, Options::default())
}

/// Deserialize a `T` from plist XML bytes with custom [`Options`].
pub fn from_slice_with_options<T: DeserializeOwned>(
    input: &[u8],
    options: Options,
) -> Result<T, Error> {
    let mut decoder = Decoder::from_buf_read(input, options);
    finish_one(&mut decoder)
}

/// Deserialize a `T` from plist XML bytes, passing every error to `sink` as
/// it is detected. The returned error, if any, is the first one `sink` saw.
///
/// ```rust
/// let mut seen = Vec::new();
/// let r = serde_plist_xml::from_slice_with_error_sink::<i8>(
///     b"<integer>256</integer>",
///     |err| seen.push(err.to_string()),
/// );
/// assert!(r.is_err());
/// assert_eq!(seen.len(), 1);
/// ```
pub fn from_slice_with_error_sink<T: DeserializeOwned>(
    input: &[u8],
    sink: impl FnMut(&Error),
) -> Result<T, Error> {
    let mut decoder = Decoder::from_buf_read_with_error_sink(input, Options::default(), sink);
    finish_one(&mut decoder)
}

/// Deserialize a `T` from any byte stream.
pub fn from_reader<R: Read, T: DeserializeOwned>(reader: R) -> Result<T, Error> {
    from_reader_with_options(reader, Options::default())
}

pub fn from_reader_with_options<R: Read, T: DeserializeOwned>(
    reader: R,
    options: Options,
) -> Result<T, Error> {
    let mut decoder = Decoder::with_options(reader, options);
    finish_one(&mut decoder)
}

fn finish_one<T: DeserializeOwned, R: BufRead>(decoder: &mut Decoder<'_, R>) -> Result<T, Error> {
    let value = decoder.decode()?;
    decoder.end()?;
    Ok(value)
}
