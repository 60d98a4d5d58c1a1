use serde::de::value::{BytesDeserializer, StringDeserializer};
use serde::de::{self, DeserializeSeed};

use crate::date::DATE_FIELD;
use crate::error::Error;

/// One-entry map `{DATE_FIELD: body}` standing for an already validated `<date>`.
/// The key is handed over as bytes (see [`crate::date::MapKey`]).
pub(super) struct DateAccess {
    text: Option<String>,
    key_done: bool,
}

impl DateAccess {
    pub(super) fn new(text: String) -> Self {
        Self {
            text: Some(text),
            key_done: false,
        }
    }
}

impl<'de> de::MapAccess<'de> for DateAccess {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Error>
    where
        K: DeserializeSeed<'de>,
    {
        if self.key_done {
            return Ok(None);
        }
        self.key_done = true;
        seed.deserialize(BytesDeserializer::<Error>::new(DATE_FIELD.as_bytes()))
            .map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Error>
    where
        V: DeserializeSeed<'de>,
    {
        let text = self
            .text
            .take()
            .ok_or_else(|| Error::msg("date value already taken"))?;
        seed.deserialize(StringDeserializer::<Error>::new(text))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(usize::from(!self.key_done))
    }
}
