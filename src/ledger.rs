//! Per-decode record of the first error plus a stream of every error to an optional sink.

use crate::error::Error;

/// Error accumulator owned by one [`crate::Decoder`].
///
/// The first recorded error is latched as the primary error and is never
/// replaced. Every recorded error, the first one included, is passed to the
/// sink exactly once, in the order it was recorded.
pub struct ErrorLedger<'k> {
    primary: Option<Error>,
    sink: Option<Box<dyn FnMut(&Error) + 'k>>,
}

impl<'k> ErrorLedger<'k> {
    /// Ledger without a sink.
    pub fn new() -> Self {
        Self {
            primary: None,
            sink: None,
        }
    }

    /// Ledger that forwards every recorded error to `sink`.
    pub fn with_sink(sink: impl FnMut(&Error) + 'k) -> Self {
        Self {
            primary: None,
            sink: Some(Box::new(sink)),
        }
    }

    /// Record `err` and hand it back for propagation.
    pub fn record(&mut self, err: Error) -> Error {
        log::debug!("plist decode error: {err}");
        if let Some(sink) = self.sink.as_mut() {
            sink(&err);
        }
        if self.primary.is_none() {
            self.primary = Some(err.clone());
        }
        err
    }

    /// The first error recorded, if any.
    pub fn primary(&self) -> Option<&Error> {
        self.primary.as_ref()
    }
}

impl Default for ErrorLedger<'_> {
    fn default() -> Self {
        Self::new()
    }
}
