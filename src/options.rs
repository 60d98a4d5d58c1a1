/// Decoder configuration options.
///
/// Example: decode a document that nests deeper than allowed.
///
/// ```rust
/// use serde_plist_xml::{from_slice_with_options, Error, Value};
///
/// let options = serde_plist_xml::options! {
///     max_depth: Some(1),
/// };
///
/// let xml = b"<array><array><true/></array></array>";
/// let err = from_slice_with_options::<Value>(xml, options).unwrap_err();
/// assert!(matches!(err, Error::DepthExceeded { limit: 1, .. }));
/// ```
#[derive(Clone, Debug)]
pub struct Options {
    /// If true (default), a `<plist>` document element is unwrapped and the
    /// value inside it is decoded. The matching `</plist>` is required.
    /// If false, `<plist>` is treated like any other unexpected tag.
    pub plist_root: bool,
    /// If true (default), `<true/>` and `<false/>` must not have content other
    /// than whitespace. If false, any content is skipped.
    pub strict_booleans: bool,
    /// Maximum number of nested containers (`<array>`, `<dict>`). `None`
    /// (default) means no limit: recursion then follows document nesting.
    pub max_depth: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            plist_root: true,
            strict_booleans: true,
            max_depth: None,
        }
    }
}
