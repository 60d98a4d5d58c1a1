//! Field resolution for keyed records declared with [`plist_record!`](crate::plist_record).
//!
//! Each field may carry a tag string. Its first comma-separated component, if
//! non-empty, overrides the key the field binds to; a first component that is
//! exactly `-` means no key ever binds to the field. A field still binds by
//! its own name when no override claims the key, unless its tag starts with `-`. Remaining components are
//! kept as options and are not interpreted by the decoder.
//!
//! Structs using `#[derive(Deserialize)]` get overrides and skipping from
//! serde's `#[serde(rename = "...")]` and `#[serde(skip)]` instead; add
//! `#[serde(alias = "...")]` for the natural-name fallback.

/// One member of a keyed record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Member name as written in the source.
    pub name: &'static str,
    /// Key that binds to this member instead of `name`.
    pub rename: Option<&'static str>,
    /// If true, no key binds to this member.
    pub skip: bool,
    /// Tag components after the first.
    pub options: Vec<&'static str>,
}

impl FieldDescriptor {
    /// Build a descriptor from a member name and its tag string (`""` for none).
    pub fn from_tag(name: &'static str, tag: &'static str) -> Self {
        let mut parts = tag.split(',');
        let first = parts.next().unwrap_or("");
        let options = parts.filter(|p| !p.is_empty()).collect();
        match first {
            "-" => Self {
                name,
                rename: None,
                skip: true,
                options,
            },
            "" => Self {
                name,
                rename: None,
                skip: false,
                options,
            },
            rename => Self {
                name,
                rename: Some(rename),
                skip: false,
                options,
            },
        }
    }
}

/// Descriptor table for one record type, built once and shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldTable {
    fields: Vec<FieldDescriptor>,
}

impl FieldTable {
    /// Build a table from `(member name, tag string)` pairs in declaration order.
    pub fn new(fields: &[(&'static str, &'static str)]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|&(name, tag)| FieldDescriptor::from_tag(name, tag))
                .collect(),
        }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Member name bound to the plist `key`, or `None` if the key is unknown.
    ///
    /// Overrides are searched first, in declaration order. Only then does a
    /// member match by its own name, renamed or not, unless its tag starts
    /// with `-`.
    pub fn resolve(&self, key: &str) -> Option<&'static str> {
        if let Some(field) = self.fields.iter().find(|f| f.rename == Some(key)) {
            return Some(field.name);
        }
        self.fields
            .iter()
            .find(|f| f.name == key)
            .filter(|f| !f.skip && !f.rename.is_some_and(|r| r.starts_with('-')))
            .map(|f| f.name)
    }
}

/// A keyed record with a descriptor table. Implemented by [`plist_record!`](crate::plist_record).
pub trait Record {
    fn field_table() -> &'static FieldTable;
}
