//! Positional records and their named views.

use time::{Date, OffsetDateTime};

use crate::field::{TypedField, coerce, unescape};

/// The typed fields of one data line, in wire order.
///
/// Each field keeps the unescaped token it was coerced from, so a column
/// whose text happens to look like a literal can still be read verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<TypedField>,
    texts: Vec<String>,
}

impl Record {
    /// Wraps already-coerced fields, rendering each back to text.
    #[must_use]
    pub fn new(fields: Vec<TypedField>) -> Self {
        let texts = fields.iter().map(ToString::to_string).collect();
        Self { fields, texts }
    }

    /// Coerces raw tokens, keeping each token's unescaped text.
    #[must_use]
    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        let (fields, texts) = tokens
            .into_iter()
            .map(|token| (coerce(token), unescape(token)))
            .unzip();
        Self { fields, texts }
    }

    /// Number of fields on the line.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the line carried no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field at `index`, if the line was long enough.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TypedField> {
        self.fields.get(index)
    }

    /// All fields in wire order.
    #[must_use]
    pub fn fields(&self) -> &[TypedField] {
        &self.fields
    }

    /// Pairs each field with the name at the same position.
    ///
    /// The result is as long as the shorter of the two: missing trailing
    /// fields stay absent and surplus fields are dropped. Names are never
    /// padded with defaults.
    #[must_use]
    pub fn zip(&self, names: &[&'static str]) -> NamedRecord {
        NamedRecord {
            entries: names
                .iter()
                .copied()
                .zip(self.fields.iter().cloned().zip(self.texts.iter().cloned()))
                .map(|(name, (field, text))| NamedField { name, field, text })
                .collect(),
        }
    }
}

impl FromIterator<TypedField> for Record {
    fn from_iter<I: IntoIterator<Item = TypedField>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NamedField {
    name: &'static str,
    field: TypedField,
    text: String,
}

/// A record whose fields have been matched to names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedRecord {
    entries: Vec<NamedField>,
}

impl NamedRecord {
    /// Number of named fields present.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no field was named.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names and values in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &TypedField)> {
        self.entries.iter().map(|entry| (entry.name, &entry.field))
    }

    /// Whether a field with this name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field with this name, if the line reached it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypedField> {
        self.entry(name).map(|entry| &entry.field)
    }

    /// The field's unescaped token, whatever its coerced type.
    ///
    /// Free-text columns such as names can collide with the boolean and
    /// date shapes; this returns the text the server sent.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<String> {
        self.entry(name).map(|entry| entry.text.clone())
    }

    /// The field as a boolean, when it was coerced to one.
    #[must_use]
    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(TypedField::as_bool)
    }

    /// The field as a calendar date, when it was coerced to one.
    #[must_use]
    pub fn date(&self, name: &str) -> Option<Date> {
        self.get(name).and_then(TypedField::as_date)
    }

    /// The field as a timestamp, when it was coerced to one.
    #[must_use]
    pub fn timestamp(&self, name: &str) -> Option<OffsetDateTime> {
        self.get(name).and_then(TypedField::as_timestamp)
    }

    /// Splits a comma-joined identifier field, dropping empty entries.
    ///
    /// The server terminates these lists with a separator, so `"12,13,"`
    /// yields `["12", "13"]`. An absent field yields an empty list.
    #[must_use]
    pub fn id_list(&self, name: &str) -> Vec<String> {
        self.text(name)
            .map(|joined| {
                joined
                    .split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn entry(&self, name: &str) -> Option<&NamedField> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}
