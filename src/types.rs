use std::collections::HashMap;

/// One entry in a `.bib` file, as found by the parser
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct BibEntry {
    /// entry type, e.g. “inproceedings”
    pub kind: String,
    /// citation key, e.g. “doe2023widgets”
    pub id: String,
    /// map of lowercased field names to trimmed values, e.g. “author” mapped to “Doe, Jane”
    pub fields: HashMap<String, String>,
}

impl BibEntry {
    /// Generate a new, empty instance of BibEntry. Can also be called through the `Default` implementation.
    pub fn new() -> BibEntry {
        BibEntry {
            kind: String::new(),
            id: String::new(),
            fields: HashMap::new(),
        }
    }

    /// Value of a field if the entry has it, even when it is empty.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Value of a field only if it is present and not empty.
    pub fn non_empty_field(&self, name: &str) -> Option<&str> {
        self.field(name).filter(|value| !value.is_empty())
    }
}

impl Default for BibEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// Display view of one entry, ready to be rendered as a Markdown page.
///
/// Built with [`Publication::from_entry`]; every field has a default,
/// so a sparse entry still yields a complete record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Publication {
    pub title: String,
    /// display names in source order, “First Last”
    pub authors: Vec<String>,
    pub year: String,
    /// two digits or more, e.g. “03”
    pub month: String,
    pub venue: String,
    /// explicit URL, DOI link, or empty
    pub link: String,
    /// abstract or venue fallback, at most 200 characters
    pub description: String,
    /// raw abstract, rendered below the front matter
    pub abstract_text: String,
    /// e.g. “Conference Paper”
    pub pubtype: &'static str,
    pub slug: String,
}

impl Publication {
    /// `YYYY-MM-01`
    pub fn date(&self) -> String {
        format!("{}-{}-01", self.year, self.month)
    }

    /// Name of the Markdown file this record is written to
    pub fn file_name(&self) -> String {
        format!("{}.md", self.slug)
    }

    /// Site path of the cover image the page expects
    pub fn image_path(&self) -> String {
        format!("/img/publications/{}.png", self.slug)
    }
}
