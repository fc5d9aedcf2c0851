use std::collections::HashMap;
use std::path;
use std::str;

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::ConvertError;
use crate::lexer;
use crate::types;

lazy_static! {
    /// `name = {value}` or `name = "value"`; neither form allows its own delimiter inside the value.
    static ref FIELD: Regex = Regex::new(r#"(\w+)\s*=\s*\{([^}]*)\}|(\w+)\s*=\s*"([^"]*)""#).unwrap();
}

/// Parser reading a `.bib` source and allowing iteration over `BibEntry` instances
pub struct Parser {
    pub(crate) lexer: lexer::Lexer,
    pub(crate) extraction: lexer::Extraction,
}

impl Parser {
    /// Use a file at some filepath as source for the parsing process.
    pub fn from_file<P: AsRef<path::Path>>(path: P) -> Result<Parser, ConvertError> {
        let lexer = lexer::Lexer::from_file(path)?;
        Ok(Parser {
            lexer,
            extraction: lexer::Extraction::default(),
        })
    }

    /// Use a string as source for the parsing process.
    pub fn from_string(data: String) -> Parser {
        Parser {
            lexer: lexer::Lexer::from_string(data),
            extraction: lexer::Extraction::default(),
        }
    }

    /// Choose how entry blocks are located. Defaults to [`lexer::Extraction::Pattern`].
    pub fn with_extraction(mut self, extraction: lexer::Extraction) -> Parser {
        self.extraction = extraction;
        self
    }

    pub fn iter(&self) -> BibEntries<'_> {
        BibEntries {
            blocks: self.lexer.iter(self.extraction),
        }
    }

    /// All entries, in order of appearance.
    pub fn entries(&self) -> Vec<types::BibEntry> {
        self.iter().collect()
    }
}

impl str::FromStr for Parser {
    type Err = ConvertError;

    /// Use a string as source for the parsing process.
    fn from_str(data: &str) -> Result<Self, Self::Err> {
        Ok(Parser::from_string(data.to_string()))
    }
}

/// Iterator yielding one BibEntry after another. Never fails: a block
/// without recognizable fields still yields an entry with an empty field map.
pub struct BibEntries<'i> {
    pub(crate) blocks: lexer::Blocks<'i>,
}

impl<'s> Iterator for BibEntries<'s> {
    type Item = types::BibEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let block = self.blocks.next()?;
        let entry = types::BibEntry {
            kind: block.kind.to_string(),
            id: block.id.to_string(),
            fields: parse_fields(block.body),
        };
        tracing::debug!(kind = %entry.kind, id = %entry.id, fields = entry.fields.len(), "parsed entry");
        Some(entry)
    }
}

/// Split the text between an entry's key and its closing brace into fields.
///
/// Names are lowercased, values trimmed and kept verbatim otherwise.
/// When a name occurs twice, the later value replaces the earlier one.
pub fn parse_fields(body: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    for caps in FIELD.captures_iter(body) {
        let (name, value) = match (caps.get(1), caps.get(2)) {
            (Some(name), Some(value)) => (name, value),
            _ => match (caps.get(3), caps.get(4)) {
                (Some(name), Some(value)) => (name, value),
                _ => continue,
            },
        };
        let name = name.as_str().to_lowercase();
        if let Some(previous) = fields.insert(name, value.as_str().trim().to_string()) {
            tracing::debug!(replaced = %previous, "duplicate field, keeping the later value");
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error;
    use std::str::FromStr;

    use crate::lexer::Extraction;

    #[test]
    fn test_quoted_entry() -> Result<(), Box<dyn error::Error>> {
        let p = Parser::from_str(
            "@inproceedings{doe2023,\n  Author = \"Doe, Jane and Smith, John\",\n  title = \" Hello, World! A Study \"\n}",
        )?;
        let entries = p.entries();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.kind, "inproceedings");
        assert_eq!(entry.id, "doe2023");
        assert_eq!(entry.field("author"), Some("Doe, Jane and Smith, John"));
        assert_eq!(entry.field("title"), Some("Hello, World! A Study"));
        Ok(())
    }

    #[test]
    fn test_order_follows_source() -> Result<(), Box<dyn error::Error>> {
        let src = "@article{first,\n title = \"A\"\n}\n@book{second,\n title = \"B\"\n}\n@misc{third,\n title = \"C\"\n}";
        let ids: Vec<String> = Parser::from_str(src)?.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
        Ok(())
    }

    #[test]
    fn test_fields_mixed_delimiters() {
        let fields = parse_fields("title = {Widgets}, year = \"2023\", note={  padded  }");
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["title"], "Widgets");
        assert_eq!(fields["year"], "2023");
        assert_eq!(fields["note"], "padded");
    }

    #[test]
    fn test_duplicate_field_last_wins() {
        let fields = parse_fields("year = \"2020\",\n YEAR = {2021},\n year = \"2022\"");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["year"], "2022");
    }

    #[test]
    fn test_nested_brace_truncates_value() {
        let fields = parse_fields("title = {The {TeX}book}");
        assert_eq!(fields["title"], "The {TeX");
    }

    #[test]
    fn test_brace_fields_need_balanced_extraction() -> Result<(), Box<dyn error::Error>> {
        let src = "@book{knuth84,\n  title = {The TeXbook},\n  year = {1984}\n}";

        let pattern = Parser::from_str(src)?.entries();
        assert_eq!(pattern.len(), 1);
        assert!(pattern[0].fields.is_empty());

        let balanced = Parser::from_str(src)?
            .with_extraction(Extraction::Balanced)
            .entries();
        assert_eq!(balanced.len(), 1);
        assert_eq!(balanced[0].field("title"), Some("The TeXbook"));
        assert_eq!(balanced[0].field("year"), Some("1984"));
        Ok(())
    }

    #[test]
    fn test_type_field_does_not_replace_kind() -> Result<(), Box<dyn error::Error>> {
        let src = "@techreport{tr1,\n  type = \"Memo\"\n}";
        let entries = Parser::from_str(src)?.entries();
        assert_eq!(entries[0].kind, "techreport");
        assert_eq!(entries[0].field("type"), Some("Memo"));
        Ok(())
    }
}
