//! Derivation of display fields from a raw entry.
//!
//! Nothing here fails. A missing field falls back to a fixed default.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{BibEntry, Publication};

lazy_static! {
    static ref AUTHOR_SEPARATOR: Regex = Regex::new(r"\s+and\s+").unwrap();
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^\p{L}\p{N}\s-]").unwrap();
    static ref SLUG_GAPS: Regex = Regex::new(r"[-\s]+").unwrap();
}

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_YEAR: &str = "2024";
pub const DEFAULT_MONTH: &str = "01";
pub const DEFAULT_PUBTYPE: &str = "Paper";

pub const DESCRIPTION_LIMIT: usize = 200;
pub const ELLIPSIS: &str = "...";
/// Only this many leading title characters feed the slug.
pub const SLUG_SOURCE_LIMIT: usize = 50;

/// Entry types with a label other than the default
const PUBTYPES: [(&str, &str); 7] = [
    ("article", "Paper"),
    ("inproceedings", "Conference Paper"),
    ("incollection", "Conference Paper"),
    ("techreport", "Technical Report"),
    ("phdthesis", "PhD Thesis"),
    ("mastersthesis", "Master Thesis"),
    ("book", "Book"),
];

/// Split an `author` field on the word “and” and turn every “Last, First”
/// into “First Last”. Parts after a second comma are dropped.
///
/// ```
/// use bib2md::normalize::parse_authors;
/// assert_eq!(parse_authors("Doe, Jane and John Smith"), vec!["Jane Doe", "John Smith"]);
/// ```
pub fn parse_authors(src: &str) -> Vec<String> {
    if src.is_empty() {
        return Vec::new();
    }

    AUTHOR_SEPARATOR
        .split(src)
        .map(|author| {
            if author.contains(',') {
                let mut parts = author.split(',');
                let last = parts.next().unwrap_or_default().trim();
                let first = parts.next().unwrap_or_default().trim();
                format!("{} {}", first, last).trim().to_string()
            } else {
                author.trim().to_string()
            }
        })
        .collect()
}

/// Lowercase, drop everything but letters, digits, whitespace and hyphens,
/// then join the remaining words with single hyphens.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let kept = NON_SLUG_CHARS.replace_all(&lowered, "");
    SLUG_GAPS.replace_all(&kept, "-").into_owned()
}

/// Cut `text` to 197 characters plus `...` when it is longer than 200 characters.
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_LIMIT {
        return text.to_string();
    }
    let keep = DESCRIPTION_LIMIT - ELLIPSIS.len();
    let mut result: String = text.chars().take(keep).collect();
    result.push_str(ELLIPSIS);
    result
}

/// Label for an entry type, case-insensitive; unknown types are “Paper”.
pub fn pubtype(kind: &str) -> &'static str {
    let kind = kind.to_lowercase();
    PUBTYPES
        .iter()
        .find(|(name, _)| *name == kind)
        .map_or(DEFAULT_PUBTYPE, |(_, label)| *label)
}

/// Zero-pad an all-digit month to two places; anything else is January.
pub fn pad_month(month: &str) -> String {
    if !month.is_empty() && month.chars().all(|c| c.is_ascii_digit()) {
        format!("{:0>2}", month)
    } else {
        DEFAULT_MONTH.to_string()
    }
}

impl Publication {
    /// Derive the display record for one entry.
    pub fn from_entry(entry: &BibEntry) -> Publication {
        let title = entry.field("title").unwrap_or(DEFAULT_TITLE).to_string();

        let venue = ["booktitle", "journal", "venue"]
            .iter()
            .find_map(|name| entry.non_empty_field(name))
            .unwrap_or_default()
            .to_string();

        let link = match (entry.non_empty_field("url"), entry.non_empty_field("doi")) {
            (Some(url), _) => url.to_string(),
            (None, Some(doi)) => format!("https://doi.org/{}", doi),
            (None, None) => String::new(),
        };

        let description = match entry.field("abstract") {
            Some(text) => truncate_description(text),
            None => truncate_description(&format!("Publication: {}", venue)),
        };

        let slug_source: String = title.chars().take(SLUG_SOURCE_LIMIT).collect();

        Publication {
            authors: parse_authors(entry.field("author").unwrap_or_default()),
            year: entry.field("year").unwrap_or(DEFAULT_YEAR).to_string(),
            month: pad_month(entry.field("month").unwrap_or(DEFAULT_MONTH)),
            link,
            description,
            abstract_text: entry.field("abstract").unwrap_or_default().to_string(),
            pubtype: pubtype(&entry.kind),
            slug: slugify(&slug_source),
            venue,
            title,
        }
    }
}

impl From<&BibEntry> for Publication {
    fn from(entry: &BibEntry) -> Self {
        Publication::from_entry(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: &str, fields: &[(&str, &str)]) -> BibEntry {
        BibEntry {
            kind: kind.to_string(),
            id: "key".to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_authors_last_first() {
        assert_eq!(
            parse_authors("Doe, Jane and Smith, John"),
            vec!["Jane Doe", "John Smith"]
        );
    }

    #[test]
    fn test_authors_edge_cases() {
        assert!(parse_authors("").is_empty());
        assert_eq!(parse_authors("Ada Lovelace"), vec!["Ada Lovelace"]);
        assert_eq!(parse_authors("Doe, Jr., John"), vec!["Jr. Doe"]);
        // only the lowercase word separates authors
        assert_eq!(parse_authors("Tom AND Jerry"), vec!["Tom AND Jerry"]);
        assert_eq!(
            parse_authors("Alexander Anderson and\n  Brandt, Sandra"),
            vec!["Alexander Anderson", "Sandra Brandt"]
        );
        assert_eq!(parse_authors("Plato,"), vec!["Plato"]);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World! A Study"), "hello-world-a-study");
        assert_eq!(slugify("Deep -- Learning:  A  Survey"), "deep-learning-a-survey");
        assert_eq!(slugify("Über Straße 2"), "über-straße-2");
        assert_eq!(slugify("snake_case {TeX}"), "snakecase-tex");
    }

    #[test]
    fn test_truncate_description() {
        let exact = "a".repeat(200);
        assert_eq!(truncate_description(&exact), exact);

        let long = "b".repeat(201);
        let cut = truncate_description(&long);
        assert_eq!(cut.chars().count(), 200);
        assert_eq!(cut, format!("{}...", "b".repeat(197)));

        let wide = "é".repeat(250);
        assert_eq!(truncate_description(&wide), format!("{}...", "é".repeat(197)));
    }

    #[test]
    fn test_pubtype_table() {
        assert_eq!(pubtype("article"), "Paper");
        assert_eq!(pubtype("InProceedings"), "Conference Paper");
        assert_eq!(pubtype("incollection"), "Conference Paper");
        assert_eq!(pubtype("techreport"), "Technical Report");
        assert_eq!(pubtype("phdthesis"), "PhD Thesis");
        assert_eq!(pubtype("mastersthesis"), "Master Thesis");
        assert_eq!(pubtype("BOOK"), "Book");
        assert_eq!(pubtype("misc"), "Paper");
        assert_eq!(pubtype(""), "Paper");
    }

    #[test]
    fn test_pad_month() {
        assert_eq!(pad_month("3"), "03");
        assert_eq!(pad_month("11"), "11");
        assert_eq!(pad_month("123"), "123");
        assert_eq!(pad_month("mar"), "01");
        assert_eq!(pad_month(""), "01");
    }

    #[test]
    fn test_sparse_entry_defaults() {
        let p = Publication::from_entry(&entry("misc", &[]));
        assert_eq!(p.title, "Untitled");
        assert!(p.authors.is_empty());
        assert_eq!(p.date(), "2024-01-01");
        assert_eq!(p.venue, "");
        assert_eq!(p.link, "");
        assert_eq!(p.description, "Publication: ");
        assert_eq!(p.abstract_text, "");
        assert_eq!(p.pubtype, "Paper");
        assert_eq!(p.slug, "untitled");
        assert_eq!(p.file_name(), "untitled.md");
    }

    #[test]
    fn test_conference_paper_without_link() {
        let p = Publication::from_entry(&entry(
            "inproceedings",
            &[
                ("title", "Hello, World! A Study"),
                ("booktitle", "Proc. of Things"),
                ("journal", "Ignored Journal"),
                ("year", "2023"),
                ("month", "7"),
            ],
        ));
        assert_eq!(p.link, "");
        assert_eq!(p.pubtype, "Conference Paper");
        assert_eq!(p.venue, "Proc. of Things");
        assert_eq!(p.description, "Publication: Proc. of Things");
        assert_eq!(p.date(), "2023-07-01");
        assert_eq!(p.slug, "hello-world-a-study");
        assert_eq!(p.image_path(), "/img/publications/hello-world-a-study.png");
    }

    #[test]
    fn test_venue_skips_empty_candidates() {
        let p = Publication::from_entry(&entry(
            "article",
            &[("booktitle", ""), ("journal", ""), ("venue", "Workshop")],
        ));
        assert_eq!(p.venue, "Workshop");
    }

    #[test]
    fn test_link_resolution() {
        let both = entry("article", &[("url", "https://x.org/p"), ("doi", "10.1/abc")]);
        assert_eq!(Publication::from_entry(&both).link, "https://x.org/p");

        let doi_only = entry("article", &[("url", ""), ("doi", "10.1/abc")]);
        assert_eq!(Publication::from_entry(&doi_only).link, "https://doi.org/10.1/abc");
    }

    #[test]
    fn test_long_abstract() {
        let text = "x".repeat(300);
        let p = Publication::from_entry(&entry("article", &[("abstract", &text)]));
        assert_eq!(p.description, format!("{}...", "x".repeat(197)));
        assert_eq!(p.abstract_text, text);
    }

    #[test]
    fn test_slug_uses_first_fifty_characters() {
        let title = "A Remarkably Long Title About Widgets That Keeps Going And Going";
        let p = Publication::from_entry(&entry("article", &[("title", title)]));
        assert_eq!(p.slug, slugify(&title[..50]));
        assert_eq!(p.slug, "a-remarkably-long-title-about-widgets-that-keeps-g");
    }

    #[test]
    fn test_from_entry_reference() {
        let source = entry("phdthesis", &[("title", "On Widgets"), ("year", "2019")]);
        let p = Publication::from(&source);
        assert_eq!(p, Publication::from_entry(&source));
        assert_eq!(p.pubtype, "PhD Thesis");
        assert_eq!(p.file_name(), "on-widgets.md");
    }
}
