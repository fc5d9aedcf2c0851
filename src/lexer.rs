use std::fs;
use std::io;
use std::path;

use lazy_static::lazy_static;
use regex::{CaptureMatches, Regex};

use crate::errors::ConvertError;

lazy_static! {
    /// `@type{key,` followed by a line break, then everything up to the first `}`.
    static ref ENTRY: Regex = Regex::new(r"@(\w+)\{([^,]+),\s*\n((?:[^}]|\n)*)\}").unwrap();
}

/// How entry blocks are located in the source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Extraction {
    /// Regular-expression matching. The first `}` after the citation key
    /// closes the entry, so a brace-delimited field value ends it early.
    #[default]
    Pattern,
    /// Character scanner counting `{`/`}` nesting inside the entry body.
    Balanced,
}

/// One `@type{key, ...}` block cut out of the source, not yet split into fields.
///
/// For the entry
///
/// ```tex
/// @article{doe2023,
///   title  = "Widgets",
///   author = "Doe, Jane"
/// }
/// ```
///
/// the block is (`article`, `doe2023`, `  title  = "Widgets",\n  author = "Doe, Jane"\n`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RawBlock<'s> {
    pub(crate) kind: &'s str,
    pub(crate) id: &'s str,
    pub(crate) body: &'s str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    Default,
    ReadingType,
    ReadingId,
    ReadingBody,
}

/// Finds blocks by tracking brace depth. Blocks left open at the end of
/// the input are dropped.
pub(crate) struct BalancedBlocks<'s> {
    src: &'s str,
    pos: usize, // byte offset where the next scan resumes
}

impl<'s> BalancedBlocks<'s> {
    pub(crate) fn new(src: &'s str) -> Self {
        BalancedBlocks { src, pos: 0 }
    }
}

impl<'s> Iterator for BalancedBlocks<'s> {
    type Item = RawBlock<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        let src = self.src;
        let mut state = ScanState::Default;
        let mut type_start = 0;
        let mut id_start = 0;
        let mut id_end = 0;
        let mut body_start = 0;
        let mut level = 0usize; // open braces inside the body

        for (offset, chr) in src[self.pos..].char_indices() {
            let at = self.pos + offset;
            match state {
                // expecting '@'
                ScanState::Default => {
                    if chr == '@' {
                        type_start = at + 1;
                        state = ScanState::ReadingType;
                    }
                }
                // expecting entry type, e.g. “book”, then '{'
                ScanState::ReadingType => {
                    if chr == '{' && at > type_start {
                        id_start = at + 1;
                        state = ScanState::ReadingId;
                    } else if chr == '@' {
                        type_start = at + 1;
                    } else if !(chr.is_alphanumeric() || chr == '_') {
                        state = ScanState::Default;
                    }
                }
                // expecting citation key up to ','
                ScanState::ReadingId => {
                    if chr == ',' {
                        id_end = at;
                        body_start = at + 1;
                        level = 0;
                        state = ScanState::ReadingBody;
                    } else if chr == '@' {
                        type_start = at + 1;
                        state = ScanState::ReadingType;
                    } else if chr == '}' {
                        state = ScanState::Default;
                    }
                }
                ScanState::ReadingBody => {
                    if chr == '{' {
                        level += 1;
                    } else if chr == '}' {
                        if level == 0 {
                            self.pos = at + 1;
                            return Some(RawBlock {
                                kind: &src[type_start..id_start - 1],
                                id: src[id_start..id_end].trim(),
                                body: &src[body_start..at],
                            });
                        }
                        level -= 1;
                    }
                }
            }
        }

        if state == ScanState::ReadingBody {
            tracing::warn!(
                kind = &src[type_start..id_start - 1],
                id = src[id_start..id_end].trim(),
                "dropping entry without closing brace"
            );
        }
        self.pos = src.len();
        None
    }
}

/// Blocks of a source text in order of appearance
pub(crate) enum Blocks<'s> {
    Pattern(CaptureMatches<'static, 's>),
    Balanced(BalancedBlocks<'s>),
}

impl<'s> Iterator for Blocks<'s> {
    type Item = RawBlock<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Pattern(matches) => matches.next().map(|caps| {
                let group = |i| caps.get(i).map_or("", |m| m.as_str());
                RawBlock {
                    kind: group(1),
                    id: group(2).trim(),
                    body: group(3),
                }
            }),
            Self::Balanced(blocks) => blocks.next(),
        }
    }
}

/// Holds the whole source text; blocks borrow from it.
pub(crate) struct Lexer {
    src: String,
}

impl Lexer {
    /// Use a file stored at a `path` as source for the lexing process.
    pub(crate) fn from_file<P: AsRef<path::Path>>(path: P) -> Result<Lexer, ConvertError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(src) => Ok(Lexer { src }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(ConvertError::InputNotFound(path.to_path_buf()))
            }
            Err(source) => Err(ConvertError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Use a string as source for the lexing process.
    pub(crate) fn from_string(src: String) -> Lexer {
        Lexer { src }
    }

    pub(crate) fn iter(&self, extraction: Extraction) -> Blocks<'_> {
        match extraction {
            Extraction::Pattern => Blocks::Pattern(ENTRY.captures_iter(&self.src)),
            Extraction::Balanced => Blocks::Balanced(BalancedBlocks::new(&self.src)),
        }
    }
}
