//! Markdown output for normalized records.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ConvertError;
use crate::types::Publication;

/// Render the page for one record: front matter, blank line, raw abstract.
///
/// Values are inserted verbatim; quotes inside them are not escaped.
pub fn render(publication: &Publication) -> String {
    let authors = publication
        .authors
        .iter()
        .map(|author| format!("\"{}\"", author))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "---\n\
         title: \"{title}\"\n\
         date: {date}\n\
         pubtype: \"{pubtype}\"\n\
         featured: true\n\
         description: \"{description}\"\n\
         authors: [{authors}]\n\
         tags: []\n\
         image: \"{image}\"\n\
         link: \"{link}\"\n\
         venue: \"{venue}\"\n\
         weight: 500\n\
         sitemap:\n  priority: 0.8\n\
         ---\n\
         \n\
         {abstract_text}\n\
         \n",
        title = publication.title,
        date = publication.date(),
        pubtype = publication.pubtype,
        description = publication.description,
        authors = authors,
        image = publication.image_path(),
        link = publication.link,
        venue = publication.venue,
        abstract_text = publication.abstract_text,
    )
}

/// Progress lines the command line prints after a record was written.
pub fn progress_message(publication: &Publication, file_name: &str) -> String {
    format!(
        "Created: {}\n  Title: {}\n  Authors: {}\n  Image needed: {}\n",
        file_name,
        publication.title,
        publication.authors.join(", "),
        publication.image_path(),
    )
}

/// Writes one Markdown file per record into a directory.
pub struct Writer {
    out_dir: PathBuf,
}

impl Writer {
    /// Create the directory (and its parents) if needed.
    pub fn create<P: AsRef<Path>>(out_dir: P) -> Result<Writer, ConvertError> {
        let out_dir = out_dir.as_ref().to_path_buf();
        fs::create_dir_all(&out_dir).map_err(|source| ConvertError::CreateDir {
            path: out_dir.clone(),
            source,
        })?;
        Ok(Writer { out_dir })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Write `<slug>.md`, replacing any file of that name.
    /// Returns the file name; reporting it is up to the caller.
    pub fn write(&self, publication: &Publication) -> Result<String, ConvertError> {
        let file_name = publication.file_name();
        let path = self.out_dir.join(&file_name);
        fs::write(&path, render(publication))
            .map_err(|source| ConvertError::Write { path: path.clone(), source })?;
        tracing::info!(path = %path.display(), "wrote publication page");
        Ok(file_name)
    }
}
