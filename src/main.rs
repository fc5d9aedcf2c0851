use std::path::PathBuf;
use std::process::ExitCode;

use bib2md::writer::progress_message;
use bib2md::{ConvertError, Extraction, Parser, Publication, Writer};

use clap::Parser as CLIParser;
use tracing_subscriber::EnvFilter;

const RULE: &str = "============================================================";

#[cfg(not(feature = "json"))]
#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Settings {
    /// Filepath to the .bib file to convert
    input: PathBuf,

    /// Directory receiving one Markdown file per entry
    #[clap(default_value = "content/publications")]
    output_dir: PathBuf,

    /// Track brace nesting to find entries, so {braced} values work
    #[clap(long)]
    balanced: bool,
}

#[cfg(feature = "json")]
#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Settings {
    /// Filepath to the .bib file to convert
    input: PathBuf,

    /// Directory receiving one Markdown file per entry
    #[clap(default_value = "content/publications")]
    output_dir: PathBuf,

    /// Track brace nesting to find entries, so {braced} values work
    #[clap(long)]
    balanced: bool,

    /// Print the normalized records as JSON instead of writing files
    #[clap(long)]
    json: bool,
}

impl Settings {
    fn extraction(&self) -> Extraction {
        if self.balanced {
            Extraction::Balanced
        } else {
            Extraction::Pattern
        }
    }
}

fn read_publications(s: &Settings) -> Result<Vec<Publication>, ConvertError> {
    let parser = Parser::from_file(&s.input)?.with_extraction(s.extraction());
    let publications: Vec<Publication> = parser
        .iter()
        .map(|entry| Publication::from(&entry))
        .collect();
    if publications.is_empty() {
        return Err(ConvertError::NoEntries);
    }
    tracing::debug!(count = publications.len(), input = %s.input.display(), "parsed input");
    Ok(publications)
}

fn write_markdown(s: &Settings) -> Result<(), ConvertError> {
    let publications = read_publications(s)?;
    let writer = Writer::create(&s.output_dir)?;

    println!("Found {} publication(s)\n", publications.len());
    println!("{}", RULE);
    println!();

    for publication in &publications {
        let file_name = writer.write(publication)?;
        println!("{}", progress_message(publication, &file_name));
    }

    println!("{}", RULE);
    println!(
        "\nDone! Created {} markdown file(s) in {}",
        publications.len(),
        s.output_dir.display()
    );
    println!("\nNext steps:");
    println!("1. Add images for each publication to static/img/publications/");
    println!("2. Review and edit the generated markdown files");
    println!("3. Run 'hugo server' to preview your site");

    Ok(())
}

#[cfg(feature = "json")]
fn print_json(s: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let publications = read_publications(s)?;
    println!("{}", serde_json::to_string_pretty(&publications)?);
    Ok(())
}

fn run(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "json")]
    {
        if settings.json {
            return print_json(settings);
        }
    }
    write_markdown(settings)?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::parse();

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
