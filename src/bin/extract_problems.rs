//! Extract numbered problems and their images from a contest PDF.
//!
//! Segments per-page text into numbered problems, saves embedded
//! images alongside them, and writes a LaTeX document and/or a CSV
//! spreadsheet.
//!
//! Usage:
//!   extract_problems <contest.pdf> --tex problems.tex
//!   extract_problems <contest.pdf> --csv problems.csv --image-dir images

use contest_extract::converters::{CsvConverter, LatexConverter, ProblemConverter};
use contest_extract::problems::{ProblemConfig, ProblemExtractor};
use contest_extract::PdfiumSource;
use std::fs;
use std::path::PathBuf;
use std::process;

struct CliOptions {
    input: PathBuf,
    tex: Option<PathBuf>,
    csv: Option<PathBuf>,
    image_dir: Option<PathBuf>,
}

impl CliOptions {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut tex = None;
        let mut csv = None;
        let mut image_dir = None;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--tex" => {
                    i += 1;
                    tex = Some(PathBuf::from(args.get(i).ok_or("--tex needs a value")?));
                },
                "--csv" => {
                    i += 1;
                    csv = Some(PathBuf::from(args.get(i).ok_or("--csv needs a value")?));
                },
                "--image-dir" => {
                    i += 1;
                    image_dir = Some(PathBuf::from(
                        args.get(i).ok_or("--image-dir needs a value")?,
                    ));
                },
                other if input.is_none() => {
                    input = Some(PathBuf::from(other));
                },
                other => return Err(format!("unexpected argument: {other}")),
            }
            i += 1;
        }

        let options = Self {
            input: input.ok_or(
                "usage: extract_problems <contest.pdf> [--tex FILE] [--csv FILE] [--image-dir DIR]",
            )?,
            tex,
            csv,
            image_dir,
        };
        if options.tex.is_none() && options.csv.is_none() {
            return Err("nothing to do: pass --tex and/or --csv".to_string());
        }
        Ok(options)
    }
}

fn run(options: &CliOptions) -> contest_extract::Result<()> {
    let mut config = ProblemConfig::default();
    if let Some(dir) = &options.image_dir {
        config.image_dir = dir.clone();
    }

    let source = PdfiumSource::open(&options.input)?;
    let problems = ProblemExtractor::new(config).run(&source)?;
    println!("Segmented {} problems", problems.len());

    if let Some(path) = &options.tex {
        let latex = LatexConverter::new().convert(&problems)?;
        fs::write(path, latex)?;
        println!("LaTeX written to {}", path.display());
    }
    if let Some(path) = &options.csv {
        let rows = CsvConverter::new().convert(&problems)?;
        fs::write(path, rows)?;
        println!("CSV written to {}", path.display());
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let options = match CliOptions::from_args() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            process::exit(2);
        },
    };

    if let Err(e) = run(&options) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
