//! Extract diagram regions from a contest PDF.
//!
//! Renders every page, detects and merges diagram regions, and writes
//! padded crops as `page<N>_diagram<K>.png`.
//!
//! Usage:
//!   extract_diagrams <contest.pdf>
//!   extract_diagrams <contest.pdf> --output-dir diagrams --dpi 300
//!   extract_diagrams <contest.pdf> --config extract.json --embedded

use contest_extract::export::DiagramExporter;
use contest_extract::pipeline::{DiagramPipeline, ExtractConfig};
use contest_extract::{DocumentSource, PdfiumSource};
use std::path::PathBuf;
use std::process;

struct CliOptions {
    input: PathBuf,
    output_dir: Option<PathBuf>,
    dpi: Option<f32>,
    config: Option<PathBuf>,
    /// Also dump the raw embedded images of every page
    embedded: bool,
}

impl CliOptions {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut output_dir = None;
        let mut dpi = None;
        let mut config = None;
        let mut embedded = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--output-dir" => {
                    i += 1;
                    output_dir = Some(PathBuf::from(
                        args.get(i).ok_or("--output-dir needs a value")?,
                    ));
                },
                "--dpi" => {
                    i += 1;
                    let value = args.get(i).ok_or("--dpi needs a value")?;
                    dpi = Some(value.parse().map_err(|_| format!("bad dpi: {value}"))?);
                },
                "--config" => {
                    i += 1;
                    config = Some(PathBuf::from(args.get(i).ok_or("--config needs a value")?));
                },
                "--embedded" => {
                    embedded = true;
                },
                other if input.is_none() => {
                    input = Some(PathBuf::from(other));
                },
                other => return Err(format!("unexpected argument: {other}")),
            }
            i += 1;
        }

        Ok(Self {
            input: input.ok_or(
                "usage: extract_diagrams <contest.pdf> [--output-dir DIR] [--dpi N] [--config FILE] [--embedded]",
            )?,
            output_dir,
            dpi,
            config,
            embedded,
        })
    }
}

fn run(options: &CliOptions) -> contest_extract::Result<()> {
    let mut config = match &options.config {
        Some(path) => ExtractConfig::from_json_file(path)?,
        None => ExtractConfig::default(),
    };
    if let Some(dir) = &options.output_dir {
        config.export.output_dir = dir.clone();
    }
    if let Some(dpi) = options.dpi {
        config.render.dpi = dpi;
    }
    config.validate()?;

    let source = PdfiumSource::open(&options.input)?;
    let output_dir = config.export.output_dir.clone();
    let export_config = config.export.clone();
    let report = DiagramPipeline::with_config(config).run(&source)?;

    for page in &report.pages {
        println!("page {}: {} diagrams", page.page_index + 1, page.diagrams.len());
    }
    println!(
        "Extracted {} diagrams into '{}'",
        report.total_diagrams(),
        output_dir.display()
    );

    if options.embedded {
        let exporter = DiagramExporter::new(export_config);
        let mut embedded_total = 0;
        for page_index in 0..source.page_count()? {
            let images = source.embedded_images(page_index)?;
            embedded_total += exporter.export_embedded(&images, page_index + 1)?.len();
        }
        println!("Saved {embedded_total} embedded images");
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
