//! End-to-end pipeline tests against an in-memory document source.
//!
//! A synthetic three-page "contest paper" exercises the full flow
//! without touching pdfium: an instruction page whose header band must
//! be excluded, a single-diagram page, and a page where a two-part
//! diagram must be unioned by the gap rule while a distant diagram
//! stays separate.

use contest_extract::converters::{CsvConverter, LatexConverter, ProblemConverter};
use contest_extract::document::{DocumentSource, EmbeddedImage};
use contest_extract::geometry::Rect;
use contest_extract::pipeline::{DiagramPipeline, ExtractConfig};
use contest_extract::problems::{ProblemConfig, ProblemExtractor};
use contest_extract::raster::PageRaster;
use contest_extract::Result;
use image::{DynamicImage, Rgb, RgbImage};

/// One synthetic page: pre-drawn raster, text, embedded images.
struct FakePage {
    raster: RgbImage,
    text: String,
    embedded: usize,
}

/// In-memory document source with fixed page content.
struct FakeDocument {
    pages: Vec<FakePage>,
}

impl DocumentSource for FakeDocument {
    fn page_count(&self) -> Result<usize> {
        Ok(self.pages.len())
    }

    fn render_page(&self, index: usize, _dpi: f32) -> Result<PageRaster> {
        Ok(PageRaster::new(self.pages[index].raster.clone()))
    }

    fn embedded_images(&self, index: usize) -> Result<Vec<EmbeddedImage>> {
        Ok((0..self.pages[index].embedded)
            .map(|i| EmbeddedImage {
                index: i,
                image: DynamicImage::new_rgb8(20, 20),
            })
            .collect())
    }

    fn page_text(&self, index: usize) -> Result<String> {
        Ok(self.pages[index].text.clone())
    }
}

fn blank(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
}

fn fill_black(image: &mut RgbImage, rect: Rect) {
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            image.put_pixel(x, y, Rgb([0, 0, 0]));
        }
    }
}

fn contest_paper() -> FakeDocument {
    // Page 0: instruction sheet with a near-full-width header band.
    let mut page0 = blank(800, 1000);
    fill_black(&mut page0, Rect::new(40, 20, 720, 60));

    // Page 1: one diagram.
    let mut page1 = blank(800, 1000);
    fill_black(&mut page1, Rect::new(200, 300, 150, 150));

    // Page 2: one diagram split into two nearby parts - 30 px apart,
    // close enough for the gap-expansion rule to union them - and a
    // second diagram far below.
    let mut page2 = blank(800, 1000);
    fill_black(&mut page2, Rect::new(100, 100, 150, 150));
    fill_black(&mut page2, Rect::new(100, 280, 150, 120));
    fill_black(&mut page2, Rect::new(100, 600, 180, 150));

    FakeDocument {
        pages: vec![
            FakePage {
                raster: page0,
                text: "Instructions: calculators are permitted.".to_string(),
                embedded: 0,
            },
            FakePage {
                raster: page1,
                text: "1. What is 2 + 2?\n(A) 3 (B) 4 (C) 5".to_string(),
                embedded: 1,
            },
            FakePage {
                raster: page2,
                text: "2. Find the shaded area.\n3. Count the triangles.".to_string(),
                embedded: 2,
            },
        ],
    }
}

fn test_config(output_dir: &std::path::Path) -> ExtractConfig {
    let mut config = ExtractConfig::default();
    config.export.output_dir = output_dir.to_path_buf();
    config
}

#[test]
fn test_per_page_counts_and_total() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pipeline = DiagramPipeline::with_config(test_config(dir.path()));

    let report = pipeline.run(&contest_paper()).expect("pipeline run");

    assert_eq!(report.pages.len(), 3);
    // The header band is the only candidate on the instruction page and
    // the exclusion zone removes it.
    assert_eq!(report.pages[0].diagrams.len(), 0);
    assert_eq!(report.pages[1].diagrams.len(), 1);
    // The two nearby parts union into one region; the distant diagram
    // stays its own region.
    assert_eq!(report.pages[2].diagrams.len(), 2);
    assert_eq!(report.total_diagrams(), 3);
}

#[test]
fn test_artifacts_are_written_with_deterministic_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pipeline = DiagramPipeline::with_config(test_config(dir.path()));

    let report = pipeline.run(&contest_paper()).expect("pipeline run");

    let names: Vec<String> = report
        .pages
        .iter()
        .flat_map(|p| p.diagrams.iter().map(|d| d.filename.clone()))
        .collect();
    assert_eq!(
        names,
        vec![
            "page2_diagram1.png".to_string(),
            "page3_diagram1.png".to_string(),
            "page3_diagram2.png".to_string(),
        ]
    );
    for name in &names {
        assert!(dir.path().join(name).exists(), "{name} missing");
    }

    // A rerun over unchanged input produces the identical sequence.
    let rerun_dir = tempfile::tempdir().expect("tempdir");
    let rerun = DiagramPipeline::with_config(test_config(rerun_dir.path()))
        .run(&contest_paper())
        .expect("rerun");
    let rerun_names: Vec<String> = rerun
        .pages
        .iter()
        .flat_map(|p| p.diagrams.iter().map(|d| d.filename.clone()))
        .collect();
    assert_eq!(names, rerun_names);
}

#[test]
fn test_crops_lie_within_raster_bounds() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pipeline = DiagramPipeline::with_config(test_config(dir.path()));

    let report = pipeline.run(&contest_paper()).expect("pipeline run");
    for page in &report.pages {
        for diagram in &page.diagrams {
            assert!(diagram.region.right() <= 800);
            assert!(diagram.region.bottom() <= 1000);
            assert!(!diagram.region.is_empty());
        }
    }
}

#[test]
fn test_problem_extraction_end_to_end() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = ProblemConfig {
        max_problems: 25,
        first_content_page: 1,
        image_dir: dir.path().join("images"),
    };

    let problems = ProblemExtractor::new(config)
        .run(&contest_paper())
        .expect("problem extraction");

    assert_eq!(problems.len(), 3);
    assert_eq!(problems[0].text, "1. What is 2 + 2? (A) 3 (B) 4 (C) 5");
    // Page 1's single image attaches to problem 1; page 2's images to
    // the last problem open on that page.
    assert_eq!(problems[0].images.len(), 1);
    assert_eq!(problems[2].images.len(), 2);
    for problem in &problems {
        for image in &problem.images {
            assert!(std::path::Path::new(image).exists(), "{image} missing");
        }
    }

    let latex = LatexConverter::new().convert(&problems).expect("latex");
    assert!(latex.contains("\\textbf{Problem 3}"));
    assert_eq!(latex.matches("\\includegraphics").count(), 3);

    let csv = CsvConverter::new().convert(&problems).expect("csv");
    assert_eq!(csv.lines().count(), 4); // header + 3 rows
}
