//! End-to-end diagram generation: counts -> layout -> SVG -> PNG -> disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use crate::raster::RASTER_DPI;
use crate::svg::DiagramStyle;
use crate::{counts, fonts, layout, raster, svg};

/// Directory the diagram is written into, relative to the base directory.
pub const OUTPUT_DIR: &str = "static";
/// File name of the rendered diagram.
pub const OUTPUT_FILE: &str = "prisma_diagram.png";

/// Render the PRISMA diagram into `./static/prisma_diagram.png`.
///
/// Creates the directory if needed and silently overwrites any previous
/// file. Returns the path of the written PNG.
pub fn generate_prisma_diagram() -> Result<PathBuf, String> {
    generate_prisma_diagram_in(Path::new("."))
}

/// Same as [`generate_prisma_diagram`], rooted at `base` instead of the
/// current directory.
///
/// On failure the error is logged with its full detail and returned
/// unchanged; there is no retry, fallback output, or partial-file cleanup.
pub fn generate_prisma_diagram_in(base: &Path) -> Result<PathBuf, String> {
    debug!("Starting PRISMA diagram generation");

    match render_to(base) {
        Ok(path) => {
            debug!(path = %path.display(), "PRISMA diagram saved");
            Ok(path)
        }
        Err(e) => {
            error!(error = %e, "PRISMA diagram generation failed");
            Err(e)
        }
    }
}

fn render_to(base: &Path) -> Result<PathBuf, String> {
    let counts = counts::seed_counts();
    for note in counts.consistency_notes() {
        warn!("Seed data inconsistency: {}", note);
    }

    let layout = layout::layout_diagram(&counts);
    let mut measure = fonts::CosmicTextMeasure::new()?;
    let document = svg::render_svg(&layout, &DiagramStyle::default(), &mut measure)?;
    let png_data = raster::svg_to_png(&document, RASTER_DPI)?;

    let out_dir = base.join(OUTPUT_DIR);
    fs::create_dir_all(&out_dir).map_err(|e| {
        format!(
            "Failed to create output directory {}: {}",
            out_dir.display(),
            e
        )
    })?;

    let out_path = out_dir.join(OUTPUT_FILE);
    fs::write(&out_path, &png_data)
        .map_err(|e| format!("Failed to write PNG {}: {}", out_path.display(), e))?;

    Ok(out_path)
}
