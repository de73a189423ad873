//! SVG to PNG rasterization.
//!
//! The SVG canvas is in points (72 per inch), so rasterizing at
//! `dpi / 72` yields the requested physical resolution. The density is
//! also recorded in the file via a `pHYs` chunk.

use std::path::Path;

use resvg::usvg;
use tiny_skia::{Pixmap, Transform};

/// Output density of the rendered diagram.
pub const RASTER_DPI: f32 = 300.0;

const POINTS_PER_INCH: f32 = 72.0;
const INCHES_PER_METRE: f32 = 39.3701;

/// Rasterize an SVG document to PNG bytes at the given density.
pub fn svg_to_png(svg: &str, dpi: f32) -> Result<Vec<u8>, String> {
    if !dpi.is_finite() || dpi <= 0.0 {
        return Err(format!("Invalid raster density: {} dpi", dpi));
    }

    let mut opts = usvg::Options::default();
    {
        let fontdb = opts.fontdb_mut();
        fontdb.load_system_fonts();

        let local_fonts = Path::new("fonts");
        if local_fonts.is_dir() {
            fontdb.load_fonts_dir(local_fonts);
        }

        configure_font_fallbacks(fontdb);
    }

    let tree =
        usvg::Tree::from_str(svg, &opts).map_err(|e| format!("Failed to parse SVG: {}", e))?;

    let scale = dpi / POINTS_PER_INCH;
    let png_width = (tree.size().width() * scale).ceil() as u32;
    let png_height = (tree.size().height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(png_width, png_height).ok_or("Failed to create pixmap")?;
    let transform = Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    encode_png(&pixmap, dpi)
}

/// Encode a pixmap as RGBA8 PNG carrying the density in a `pHYs` chunk.
fn encode_png(pixmap: &Pixmap, dpi: f32) -> Result<Vec<u8>, String> {
    // tiny-skia stores premultiplied alpha; PNG wants straight alpha.
    let mut rgba = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let pixels_per_metre = (dpi * INCHES_PER_METRE).round() as u32;

    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, pixmap.width(), pixmap.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: pixels_per_metre,
        yppu: pixels_per_metre,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder
        .write_header()
        .map_err(|e| format!("Failed to write PNG header: {}", e))?;
    writer
        .write_image_data(&rgba)
        .map_err(|e| format!("Failed to write PNG data: {}", e))?;
    writer
        .finish()
        .map_err(|e| format!("Failed to finish PNG stream: {}", e))?;

    Ok(out)
}

fn configure_font_fallbacks(fontdb: &mut usvg::fontdb::Database) {
    let mut sans_family: Option<String> = None;
    let mut first_family: Option<String> = None;

    for face in fontdb.faces() {
        for (family, _) in &face.families {
            if first_family.is_none() {
                first_family = Some(family.clone());
            }
            if sans_family.is_none() && family.to_ascii_lowercase().contains("sans") {
                sans_family = Some(family.clone());
            }
        }
    }

    if let Some(family) = sans_family.as_deref().or(first_family.as_deref()) {
        fontdb.set_sans_serif_family(family);
        fontdb.set_serif_family(family);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="72" height="36" viewBox="0 0 72 36"><rect width="72" height="36" fill="lightblue" stroke="black"/></svg>"#;

    #[test]
    fn produces_a_decodable_png_at_density() {
        let bytes = svg_to_png(TINY_SVG, 300.0).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoder = png::Decoder::new(std::io::Cursor::new(bytes.as_slice()));
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        // 72 x 36 pt at 300 dpi
        assert_eq!((info.width, info.height), (300, 150));
        let dims = info.pixel_dims.expect("pHYs chunk present");
        assert_eq!(dims.unit, png::Unit::Meter);
        assert_eq!(dims.xppu, 11811);
        assert_eq!(dims.yppu, 11811);
    }

    #[test]
    fn rejects_bad_density() {
        assert!(svg_to_png(TINY_SVG, 0.0).is_err());
        assert!(svg_to_png(TINY_SVG, -300.0).is_err());
        assert!(svg_to_png(TINY_SVG, f32::NAN).is_err());
    }

    #[test]
    fn rejects_malformed_svg() {
        assert!(svg_to_png("<svg", 300.0).is_err());
    }
}
