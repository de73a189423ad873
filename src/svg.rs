//! Builds the SVG document for a laid-out diagram.
//!
//! Data units are mapped onto a point-based canvas matching the original
//! 12 x 10 inch figure: 288 pt per x-unit and 120 pt per y-unit, with the
//! y axis flipped (layout is y-up, SVG is y-down). The canvas covers exactly
//! the 0..3 x 0..6 axes area, so content reaching past the right axis edge
//! (the exclusion boxes) is clipped there, as the original clips at `xlim`.

use crate::fonts::TextMeasure;
use crate::layout::{Arrow, DiagramLayout, LabeledBox, RotatedLabel};
use crate::xml::escape_xml;

/// Points per data unit horizontally.
const X_SCALE: f32 = 288.0;
/// Points per data unit vertically.
const Y_SCALE: f32 = 120.0;

/// Horizontal padding kept between a label and its box edges, in points.
const LABEL_INSET: f32 = 8.0;

/// Style configuration for diagram rendering.
#[derive(Debug, Clone)]
pub struct DiagramStyle {
    pub background: String,
    pub box_fill: String,
    pub box_stroke: String,
    pub text_color: String,
    pub arrow_color: String,
    pub font_family: String,
    pub font_size: f32,
}

impl Default for DiagramStyle {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            box_fill: "lightblue".to_string(),
            box_stroke: "#000000".to_string(),
            text_color: "#000000".to_string(),
            arrow_color: "#000000".to_string(),
            font_family: "sans-serif".to_string(),
            font_size: 10.0,
        }
    }
}

struct Canvas {
    height: f32,
}

impl Canvas {
    /// Maps a y-up data-unit point to y-down canvas points.
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (x * X_SCALE, self.height - y * Y_SCALE)
    }
}

/// Render the diagram to a complete SVG document.
pub fn render_svg(
    layout: &DiagramLayout,
    style: &DiagramStyle,
    measure: &mut impl TextMeasure,
) -> Result<String, String> {
    if layout.boxes.is_empty() {
        return Err("Diagram layout has no boxes".to_string());
    }

    let width = layout.bounds.width * X_SCALE;
    let height = layout.bounds.height * Y_SCALE;
    let canvas = Canvas { height };

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">"#,
        w = width,
        h = height
    );
    svg.push('\n');
    svg.push_str(&format!(
        r#"<rect width="{:.0}" height="{:.0}" fill="{}"/>"#,
        width, height, style.background
    ));
    svg.push('\n');

    // Arrows first so box strokes stay on top where they touch.
    for arrow in &layout.arrows {
        svg.push_str(&render_arrow(arrow, &canvas, style));
        svg.push('\n');
    }

    for labeled in &layout.boxes {
        svg.push_str(&render_box(labeled, &canvas, style, measure));
        svg.push('\n');
    }

    for label in &layout.stage_labels {
        svg.push_str(&render_stage_label(label, &canvas, style));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

/// Largest font size not exceeding `base` at which every line of `label`
/// fits in `max_width` points. Degrades to `base` when measurement reports
/// zero width (no fonts available).
fn fit_font_size(
    label: &str,
    base: f32,
    max_width: f32,
    measure: &mut impl TextMeasure,
) -> f32 {
    let mut widest: f32 = 0.0;
    for line in label.lines() {
        let (w, _) = measure.measure_text(line, base, false);
        widest = widest.max(w);
    }
    if widest <= max_width || widest <= 0.0 {
        base
    } else {
        (base * max_width / widest).max(6.0)
    }
}

fn render_box(
    labeled: &LabeledBox,
    canvas: &Canvas,
    style: &DiagramStyle,
    measure: &mut impl TextMeasure,
) -> String {
    let rect = &labeled.rect;
    let (x, top) = canvas.map(rect.x, rect.y + rect.height);
    let w = rect.width * X_SCALE;
    let h = rect.height * Y_SCALE;

    let mut svg = format!(
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" stroke="{}" stroke-width="1.5" />"#,
        x, top, w, h, style.box_fill, style.box_stroke
    );

    let font_size = fit_font_size(
        &labeled.label,
        style.font_size,
        w - 2.0 * LABEL_INSET,
        measure,
    );

    let text_x = x + w / 2.0;
    let text_y = top + h / 2.0 + font_size / 3.0;

    let lines: Vec<&str> = labeled.label.lines().collect();
    let line_height = font_size * 1.2;
    let total_height = line_height * lines.len() as f32;
    let start_y = text_y - (total_height / 2.0) + line_height / 2.0;

    for (i, line) in lines.iter().enumerate() {
        let y = start_y + i as f32 * line_height;
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.1}" fill="{}" text-anchor="middle">{}</text>"#,
            text_x,
            y,
            style.font_family,
            font_size,
            style.text_color,
            escape_xml(line)
        ));
    }

    svg
}

fn render_arrow(arrow: &Arrow, canvas: &Canvas, style: &DiagramStyle) -> String {
    let (x1, y1) = canvas.map(arrow.x, arrow.y);
    let shaft_end = (arrow.x + arrow.dx, arrow.y + arrow.dy);
    let (x2, y2) = canvas.map(shaft_end.0, shaft_end.1);

    let mut svg = format!(
        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1.5" />"#,
        x1, y1, x2, y2, style.arrow_color
    );

    // Head polygon built in data units (the anisotropic unit scale then
    // applies to the head the same way it applies to the shaft).
    let len = (arrow.dx * arrow.dx + arrow.dy * arrow.dy).sqrt();
    if len > 0.0 {
        let (dir_x, dir_y) = (arrow.dx / len, arrow.dy / len);
        let (perp_x, perp_y) = (-dir_y, dir_x);
        let half = arrow.head_width / 2.0;

        let (tip_x, tip_y) = canvas.map(
            shaft_end.0 + dir_x * arrow.head_length,
            shaft_end.1 + dir_y * arrow.head_length,
        );
        let (b1_x, b1_y) = canvas.map(shaft_end.0 + perp_x * half, shaft_end.1 + perp_y * half);
        let (b2_x, b2_y) = canvas.map(shaft_end.0 - perp_x * half, shaft_end.1 - perp_y * half);

        svg.push_str(&format!(
            r#"<polygon points="{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}" fill="{}" />"#,
            tip_x, tip_y, b1_x, b1_y, b2_x, b2_y, style.arrow_color
        ));
    }

    svg
}

fn render_stage_label(label: &RotatedLabel, canvas: &Canvas, style: &DiagramStyle) -> String {
    let (x, y) = canvas.map(label.x, label.y);
    format!(
        r#"<text x="{x:.2}" y="{y:.2}" transform="rotate(-90 {x:.2} {y:.2})" font-family="{}" font-size="{:.1}" fill="{}" font-weight="bold" text-anchor="middle">{}</text>"#,
        style.font_family,
        style.font_size,
        style.text_color,
        escape_xml(&label.text),
        x = x,
        y = y + style.font_size / 3.0,
    )
}
