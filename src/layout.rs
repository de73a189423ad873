//! Fixed geometry of the PRISMA flow diagram.
//!
//! Everything here is laid out in data units on a y-up plane: x spans 0..3,
//! y spans 0..6. The main column sits at x = 0.5, the exclusion column at
//! x = 2.25, and the rotated stage labels hug the left margin at x = 0.1.
//! Mapping to a y-down pixel canvas happens later, in the SVG builder.

use crate::counts::ReviewCounts;

/// Width of the drawable area, in data units.
pub const CANVAS_WIDTH: f32 = 3.0;
/// Height of the drawable area, in data units.
pub const CANVAS_HEIGHT: f32 = 6.0;

const MAIN_X: f32 = 0.5;
const MAIN_WIDTH: f32 = 1.5;
const SIDE_X: f32 = 2.25;
const SIDE_WIDTH: f32 = 1.0;
const BOX_HEIGHT: f32 = 0.5;
const STAGE_LABEL_X: f32 = 0.1;

/// Axis-aligned bounding box in data units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

/// A labeled rectangle. The label holds two lines separated by `\n`:
/// the stage description and the `(n = <count>)` annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledBox {
    pub rect: BBox,
    pub label: String,
}

/// A straight arrow: shaft from `(x, y)` along `(dx, dy)`, with a triangular
/// head extending `head_length` past the shaft end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub head_width: f32,
    pub head_length: f32,
}

impl Arrow {
    fn down(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            dx: 0.0,
            dy: -0.4,
            head_width: 0.05,
            head_length: 0.1,
        }
    }

    fn right(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            dx: 0.15,
            dy: 0.0,
            head_width: 0.05,
            head_length: 0.1,
        }
    }

    /// Position of the arrow tip, head included.
    pub fn tip(&self) -> (f32, f32) {
        let len = (self.dx * self.dx + self.dy * self.dy).sqrt();
        if len == 0.0 {
            return (self.x, self.y);
        }
        let scale = (len + self.head_length) / len;
        (self.x + self.dx * scale, self.y + self.dy * scale)
    }
}

/// A bold category label rotated 90 degrees counter-clockwise, centered on
/// `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RotatedLabel {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// The complete diagram: boxes, arrows, and left-margin stage labels.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramLayout {
    pub boxes: Vec<LabeledBox>,
    pub arrows: Vec<Arrow>,
    pub stage_labels: Vec<RotatedLabel>,
    pub bounds: BBox,
}

fn main_box(y: f32, name: &str, count: u32) -> LabeledBox {
    LabeledBox {
        rect: BBox::new(MAIN_X, y, MAIN_WIDTH, BOX_HEIGHT),
        label: format!("{}\n(n = {})", name, count),
    }
}

fn side_box(y: f32, name: &str, count: u32) -> LabeledBox {
    LabeledBox {
        rect: BBox::new(SIDE_X, y, SIDE_WIDTH, BOX_HEIGHT),
        label: format!("{}\n(n = {})", name, count),
    }
}

/// Lays out the diagram for the given counts.
///
/// The geometry is constant; only the `(n = ...)` annotations vary with the
/// input. No funnel arithmetic is performed here, every count is rendered
/// exactly as supplied.
pub fn layout_diagram(counts: &ReviewCounts) -> DiagramLayout {
    let boxes = vec![
        main_box(5.0, "Records identified", counts.identification),
        main_box(
            4.0,
            "Records after deduplication",
            counts.deduplication.records_after_deduplication,
        ),
        main_box(
            3.0,
            "Records screened",
            counts.screening.selected_for_screening,
        ),
        main_box(
            2.0,
            "Full-text articles assessed",
            counts.eligibility.full_text_assessed,
        ),
        main_box(1.0, "Studies included", counts.included),
        side_box(
            4.0,
            "Duplicates removed",
            counts.deduplication.duplicates_removed,
        ),
        side_box(3.0, "Records excluded", counts.screening.excluded),
        side_box(
            2.0,
            "Full-text articles excluded",
            counts.eligibility.excluded,
        ),
    ];

    let main_cx = MAIN_X + MAIN_WIDTH / 2.0;
    let mut arrows = Vec::with_capacity(7);
    for y in [5.0, 4.0, 3.0, 2.0] {
        arrows.push(Arrow::down(main_cx, y));
    }
    // Rightward arrows leave the main boxes on rows 4, 3, and 2, mid-height.
    for row in &boxes[1..4] {
        let rect = row.rect;
        arrows.push(Arrow::right(rect.right(), rect.y + rect.height / 2.0));
    }

    let stage_labels = [
        (5.25, "Identification"),
        (4.25, "Deduplication"),
        (3.25, "Screening"),
        (2.25, "Eligibility"),
        (1.25, "Included"),
    ]
    .into_iter()
    .map(|(y, text)| RotatedLabel {
        x: STAGE_LABEL_X,
        y,
        text: text.to_string(),
    })
    .collect();

    DiagramLayout {
        boxes,
        arrows,
        stage_labels,
        bounds: BBox::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
    }
}
