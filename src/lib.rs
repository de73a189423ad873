pub mod counts;
pub mod fonts;
pub mod layout;
pub mod raster;
pub mod renderer;
pub mod svg;
pub mod xml;

pub use counts::{ReviewCounts, seed_counts};
pub use renderer::{generate_prisma_diagram, generate_prisma_diagram_in};
