//! Output backends for orbit frames
//!
//! - `svg`: standalone SVG documents, the same scene the page draws
//! - `ascii`: character pictures for terminals

pub mod ascii;
pub mod svg;

pub use ascii::render_ascii;
pub use svg::{render_svg, write_svg};
