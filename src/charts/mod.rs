//! Chart rendering
//!
//! Charts are drawn with plotters into SVG files.

mod histogram;
mod pie;

use plotters::style::RGBColor;

pub use histogram::{draw_comparison, draw_single_run};
pub use pie::draw_pass_fail;

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const PURPLE: RGBColor = RGBColor(128, 0, 128);
const ORANGE: RGBColor = RGBColor(255, 165, 0);
