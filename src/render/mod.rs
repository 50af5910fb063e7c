//! Dendrogram rendering.
//!
//! Rendering is split in two:
//!
//! 1. [`DendrogramRenderer::layout`] turns a tree into a [`Layout`]: canvas
//!    size plus an ordered list of [`DrawCommand`]s. Pure computation; every
//!    input check happens here.
//! 2. [`Layout::replay`] issues those commands against a [`DrawingSurface`],
//!    and [`DendrogramRenderer::render`] follows with a single `save`.
//!
//! Surfaces shipped here:
//!
//! | Surface | Output |
//! |---------|--------|
//! | [`RecordingSurface`] | in-memory command log |
//! | `SvgSurface` (feature `svg`) | SVG file via `plotters` |

mod layout;
mod surface;
#[cfg(feature = "svg")]
mod svg;

pub use layout::{
    BranchLength, DendrogramRenderer, Layout, RenderConfig, DEFAULT_FIXED_STEP,
    DEFAULT_LABEL_MARGIN, DEFAULT_ROW_HEIGHT, DEFAULT_WIDTH,
};
pub use surface::{DrawCommand, DrawingSurface, ImageFormat, Point, RecordingSurface, Rgb};
#[cfg(feature = "svg")]
pub use svg::{SvgSurface, DEFAULT_FONT_SIZE};
