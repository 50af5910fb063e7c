//! Drawing primitives and the surface they are issued against.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#ffffff`
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    /// `#000000`
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    /// `#ff0000`
    pub const RED: Rgb = Rgb(255, 0, 0);
}

/// Canvas position in pixels; origin top-left, `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Output encoding requested from [`DrawingSurface::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Scalable vector graphics.
    Svg,
    /// Lossless raster.
    Png,
    /// Lossy raster.
    Jpeg,
}

impl ImageFormat {
    /// Guess the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Some(ImageFormat::Svg),
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }
}

/// One primitive draw operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Straight line segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke color.
        color: Rgb,
    },
    /// Text anchored at its top-left corner.
    Text {
        /// Anchor point.
        at: Point,
        /// Text to draw.
        text: String,
        /// Fill color.
        color: Rgb,
    },
}

/// Sink for draw operations.
///
/// Image encoding lives behind this trait: the renderer computes a complete
/// layout first, then issues `create_canvas`, the draw calls in layout order,
/// and exactly one `save`.
pub trait DrawingSurface {
    /// Start a fresh canvas. Discards anything drawn before.
    fn create_canvas(&mut self, width: u32, height: u32, background: Rgb) -> Result<()>;

    /// Draw a line segment.
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb) -> Result<()>;

    /// Draw a text label.
    fn draw_text(&mut self, at: Point, text: &str, color: Rgb) -> Result<()>;

    /// Persist the canvas.
    fn save(&mut self, path: &Path, format: ImageFormat) -> Result<()>;
}

pub(crate) fn no_canvas() -> Error {
    Error::Render("draw call before create_canvas".into())
}

/// In-memory surface that records every call. Useful for tests and for
/// feeding another drawing library.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    /// `(width, height, background)` of the current canvas.
    pub canvas: Option<(u32, u32, Rgb)>,
    /// Draw commands in call order.
    pub commands: Vec<DrawCommand>,
    /// Every `save` call.
    pub saved: Vec<(PathBuf, ImageFormat)>,
}

impl RecordingSurface {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded line segments.
    pub fn lines(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, .. } => Some((*from, *to)),
            DrawCommand::Text { .. } => None,
        })
    }

    /// Recorded text labels with their anchors.
    pub fn texts(&self) -> impl Iterator<Item = (Point, &str)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { at, text, .. } => Some((*at, text.as_str())),
            DrawCommand::Line { .. } => None,
        })
    }
}

impl DrawingSurface for RecordingSurface {
    fn create_canvas(&mut self, width: u32, height: u32, background: Rgb) -> Result<()> {
        self.canvas = Some((width, height, background));
        self.commands.clear();
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb) -> Result<()> {
        self.canvas.ok_or_else(no_canvas)?;
        self.commands.push(DrawCommand::Line { from, to, color });
        Ok(())
    }

    fn draw_text(&mut self, at: Point, text: &str, color: Rgb) -> Result<()> {
        self.canvas.ok_or_else(no_canvas)?;
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_owned(),
            color,
        });
        Ok(())
    }

    fn save(&mut self, path: &Path, format: ImageFormat) -> Result<()> {
        self.canvas.ok_or_else(no_canvas)?;
        self.saved.push((path.to_path_buf(), format));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(ImageFormat::from_path(Path::new("a/b.SVG")), Some(ImageFormat::Svg));
        assert_eq!(ImageFormat::from_path(Path::new("out.jpg")), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_path(Path::new("out.png")), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_path(Path::new("out")), None);
        assert_eq!(ImageFormat::from_path(Path::new("out.gif")), None);
    }

    #[test]
    fn recorder_requires_a_canvas() {
        let mut s = RecordingSurface::new();
        let err = s
            .draw_line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Rgb::RED)
            .unwrap_err();
        assert!(matches!(err, Error::Render(_)));
        assert!(s.save(Path::new("x.svg"), ImageFormat::Svg).is_err());
    }

    #[test]
    fn recorder_keeps_call_order() {
        let mut s = RecordingSurface::new();
        s.create_canvas(10, 20, Rgb::WHITE).unwrap();
        s.draw_line(Point::new(0.0, 0.0), Point::new(5.0, 0.0), Rgb::RED)
            .unwrap();
        s.draw_text(Point::new(1.0, 2.0), "leaf", Rgb::BLACK).unwrap();
        s.save(Path::new("out.svg"), ImageFormat::Svg).unwrap();

        assert_eq!(s.canvas, Some((10, 20, Rgb::WHITE)));
        assert_eq!(s.lines().count(), 1);
        assert_eq!(s.texts().collect::<Vec<_>>(), vec![(Point::new(1.0, 2.0), "leaf")]);
        assert_eq!(s.saved, vec![(PathBuf::from("out.svg"), ImageFormat::Svg)]);
    }

    #[test]
    fn new_canvas_discards_old_commands() {
        let mut s = RecordingSurface::new();
        s.create_canvas(10, 10, Rgb::WHITE).unwrap();
        s.draw_text(Point::new(0.0, 0.0), "old", Rgb::BLACK).unwrap();
        s.create_canvas(10, 10, Rgb::WHITE).unwrap();
        assert!(s.commands.is_empty());
    }
}
