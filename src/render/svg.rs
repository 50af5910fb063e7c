//! SVG output through `plotters`.
//!
//! Uses the SVG backend to avoid system font dependencies. Commands are
//! buffered and replayed onto a fresh [`SVGBackend`] at `save`, since the
//! backend needs the output path up front.

use std::path::Path;

use plotters::prelude::*;
use plotters_svg::SVGBackend;

use super::surface::{no_canvas, DrawCommand, DrawingSurface, ImageFormat, Point, Rgb};
use crate::error::{Error, Result};

/// Default label font size in pixels.
pub const DEFAULT_FONT_SIZE: u32 = 12;

/// [`DrawingSurface`] that writes SVG files.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    canvas: Option<(u32, u32, Rgb)>,
    commands: Vec<DrawCommand>,
    font_family: String,
    font_size: u32,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self {
            canvas: None,
            commands: Vec::new(),
            font_family: "sans-serif".to_owned(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl SvgSurface {
    /// Create a surface with a 12px sans-serif label font.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label font.
    pub fn with_font(mut self, family: impl Into<String>, size: u32) -> Self {
        self.font_family = family.into();
        self.font_size = size;
        self
    }
}

fn color(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn pixel(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

fn render_err<E: std::fmt::Display>(err: E) -> Error {
    Error::Render(err.to_string())
}

impl DrawingSurface for SvgSurface {
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
        if format != ImageFormat::Svg {
            return Err(Error::InvalidParameter {
                name: "format",
                message: "SvgSurface only writes SVG",
            });
        }
        let (width, height, background) = self.canvas.ok_or_else(no_canvas)?;

        let root = SVGBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&color(background)).map_err(render_err)?;

        for command in &self.commands {
            match command {
                DrawCommand::Line { from, to, color: c } => {
                    let stroke = color(*c);
                    root.draw(&PathElement::new(vec![pixel(*from), pixel(*to)], &stroke))
                        .map_err(render_err)?;
                }
                DrawCommand::Text { at, text, color: c } => {
                    let style = (self.font_family.as_str(), self.font_size)
                        .into_font()
                        .color(&color(*c));
                    root.draw(&Text::new(text.as_str(), pixel(*at), style))
                        .map_err(render_err)?;
                }
            }
        }

        root.present().map_err(render_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_lines_and_labels() {
        let path = std::env::temp_dir().join(format!("clade-svg-{}.svg", std::process::id()));
        let mut surface = SvgSurface::new();
        surface.create_canvas(120, 40, Rgb::WHITE).unwrap();
        surface
            .draw_line(Point::new(0.0, 20.0), Point::new(10.0, 20.0), Rgb::RED)
            .unwrap();
        surface
            .draw_text(Point::new(15.0, 13.0), "feedburner", Rgb::BLACK)
            .unwrap();
        surface.save(&path, ImageFormat::Svg).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("feedburner"));
    }

    #[test]
    fn rejects_raster_formats() {
        let mut surface = SvgSurface::new();
        surface.create_canvas(10, 10, Rgb::WHITE).unwrap();
        let err = surface
            .save(Path::new("out.jpg"), ImageFormat::Jpeg)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "format", .. }));
    }

    #[test]
    fn save_without_canvas_fails() {
        let mut surface = SvgSurface::new();
        assert!(surface.save(Path::new("out.svg"), ImageFormat::Svg).is_err());
    }
}
