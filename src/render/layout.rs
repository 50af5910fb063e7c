//! Dendrogram layout: tree → pixel coordinates → draw commands.
//!
//! The root sits at the left edge, leaves at the right, one row per leaf:
//!
//! ```text
//!               ┌──── alpha
//!          ┌────┤
//!   ───────┤    └──── beta
//!          └───────── gamma
//! ```
//!
//! Canvas height is `height(root) * row_height`. Each internal node draws a
//! vertical connector at its `x` between the vertical midpoints of its two
//! children, then a horizontal connector out to each child.
//!
//! With [`BranchLength::Scaled`] the horizontal step to a node's children is
//! `max(merge_distance * scale, min_step)`. `scale` starts at
//! `(width - label_margin) / depth(root)` and shrinks when the `min_step`
//! floors would push a path further, so no leaf lands past
//! `width - label_margin + origin_x`. [`BranchLength::Fixed`] uses the same
//! step at every level and ignores distances.

use std::path::Path;

use tracing::{debug, info};

use super::surface::{DrawCommand, DrawingSurface, ImageFormat, Point, Rgb};
use crate::error::{Error, Result};
use crate::hierarchy::{branch_extent, ClusterNode, TreeGeometry};

/// Default canvas width in pixels.
pub const DEFAULT_WIDTH: u32 = 1200;
/// Default pixels per leaf row.
pub const DEFAULT_ROW_HEIGHT: u32 = 20;
/// Default space kept free on the right for labels.
pub const DEFAULT_LABEL_MARGIN: u32 = 150;
/// Fixed horizontal step per tree level.
pub const DEFAULT_FIXED_STEP: f64 = 11.0;

/// How far each branch reaches horizontally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BranchLength {
    /// Proportional to the merge distance (at least `min_step` pixels).
    /// Falls back to `fixed_step` when the tree has zero depth.
    Scaled,
    /// The same number of pixels at every level.
    Fixed(f64),
}

/// Canvas size, spacing, and colors.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Pixels per leaf row.
    pub row_height: u32,
    /// Pixels reserved right of the deepest leaf for labels.
    pub label_margin: u32,
    /// `x` of the root's vertical connector.
    pub origin_x: f64,
    /// Label anchor relative to a leaf's `(x, y)`.
    pub label_offset: (f64, f64),
    /// Branch step policy.
    pub branch: BranchLength,
    /// Step used by `Scaled` when `depth(root) == 0`. Narrowed when the
    /// longest path would not fit.
    pub fixed_step: f64,
    /// Shortest `Scaled` step, so zero-distance merges stay visible. Narrowed
    /// when the longest path would not fit.
    pub min_step: f64,
    /// Canvas background.
    pub background: Rgb,
    /// Connector color.
    pub line_color: Rgb,
    /// Label color.
    pub text_color: Rgb,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            row_height: DEFAULT_ROW_HEIGHT,
            label_margin: DEFAULT_LABEL_MARGIN,
            origin_x: 10.0,
            label_offset: (5.0, -7.0),
            branch: BranchLength::Scaled,
            fixed_step: DEFAULT_FIXED_STEP,
            min_step: 1.0,
            background: Rgb::WHITE,
            line_color: Rgb::RED,
            text_color: Rgb::BLACK,
        }
    }
}

impl RenderConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set canvas width.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set pixels per leaf row.
    pub fn with_row_height(mut self, row_height: u32) -> Self {
        self.row_height = row_height;
        self
    }

    /// Set the label margin.
    pub fn with_label_margin(mut self, margin: u32) -> Self {
        self.label_margin = margin;
        self
    }

    /// Set the branch step policy.
    pub fn with_branch_length(mut self, branch: BranchLength) -> Self {
        self.branch = branch;
        self
    }

    /// Set connector and label colors.
    pub fn with_colors(mut self, line: Rgb, text: Rgb) -> Self {
        self.line_color = line;
        self.text_color = text;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    fn check(&self) -> Result<()> {
        if self.width <= self.label_margin {
            return Err(Error::InvalidParameter {
                name: "width",
                message: "must exceed label_margin",
            });
        }
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.fixed_step) || !positive(self.min_step) {
            return Err(Error::InvalidParameter {
                name: "fixed_step",
                message: "steps must be positive and finite",
            });
        }
        if let BranchLength::Fixed(step) = self.branch {
            if !positive(step) {
                return Err(Error::InvalidParameter {
                    name: "branch",
                    message: "fixed branch length must be positive and finite",
                });
            }
        }
        Ok(())
    }
}

/// A fully computed drawing, ready to replay onto any [`DrawingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// Pixels per unit of merge distance; `None` for zero-depth trees.
    pub scale: Option<f64>,
    /// Canvas background.
    pub background: Rgb,
    /// Draw commands in issue order.
    pub commands: Vec<DrawCommand>,
}

impl Layout {
    /// Create the canvas and issue every command. Does not save.
    pub fn replay<S: DrawingSurface + ?Sized>(&self, surface: &mut S) -> Result<()> {
        surface.create_canvas(self.width, self.height, self.background)?;
        for command in &self.commands {
            match command {
                DrawCommand::Line { from, to, color } => surface.draw_line(*from, *to, *color)?,
                DrawCommand::Text { at, text, color } => surface.draw_text(*at, text, *color)?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct BranchFit {
    scale: Option<f64>,
    floor: f64,
    fallback: f64,
}

/// Draws a [`ClusterNode`] tree as a labelled dendrogram.
///
/// ```rust
/// use clade::render::{DendrogramRenderer, ImageFormat, RecordingSurface};
/// use clade::HierarchicalClustering;
/// use std::path::Path;
///
/// let data = vec![vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.1], vec![3.0, 1.0, 0.0]];
/// let root = HierarchicalClustering::new().fit(&data).unwrap();
///
/// let mut surface = RecordingSurface::new();
/// DendrogramRenderer::new()
///     .render(&root, &["a", "b", "c"], &mut surface, Path::new("tree.svg"), ImageFormat::Svg)
///     .unwrap();
/// assert_eq!(surface.canvas.map(|(_, h, _)| h), Some(60));
/// assert_eq!(surface.texts().count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DendrogramRenderer {
    config: RenderConfig,
}

impl DendrogramRenderer {
    /// Renderer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer with a custom configuration.
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Pixels per unit of merge distance for a tree of depth `root_depth`.
    ///
    /// `None` when the depth is zero (or not a positive finite number): such a
    /// tree has no horizontal extent to distribute.
    pub fn horizontal_scale(&self, root_depth: f64) -> Option<f64> {
        if !(root_depth.is_finite() && root_depth > 0.0) {
            return None;
        }
        let usable = f64::from(self.config.width) - f64::from(self.config.label_margin);
        Some(usable / root_depth)
    }

    /// Scale and floors for `Scaled` branches, fitted so the widest
    /// root-to-leaf path spans at most `width - label_margin` pixels.
    fn fit_branches(&self, root: &ClusterNode, root_depth: f64) -> BranchFit {
        let cfg = &self.config;
        let usable = f64::from(cfg.width) - f64::from(cfg.label_margin);
        let levels = branch_extent(root, |_| 1.0);
        let share = if levels > 0.0 { usable / levels } else { f64::INFINITY };
        let floor = cfg.min_step.min(share);

        let Some(raw) = self.horizontal_scale(root_depth) else {
            return BranchFit {
                scale: None,
                floor,
                fallback: cfg.fixed_step.min(share),
            };
        };

        let extent = |scale: f64| branch_extent(root, |d| (d * scale).max(floor));
        let scale = if extent(raw) <= usable * (1.0 + 1e-9) {
            raw
        } else {
            // extent is monotone in scale and extent(0) = levels * floor <= usable.
            let (mut lo, mut hi) = (0.0, raw);
            for _ in 0..64 {
                let mid = 0.5 * (lo + hi);
                if extent(mid) <= usable {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
            lo
        };

        BranchFit {
            scale: Some(scale),
            floor,
            fallback: cfg.fixed_step.min(share),
        }
    }

    fn step(&self, merge_distance: f64, fit: &BranchFit) -> f64 {
        match (self.config.branch, fit.scale) {
            (BranchLength::Fixed(step), _) => step,
            (BranchLength::Scaled, Some(scale)) => (merge_distance * scale).max(fit.floor),
            (BranchLength::Scaled, None) => fit.fallback,
        }
    }

    /// Compute the full drawing without touching a surface.
    ///
    /// Fails with [`Error::MissingLabel`] when a leaf has no entry in `labels`
    /// (indexed by row), and with [`Error::InvalidCanvas`] when the canvas
    /// would be empty or taller than `u32::MAX`.
    pub fn layout<L: AsRef<str>>(&self, root: &ClusterNode, labels: &[L]) -> Result<Layout> {
        let cfg = &self.config;
        let geometry = TreeGeometry::measure(root);
        let height = geometry.root_height() as u64 * u64::from(cfg.row_height);
        if cfg.width == 0 || height == 0 || height > u64::from(u32::MAX) {
            return Err(Error::InvalidCanvas {
                width: u64::from(cfg.width),
                height,
            });
        }
        cfg.check()?;

        let fit = match cfg.branch {
            BranchLength::Scaled => self.fit_branches(root, geometry.root_depth()),
            BranchLength::Fixed(_) => BranchFit {
                scale: self.horizontal_scale(geometry.root_depth()),
                floor: cfg.min_step,
                fallback: cfg.fixed_step,
            },
        };
        let row = f64::from(cfg.row_height);
        let mid = height as f64 / 2.0;
        let line = |from: Point, to: Point| DrawCommand::Line {
            from,
            to,
            color: cfg.line_color,
        };

        let mut commands = vec![line(Point::new(0.0, mid), Point::new(cfg.origin_x, mid))];
        let mut stack: Vec<(&ClusterNode, f64, f64)> = vec![(root, cfg.origin_x, mid)];

        while let Some((node, x, y)) = stack.pop() {
            match node.children() {
                Some((left, right)) => {
                    let h1 = geometry.height(left.id()) as f64 * row;
                    let h2 = geometry.height(right.id()) as f64 * row;
                    let top = y - (h1 + h2) / 2.0;
                    let bottom = y + (h1 + h2) / 2.0;
                    let y_left = top + h1 / 2.0;
                    let y_right = bottom - h2 / 2.0;
                    let x_child = x + self.step(node.merge_distance(), &fit);

                    commands.push(line(Point::new(x, y_left), Point::new(x, y_right)));
                    commands.push(line(Point::new(x, y_left), Point::new(x_child, y_left)));
                    commands.push(line(Point::new(x, y_right), Point::new(x_child, y_right)));

                    stack.push((right, x_child, y_right));
                    stack.push((left, x_child, y_left));
                }
                None => {
                    let label = node
                        .leaf_index()
                        .and_then(|i| labels.get(i))
                        .ok_or(Error::MissingLabel { id: node.id() })?;
                    commands.push(DrawCommand::Text {
                        at: Point::new(x + cfg.label_offset.0, y + cfg.label_offset.1),
                        text: label.as_ref().to_owned(),
                        color: cfg.text_color,
                    });
                }
            }
        }

        Ok(Layout {
            width: cfg.width,
            height: height as u32,
            scale: fit.scale,
            background: cfg.background,
            commands,
        })
    }

    /// Lay out `root`, draw it onto `surface`, and save once to `path`.
    ///
    /// All validation happens during layout, so a failed call never touches
    /// the surface.
    pub fn render<S, L>(
        &self,
        root: &ClusterNode,
        labels: &[L],
        surface: &mut S,
        path: &Path,
        format: ImageFormat,
    ) -> Result<()>
    where
        S: DrawingSurface + ?Sized,
        L: AsRef<str>,
    {
        let layout = self.layout(root, labels)?;
        debug!(
            width = layout.width,
            height = layout.height,
            scale = ?layout.scale,
            commands = layout.commands.len(),
            "dendrogram layout"
        );
        layout.replay(surface)?;
        surface.save(path, format)?;
        info!(path = %path.display(), ?format, "dendrogram saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSurface;

    fn pair(distance: f64) -> ClusterNode {
        ClusterNode::merge(
            -1,
            ClusterNode::leaf(0, vec![1.0]),
            ClusterNode::leaf(1, vec![2.0]),
            distance,
        )
    }

    fn first_line(layout: &Layout) -> (Point, Point) {
        match &layout.commands[0] {
            DrawCommand::Line { from, to, .. } => (*from, *to),
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn scale_for_two_leaf_tree() {
        let r = DendrogramRenderer::new();
        assert_eq!(r.horizontal_scale(1.0), Some(1050.0));
        assert_eq!(r.horizontal_scale(2.0), Some(525.0));
        assert_eq!(r.horizontal_scale(0.5), Some(2100.0));
        assert_eq!(r.horizontal_scale(0.0), None);
        assert_eq!(r.horizontal_scale(f64::NAN), None);

        let layout = r.layout(&pair(1.0), &["a", "b"]).unwrap();
        assert_eq!(layout.scale, Some(1050.0));
    }

    #[test]
    fn two_leaf_layout_coordinates() {
        let layout = DendrogramRenderer::new()
            .layout(&pair(1.0), &["a", "b"])
            .unwrap();
        assert_eq!((layout.width, layout.height), (1200, 40));
        assert_eq!(
            first_line(&layout),
            (Point::new(0.0, 20.0), Point::new(10.0, 20.0))
        );

        let expected = vec![
            DrawCommand::Line {
                from: Point::new(0.0, 20.0),
                to: Point::new(10.0, 20.0),
                color: Rgb::RED,
            },
            DrawCommand::Line {
                from: Point::new(10.0, 10.0),
                to: Point::new(10.0, 30.0),
                color: Rgb::RED,
            },
            DrawCommand::Line {
                from: Point::new(10.0, 10.0),
                to: Point::new(1060.0, 10.0),
                color: Rgb::RED,
            },
            DrawCommand::Line {
                from: Point::new(10.0, 30.0),
                to: Point::new(1060.0, 30.0),
                color: Rgb::RED,
            },
            DrawCommand::Text {
                at: Point::new(1065.0, 3.0),
                text: "a".into(),
                color: Rgb::BLACK,
            },
            DrawCommand::Text {
                at: Point::new(1065.0, 23.0),
                text: "b".into(),
                color: Rgb::BLACK,
            },
        ];
        assert_eq!(layout.commands, expected);
    }

    #[test]
    fn fixed_branches_ignore_distance() {
        let renderer = DendrogramRenderer::with_config(
            RenderConfig::new().with_branch_length(BranchLength::Fixed(11.0)),
        );
        let layout = renderer.layout(&pair(1.0), &["a", "b"]).unwrap();
        let texts: Vec<f64> = layout
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { at, .. } => Some(at.x),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec![26.0, 26.0]);
    }

    #[test]
    fn zero_depth_tree_uses_fixed_step() {
        let layout = DendrogramRenderer::new()
            .layout(&pair(0.0), &["a", "b"])
            .unwrap();
        assert_eq!(layout.scale, None);
        assert!(layout.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Line { from, to, .. } if from.x == 10.0 && to.x == 21.0
        )));
    }

    #[test]
    fn single_leaf_draws_stub_and_label() {
        let root = ClusterNode::leaf(0, vec![2.0, 3.0]);
        let layout = DendrogramRenderer::new().layout(&root, &["only"]).unwrap();
        assert_eq!(layout.height, 20);
        assert_eq!(layout.scale, None);
        assert_eq!(layout.commands.len(), 2);
        assert_eq!(
            layout.commands[1],
            DrawCommand::Text {
                at: Point::new(15.0, 3.0),
                text: "only".into(),
                color: Rgb::BLACK,
            }
        );
    }

    #[test]
    fn scaled_leaves_never_pass_the_label_margin() {
        let ab = ClusterNode::merge(
            -1,
            ClusterNode::leaf(0, vec![0.0]),
            ClusterNode::leaf(1, vec![0.0]),
            0.3,
        );
        let root = ClusterNode::merge(-2, ab, ClusterNode::leaf(2, vec![1.0]), 0.7);
        let layout = DendrogramRenderer::new()
            .layout(&root, &["a", "b", "c"])
            .unwrap();
        let max_x = layout
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { to, .. } => Some(to.x),
                _ => None,
            })
            .fold(0.0, f64::max);
        assert!((max_x - 1060.0).abs() < 1e-9, "got {max_x}");
    }

    // Root at `root_distance` over leaf 0 and a chain of `zeros` zero-distance merges.
    fn zero_chain(zeros: usize, root_distance: f64) -> (ClusterNode, Vec<String>) {
        let mut chain = ClusterNode::leaf(1, vec![0.0]);
        for i in 1..=zeros {
            chain = ClusterNode::merge(-(i as i64), chain, ClusterNode::leaf(i + 1, vec![0.0]), 0.0);
        }
        let root = ClusterNode::merge(
            -(zeros as i64 + 1),
            ClusterNode::leaf(0, vec![1.0]),
            chain,
            root_distance,
        );
        let labels = (0..zeros + 2).map(|i| format!("row {i}")).collect();
        (root, labels)
    }

    fn extents(layout: &Layout) -> (f64, f64) {
        layout
            .commands
            .iter()
            .fold((0.0, 0.0), |(line_x, text_x), c| match c {
                DrawCommand::Line { to, .. } => (f64::max(line_x, to.x), text_x),
                DrawCommand::Text { at, .. } => (line_x, f64::max(text_x, at.x)),
            })
    }

    #[test]
    fn zero_distance_chain_fits_the_canvas() {
        let (root, labels) = zero_chain(299, 1.0);
        let layout = DendrogramRenderer::new().layout(&root, &labels).unwrap();

        // 300 levels: the root step plus 299 one-pixel floors share 1050 px.
        let scale = layout.scale.unwrap();
        assert!((scale - 751.0).abs() < 1e-6, "got {scale}");

        let (line_x, text_x) = extents(&layout);
        assert!(line_x <= 1060.0 + 1e-6, "line reaches {line_x}");
        assert!(text_x < f64::from(layout.width), "label at {text_x}");
        assert!((text_x - 1065.0).abs() < 1e-6);
    }

    #[test]
    fn floors_narrow_when_levels_outnumber_pixels() {
        let (root, labels) = zero_chain(1_999, 1.0);
        let layout = DendrogramRenderer::new().layout(&root, &labels).unwrap();
        let (line_x, text_x) = extents(&layout);
        assert!(line_x <= 1060.0 + 1e-6, "line reaches {line_x}");
        assert!(text_x < 1200.0);
        assert!(layout.scale.unwrap() > 0.0);
    }

    #[test]
    fn deep_zero_depth_tree_narrows_fixed_step() {
        let (root, labels) = zero_chain(199, 0.0);
        let layout = DendrogramRenderer::new().layout(&root, &labels).unwrap();
        assert_eq!(layout.scale, None);
        // 200 levels at min(11, 1050 / 200) px each.
        let (line_x, _) = extents(&layout);
        assert!((line_x - 1060.0).abs() < 1e-6, "line reaches {line_x}");
    }

    #[test]
    fn missing_label_fails_before_drawing() {
        let mut surface = RecordingSurface::new();
        let err = DendrogramRenderer::new()
            .render(&pair(1.0), &["a"], &mut surface, Path::new("x.svg"), ImageFormat::Svg)
            .unwrap_err();
        assert_eq!(err, Error::MissingLabel { id: 1 });
        assert_eq!(surface, RecordingSurface::new());
    }

    #[test]
    fn bad_canvas_sizes_are_rejected() {
        let zero_width = DendrogramRenderer::with_config(RenderConfig::new().with_width(0));
        assert!(matches!(
            zero_width.layout(&pair(1.0), &["a", "b"]),
            Err(Error::InvalidCanvas { width: 0, .. })
        ));

        let zero_rows = DendrogramRenderer::with_config(RenderConfig::new().with_row_height(0));
        assert!(matches!(
            zero_rows.layout(&pair(1.0), &["a", "b"]),
            Err(Error::InvalidCanvas { height: 0, .. })
        ));

        let narrow = DendrogramRenderer::with_config(RenderConfig::new().with_width(100));
        assert!(matches!(
            narrow.layout(&pair(1.0), &["a", "b"]),
            Err(Error::InvalidParameter { name: "width", .. })
        ));
    }

    #[test]
    fn render_replays_then_saves_once() {
        let mut surface = RecordingSurface::new();
        DendrogramRenderer::new()
            .render(&pair(1.0), &["a", "b"], &mut surface, Path::new("out.svg"), ImageFormat::Svg)
            .unwrap();
        assert_eq!(surface.canvas, Some((1200, 40, Rgb::WHITE)));
        assert_eq!(surface.lines().count(), 4);
        assert_eq!(surface.texts().map(|(_, t)| t).collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(surface.saved.len(), 1);
    }
}
