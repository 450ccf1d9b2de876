//! Composite-flattened, pixel-space glyph outlines — the "ready to
//! rasterize" form described by [`crate::Font::glyph_contours`].
//!
//! [`crate::glyf`] already resolves composite references and applies each
//! component's transform while walking a glyph, emitting its segments
//! straight into an [`crate::OutlineBuilder`]. This module sits one layer
//! above that: it plugs in a builder that records every emitted point (with
//! its on/off-curve flag preserved), then translates the recorded outline so
//! its minimum corner sits at the origin and scales it from em-units to
//! pixels. The result is handed to an external rasterizer, which this crate
//! does not implement.

use std::vec::Vec;

use crate::error::Result;
use crate::glyf;
use crate::loca::Loca;
use crate::maxp::Maxp;
use crate::{OutlineBuilder, Rect};

/// A point size and display resolution, reduced to the single linear factor
/// a glyph's em-unit coordinates are multiplied by.
///
/// `scale = (point_size * ppi) / (72 * units_per_em)` — 72 being the number
/// of points per inch, a typographic constant independent of the font.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphScale {
    /// The requested type size, in points.
    pub point_size: f32,
    /// The output device's resolution, in pixels per inch.
    pub ppi: f32,
}

impl GlyphScale {
    /// Builds a scale from a point size and a pixels-per-inch resolution.
    #[inline]
    pub fn new(point_size: f32, ppi: f32) -> Self {
        GlyphScale { point_size, ppi }
    }

    fn factor(self, units_per_em: u16) -> f32 {
        (self.point_size * self.ppi) / (72.0 * units_per_em as f32)
    }
}

/// One point of a scaled, flattened contour.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReadyPoint {
    /// Horizontal pixel coordinate, non-negative.
    pub x: f32,
    /// Vertical pixel coordinate, non-negative.
    pub y: f32,
    /// Whether this point lies on the outline (`false` marks a quadratic
    /// Bézier control point).
    pub on_curve: bool,
}

/// One closed contour of a scaled glyph outline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReadyContour {
    /// The contour's points, in winding order.
    pub points: Vec<ReadyPoint>,
}

/// A fully flattened and scaled glyph outline, ready for an external
/// rasterizer to walk.
///
/// Coordinates are translated so the outline's minimum corner sits at
/// `(0, 0)` and then scaled to pixel units; [`ReadyGlyph::bbox`] is the
/// resulting tight bounding box. A glyph with no outline (e.g. `space`)
/// decodes to the default value: no contours, a zero-area box at the
/// origin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReadyGlyph {
    /// The glyph's contours, already composite-flattened and scaled.
    pub contours: Vec<ReadyContour>,
    /// The tight bounding box of every point in `contours`, in pixels, with
    /// `x_min == y_min == 0.0` by construction.
    pub bbox: Rect,
}

/// An [`OutlineBuilder`] that records every emitted vertex instead of
/// forwarding it anywhere, so the point stream can be translated and scaled
/// before a caller ever sees it.
struct PointCollector {
    contours: Vec<ReadyContour>,
    current: Vec<ReadyPoint>,
}

impl PointCollector {
    fn new() -> Self {
        PointCollector { contours: Vec::new(), current: Vec::new() }
    }

    fn finish_contour(&mut self) {
        if !self.current.is_empty() {
            self.contours.push(ReadyContour { points: core::mem::take(&mut self.current) });
        }
    }
}

impl OutlineBuilder for PointCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        self.finish_contour();
        self.current.push(ReadyPoint { x, y, on_curve: true });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.current.push(ReadyPoint { x, y, on_curve: true });
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.current.push(ReadyPoint { x: x1, y: y1, on_curve: false });
        self.current.push(ReadyPoint { x, y, on_curve: true });
    }

    fn curve_to(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32, x: f32, y: f32) {
        // `glyf` never emits cubic segments; kept only so this builder
        // satisfies the trait for outline sources that would.
        self.current.push(ReadyPoint { x, y, on_curve: true });
    }

    fn close(&mut self) {
        self.finish_contour();
    }
}

/// Decodes `glyph_data`, flattening composite references and scaling the
/// result by `scale`, into a [`ReadyGlyph`].
pub(crate) fn decode_scaled(
    glyph_data: &[u8],
    glyf_table: &[u8],
    loca: &Loca,
    maxp: &Maxp,
    units_per_em: u16,
    scale: GlyphScale,
) -> Result<ReadyGlyph> {
    let mut collector = PointCollector::new();
    glyf::outline(glyph_data, glyf_table, loca, maxp, &mut collector)?;
    collector.finish_contour();

    if collector.contours.is_empty() {
        return Ok(ReadyGlyph::default());
    }

    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    for contour in &collector.contours {
        for p in &contour.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
        }
    }

    let factor = scale.factor(units_per_em);
    let mut max_x = 0.0f32;
    let mut max_y = 0.0f32;
    for contour in collector.contours.iter_mut() {
        for p in contour.points.iter_mut() {
            p.x = (p.x - min_x) * factor;
            p.y = (p.y - min_y) * factor;
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
    }

    Ok(ReadyGlyph {
        contours: collector.contours,
        bbox: Rect { x_min: 0.0, y_min: 0.0, x_max: max_x, y_max: max_y },
    })
}

/// Replays a [`ReadyGlyph`] back through an [`OutlineBuilder`], reconstructing
/// the move/line/quad/close call sequence from its flattened point list.
///
/// Every contour's first point is on-curve (guaranteed by
/// [`PointCollector::move_to`]); after that, an on-curve point is a line and
/// an off-curve point is always immediately followed by the on-curve point
/// that ends its quadratic segment.
pub(crate) fn replay(ready: &ReadyGlyph, builder: &mut dyn OutlineBuilder) {
    for contour in &ready.contours {
        let mut points = contour.points.iter();
        let first = match points.next() {
            Some(p) => p,
            None => continue,
        };
        builder.move_to(first.x, first.y);

        while let Some(p) = points.next() {
            if p.on_curve {
                builder.line_to(p.x, p.y);
            } else {
                // An off-curve point is always paired with the following
                // on-curve point; `decode_scaled`'s collector never emits an
                // unpaired one.
                if let Some(end) = points.next() {
                    builder.quad_to(p.x, p.y, end.x, end.y);
                }
            }
        }

        builder.close();
    }
}
