// This module is a heavily modified version of https://github.com/raphlinus/font-rs

use crate::error::{Result, TableResult};
use crate::loca::Loca;
use crate::maxp::Maxp;
use crate::parser::{F2Dot14, LazyArray, Stream};
use crate::OutlineBuilder;

/// A wrapper that transforms segments before passing them to `OutlineBuilder`.
trait OutlineBuilderInner {
    fn push_move_to(&mut self, x: f32, y: f32);
    fn push_line_to(&mut self, x: f32, y: f32);
    fn push_quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32);
    fn push_close(&mut self);
}

struct Builder<'a, T: OutlineBuilder> {
    builder: &'a mut T,
    transform: Transform,
    is_default_ts: bool,
}

impl<'a, T: OutlineBuilder> OutlineBuilderInner for Builder<'a, T> {
    fn push_move_to(&mut self, mut x: f32, mut y: f32) {
        if !self.is_default_ts {
            self.transform.apply_to(&mut x, &mut y);
        }
        self.builder.move_to(x, y);
    }

    fn push_line_to(&mut self, mut x: f32, mut y: f32) {
        if !self.is_default_ts {
            self.transform.apply_to(&mut x, &mut y);
        }
        self.builder.line_to(x, y);
    }

    fn push_quad_to(&mut self, mut x1: f32, mut y1: f32, mut x: f32, mut y: f32) {
        if !self.is_default_ts {
            self.transform.apply_to(&mut x1, &mut y1);
            self.transform.apply_to(&mut x, &mut y);
        }
        self.builder.quad_to(x1, y1, x, y);
    }

    fn push_close(&mut self) {
        self.builder.close();
    }
}

// https://docs.microsoft.com/en-us/typography/opentype/spec/glyf#simple-glyph-description
#[derive(Clone, Copy)]
struct SimpleGlyphFlags(u8);

impl SimpleGlyphFlags {
    const ON_CURVE_POINT: Self = Self(1 << 0);
    const X_SHORT_VECTOR: Self = Self(1 << 1);
    const Y_SHORT_VECTOR: Self = Self(1 << 2);
    const REPEAT_FLAG: Self = Self(1 << 3);
    const X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR: Self = Self(1 << 4);
    const Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR: Self = Self(1 << 5);

    #[inline]
    fn empty() -> Self {
        Self(0)
    }
    #[inline]
    fn all() -> Self {
        Self(63)
    }
    #[inline]
    fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::all().0)
    }
    #[inline]
    fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

// https://docs.microsoft.com/en-us/typography/opentype/spec/glyf#composite-glyph-description
#[derive(Clone, Copy)]
struct CompositeGlyphFlags(u16);

impl CompositeGlyphFlags {
    const ARG_1_AND_2_ARE_WORDS: Self = Self(1 << 0);
    const ARGS_ARE_XY_VALUES: Self = Self(1 << 1);
    const WE_HAVE_A_SCALE: Self = Self(1 << 3);
    const MORE_COMPONENTS: Self = Self(1 << 5);
    const WE_HAVE_AN_X_AND_Y_SCALE: Self = Self(1 << 6);
    const WE_HAVE_A_TWO_BY_TWO: Self = Self(1 << 7);

    #[inline]
    fn all() -> Self {
        Self(235)
    }
    #[inline]
    fn from_bits_truncate(bits: u16) -> Self {
        Self(bits & Self::all().0)
    }
    #[inline]
    fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

#[inline]
fn f32_bound(min: f32, val: f32, max: f32) -> f32 {
    if val > max {
        max
    } else if val < min {
        min
    } else {
        val
    }
}

/// Used when `maxp.max_component_depth` is `0` (version 0.5 maxp tables
/// don't carry this field at all).
const DEFAULT_MAX_COMPONENT_DEPTH: u8 = 32;

/// Decodes the outline of one glyph's `glyf` data into `builder`.
///
/// `glyph_data` is the byte range `loca` reported for this glyph; an empty
/// range must be handled by the caller (it means the glyph has no outline,
/// which is normal, not an error).
pub(crate) fn outline<T: OutlineBuilder>(
    glyph_data: &[u8],
    glyf_table: &[u8],
    loca: &Loca,
    maxp: &Maxp,
    builder: &mut T,
) -> Result<()> {
    let max_depth = if maxp.max_component_depth == 0 {
        DEFAULT_MAX_COMPONENT_DEPTH
    } else {
        maxp.max_component_depth.min(255) as u8
    };

    let mut b = Builder {
        builder,
        transform: Transform::default(),
        is_default_ts: true,
    };
    outline_impl(glyph_data, glyf_table, loca, maxp, 0, max_depth, &mut b)
}

fn outline_impl<T: OutlineBuilder>(
    data: &[u8],
    glyf_table: &[u8],
    loca: &Loca,
    maxp: &Maxp,
    depth: u8,
    max_depth: u8,
    builder: &mut Builder<T>,
) -> Result<()> {
    if depth >= max_depth {
        return Err(TableResult::GlyfCompositeDepthExceeded);
    }

    let mut s = Stream::new(data);
    let number_of_contours: i16 = s.read().ok_or(TableResult::InvalidGlyfNumberOfContours)?;
    s.advance(8); // xMin, yMin, xMax, yMax

    if number_of_contours > 0 {
        let tail = s.tail().ok_or(TableResult::InvalidGlyfSimpleGlyphData)?;
        parse_simple_outline(tail, number_of_contours as u16, maxp, builder)
    } else if number_of_contours < 0 {
        let tail = s.tail().ok_or(TableResult::InvalidGlyfCompositeGlyphData)?;
        parse_composite_outline(tail, glyf_table, loca, maxp, depth, max_depth, builder)
    } else {
        Ok(())
    }
}

fn parse_simple_outline<T: OutlineBuilder>(
    glyph_data: &[u8],
    number_of_contours: u16,
    maxp: &Maxp,
    builder: &mut Builder<T>,
) -> Result<()> {
    let mut s = Stream::new(glyph_data);
    let endpoints: LazyArray<u16> = s
        .read_array(number_of_contours as u32)
        .ok_or(TableResult::InvalidGlyfSimpleGlyphData)?;

    let last_point = endpoints.last().ok_or(TableResult::InvalidGlyfSimpleGlyphData)?;
    if last_point == u16::MAX {
        return Ok(());
    }
    let points_total = last_point + 1;
    if maxp.max_points != 0 && points_total > maxp.max_points {
        return Err(TableResult::InvalidGlyfPointCount);
    }

    let instructions_len: u16 = s.read().ok_or(TableResult::InvalidGlyfSimpleGlyphData)?;
    s.advance(instructions_len as usize);

    let flags_offset = s.offset();
    let x_coords_len = resolve_x_coords_len(&mut s, points_total)?;
    let x_coords_offset = s.offset();
    let y_coords_offset = x_coords_offset + x_coords_len as usize;

    let flags_data = glyph_data
        .get(flags_offset..x_coords_offset)
        .ok_or(TableResult::InvalidGlyfSimpleGlyphData)?;
    let x_data = glyph_data
        .get(x_coords_offset..y_coords_offset)
        .ok_or(TableResult::InvalidGlyfSimpleGlyphData)?;
    let y_data = glyph_data
        .get(y_coords_offset..)
        .ok_or(TableResult::InvalidGlyfSimpleGlyphData)?;

    let mut points = GlyphPoints {
        flags: Stream::new(flags_data),
        x_coords: Stream::new(x_data),
        y_coords: Stream::new(y_data),
        points_left: points_total,
        flag_repeats: 0,
        last_flags: SimpleGlyphFlags::empty(),
        x: 0,
        y: 0,
    };

    let mut total = 0u16;
    let mut last = 0u16;
    for n in endpoints {
        if n < last {
            break;
        }
        last = n;
        if n == u16::MAX {
            break;
        }

        let n = n + 1 - total;
        if n >= 2 {
            parse_contour(points.by_ref().take(n as usize), builder)?;
        }
        total += n;
    }

    Ok(())
}

/// Resolves the X coordinates array length. Depends on every flag byte
/// since each flag's repeat count and short-vector bit change how many
/// bytes the X array consumes, so there is no way to skip ahead without
/// decoding the flag stream first.
fn resolve_x_coords_len(s: &mut Stream, points_total: u16) -> Result<u16> {
    type Flags = SimpleGlyphFlags;

    let mut flags_left = points_total;
    let mut x_coords_len = 0u16;
    while flags_left > 0 {
        let flags = Flags::from_bits_truncate(s.read().ok_or(TableResult::InvalidGlyfSimpleGlyphData)?);

        let repeats = if flags.contains(Flags::REPEAT_FLAG) {
            s.read::<u8>().ok_or(TableResult::InvalidGlyfSimpleGlyphData)? as u16 + 1
        } else {
            1
        };

        if flags.contains(Flags::X_SHORT_VECTOR) {
            x_coords_len += repeats;
        } else if !flags.contains(Flags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR) {
            x_coords_len += repeats * 2;
        }

        flags_left = flags_left.saturating_sub(repeats);
    }

    Ok(x_coords_len)
}

fn parse_contour<T: OutlineBuilder>(
    points: core::iter::Take<&mut GlyphPoints>,
    builder: &mut Builder<T>,
) -> Result<()> {
    let mut first_oncurve: Option<Point> = None;
    let mut first_offcurve: Option<Point> = None;
    let mut last_offcurve: Option<Point> = None;

    for point in points {
        let point = point?;
        let p = Point { x: point.x as f32, y: point.y as f32 };
        if first_oncurve.is_none() {
            if point.on_curve_point {
                first_oncurve = Some(p);
                builder.push_move_to(p.x, p.y);
            } else {
                match first_offcurve {
                    Some(offcurve) => {
                        let mid = offcurve.lerp(p, 0.5);
                        first_oncurve = Some(mid);
                        last_offcurve = Some(p);
                        builder.push_move_to(mid.x, mid.y);
                    }
                    None => {
                        first_offcurve = Some(p);
                    }
                }
            }
        } else {
            match (last_offcurve, point.on_curve_point) {
                (Some(offcurve), true) => {
                    last_offcurve = None;
                    builder.push_quad_to(offcurve.x, offcurve.y, p.x, p.y);
                }
                (Some(offcurve), false) => {
                    last_offcurve = Some(p);
                    let mid = offcurve.lerp(p, 0.5);
                    builder.push_quad_to(offcurve.x, offcurve.y, mid.x, mid.y);
                }
                (None, true) => {
                    builder.push_line_to(p.x, p.y);
                }
                (None, false) => {
                    last_offcurve = Some(p);
                }
            }
        }
    }

    loop {
        match (first_offcurve, last_offcurve) {
            (Some(offcurve1), Some(offcurve2)) => {
                last_offcurve = None;
                let mid = offcurve2.lerp(offcurve1, 0.5);
                builder.push_quad_to(offcurve2.x, offcurve2.y, mid.x, mid.y);
            }
            (Some(offcurve1), None) => {
                if let Some(p) = first_oncurve {
                    builder.push_quad_to(offcurve1.x, offcurve1.y, p.x, p.y);
                }
                break;
            }
            (None, Some(offcurve2)) => {
                if let Some(p) = first_oncurve {
                    builder.push_quad_to(offcurve2.x, offcurve2.y, p.x, p.y);
                }
                break;
            }
            (None, None) => {
                if let Some(p) = first_oncurve {
                    builder.push_line_to(p.x, p.y);
                }
                break;
            }
        }
    }

    builder.push_close();
    Ok(())
}

fn parse_composite_outline<T: OutlineBuilder>(
    glyph_data: &[u8],
    glyf_table: &[u8],
    loca: &Loca,
    maxp: &Maxp,
    depth: u8,
    max_depth: u8,
    builder: &mut Builder<T>,
) -> Result<()> {
    type Flags = CompositeGlyphFlags;

    let mut component_count = 0u16;
    let mut s = Stream::new(glyph_data);

    loop {
        component_count += 1;
        if maxp.max_component_elements != 0 && component_count > maxp.max_component_elements {
            return Err(TableResult::InvalidGlyfCompositeGlyphData);
        }

        let flags = Flags::from_bits_truncate(s.read().ok_or(TableResult::InvalidGlyfCompositeGlyphData)?);
        let glyph_id: u16 = s.read().ok_or(TableResult::InvalidGlyfCompositeGlyphData)?;
        if glyph_id as u32 >= maxp.num_glyphs as u32 {
            return Err(TableResult::InvalidGlyfCompositeGlyphData);
        }

        let mut ts = Transform::default();

        if flags.contains(Flags::ARGS_ARE_XY_VALUES) {
            if flags.contains(Flags::ARG_1_AND_2_ARE_WORDS) {
                ts.e = s.read::<i16>().ok_or(TableResult::InvalidGlyfCompositeGlyphData)? as f32;
                ts.f = s.read::<i16>().ok_or(TableResult::InvalidGlyfCompositeGlyphData)? as f32;
            } else {
                ts.e = s.read::<i8>().ok_or(TableResult::InvalidGlyfCompositeGlyphData)? as f32;
                ts.f = s.read::<i8>().ok_or(TableResult::InvalidGlyfCompositeGlyphData)? as f32;
            }
        } else {
            // Point-matching component: args name a point in the parent
            // outline and a point in this component to align, rather than
            // an (x, y) translation. Flattening doesn't retain per-point
            // parent coordinates to resolve this against, so reject it
            // instead of placing the component at a wrong, untranslated
            // origin.
            return Err(TableResult::GlyfUnsupportedMatchedPoints);
        }

        if flags.contains(Flags::WE_HAVE_A_TWO_BY_TWO) {
            ts.a = s.read::<F2Dot14>().ok_or(TableResult::InvalidGlyfCompositeGlyphData)?.0;
            ts.b = s.read::<F2Dot14>().ok_or(TableResult::InvalidGlyfCompositeGlyphData)?.0;
            ts.c = s.read::<F2Dot14>().ok_or(TableResult::InvalidGlyfCompositeGlyphData)?.0;
            ts.d = s.read::<F2Dot14>().ok_or(TableResult::InvalidGlyfCompositeGlyphData)?.0;
        } else if flags.contains(Flags::WE_HAVE_AN_X_AND_Y_SCALE) {
            ts.a = s.read::<F2Dot14>().ok_or(TableResult::InvalidGlyfCompositeGlyphData)?.0;
            ts.d = s.read::<F2Dot14>().ok_or(TableResult::InvalidGlyfCompositeGlyphData)?.0;
        } else if flags.contains(Flags::WE_HAVE_A_SCALE) {
            let scale = s.read::<F2Dot14>().ok_or(TableResult::InvalidGlyfCompositeGlyphData)?.0;
            ts.a = f32_bound(-2.0, scale, 2.0);
            ts.d = ts.a;
        }

        if let Some(range) = loca.glyph_range(glyph_id) {
            if let Some(component_data) = glyf_table.get(range) {
                let transform = Transform::combine(builder.transform, ts);
                let mut child = Builder {
                    builder: builder.builder,
                    transform,
                    is_default_ts: transform.is_default(),
                };
                outline_impl(component_data, glyf_table, loca, maxp, depth + 1, max_depth, &mut child)?;
            }
        }

        if !flags.contains(Flags::MORE_COMPONENTS) {
            break;
        }
    }

    Ok(())
}

#[derive(Clone, Copy)]
struct Transform {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Transform {
    fn combine(ts1: Self, ts2: Self) -> Self {
        Transform {
            a: ts1.a * ts2.a + ts1.c * ts2.b,
            b: ts1.b * ts2.a + ts1.d * ts2.b,
            c: ts1.a * ts2.c + ts1.c * ts2.d,
            d: ts1.b * ts2.c + ts1.d * ts2.d,
            e: ts1.a * ts2.e + ts1.c * ts2.f + ts1.e,
            f: ts1.b * ts2.e + ts1.d * ts2.f + ts1.f,
        }
    }

    fn apply_to(&self, x: &mut f32, y: &mut f32) {
        let tx = *x;
        let ty = *y;
        *x = self.a * tx + self.c * ty + self.e;
        *y = self.b * tx + self.d * ty + self.f;
    }

    fn is_default(&self) -> bool {
        self.a == 1.0 && self.b == 0.0 && self.c == 0.0 && self.d == 1.0 && self.e == 0.0 && self.f == 0.0
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Transform { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 }
    }
}

#[derive(Clone, Copy, Debug)]
struct GlyphPoint {
    x: i16,
    y: i16,
    on_curve_point: bool,
}

struct GlyphPoints<'a> {
    flags: Stream<'a>,
    x_coords: Stream<'a>,
    y_coords: Stream<'a>,
    points_left: u16,
    flag_repeats: u8,
    last_flags: SimpleGlyphFlags,
    x: i16,
    y: i16,
}

impl<'a> Iterator for GlyphPoints<'a> {
    type Item = Result<GlyphPoint>;

    fn next(&mut self) -> Option<Self::Item> {
        type Flags = SimpleGlyphFlags;

        if self.points_left == 0 {
            return None;
        }

        if self.flag_repeats == 0 {
            let flags = match self.flags.read::<u8>() {
                Some(f) => f,
                None => return Some(Err(TableResult::InvalidGlyfSimpleGlyphData)),
            };
            self.last_flags = Flags::from_bits_truncate(flags);
            if self.last_flags.contains(Flags::REPEAT_FLAG) {
                self.flag_repeats = match self.flags.read::<u8>() {
                    Some(r) => r,
                    None => return Some(Err(TableResult::InvalidGlyfSimpleGlyphData)),
                };
            }
        } else {
            self.flag_repeats -= 1;
        }

        let x = match get_glyph_coord(
            self.last_flags,
            Flags::X_SHORT_VECTOR,
            Flags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR,
            &mut self.x_coords,
        ) {
            Some(v) => v,
            None => return Some(Err(TableResult::InvalidGlyfSimpleGlyphData)),
        };
        self.x = self.x.wrapping_add(x);

        let y = match get_glyph_coord(
            self.last_flags,
            Flags::Y_SHORT_VECTOR,
            Flags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR,
            &mut self.y_coords,
        ) {
            Some(v) => v,
            None => return Some(Err(TableResult::InvalidGlyfSimpleGlyphData)),
        };
        self.y = self.y.wrapping_add(y);

        self.points_left -= 1;

        Some(Ok(GlyphPoint {
            x: self.x,
            y: self.y,
            on_curve_point: self.last_flags.contains(Flags::ON_CURVE_POINT),
        }))
    }
}

fn get_glyph_coord(
    flags: SimpleGlyphFlags,
    short_vector: SimpleGlyphFlags,
    is_same_or_positive_short_vector: SimpleGlyphFlags,
    coords: &mut Stream,
) -> Option<i16> {
    let flags = (
        flags.contains(short_vector),
        flags.contains(is_same_or_positive_short_vector),
    );

    Some(match flags {
        (true, true) => coords.read::<u8>()? as i16,
        (true, false) => -(coords.read::<u8>()? as i16),
        (false, true) => 0, // same as previous coordinate
        (false, false) => coords.read::<i16>()?,
    })
}

#[derive(Clone, Copy, Debug)]
struct Point {
    x: f32,
    y: f32,
}

impl Point {
    #[inline]
    fn lerp(&self, other: Point, t: f32) -> Point {
        Point {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::String;
    use std::vec::Vec;

    struct RecordingBuilder {
        ops: Vec<String>,
    }

    impl OutlineBuilder for RecordingBuilder {
        fn move_to(&mut self, x: f32, y: f32) {
            self.ops.push(format!("M {} {}", x, y));
        }
        fn line_to(&mut self, x: f32, y: f32) {
            self.ops.push(format!("L {} {}", x, y));
        }
        fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
            self.ops.push(format!("Q {} {} {} {}", x1, y1, x, y));
        }
        fn curve_to(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32, _x: f32, _y: f32) {}
        fn close(&mut self) {
            self.ops.push("Z".to_string());
        }
    }

    fn maxp() -> Maxp {
        Maxp {
            version_high: 0,
            version_low: 0x1000,
            num_glyphs: 4,
            max_points: 10,
            max_contours: 2,
            max_composite_points: 0,
            max_composite_contours: 0,
            max_zones: 1,
            max_twilight_points: 0,
            max_storage: 0,
            max_function_defs: 0,
            max_instruction_defs: 0,
            max_stack_elements: 0,
            max_size_of_instructions: 0,
            max_component_elements: 8,
            max_component_depth: 4,
        }
    }

    fn empty_loca() -> Loca<'static> {
        // All-zero offsets for maxp().num_glyphs + 1 entries; every glyph
        // resolves to an empty range, which is fine since these tests never
        // dereference components.
        Loca::parse(&[0u8; 10], &maxp(), crate::head::IndexToLocFormat::Short).unwrap()
    }

    #[test]
    fn decodes_a_minimal_triangle() {
        // Three on-curve points forming a triangle, each coordinate a short
        // positive delta: (0,0) -> (10,0) -> (10,10).
        let mut d = Vec::new();
        d.extend_from_slice(&1i16.to_be_bytes());
        d.extend_from_slice(&[0u8; 8]);
        d.extend_from_slice(&2u16.to_be_bytes()); // endPtsOfContours[0] = 2
        d.extend_from_slice(&0u16.to_be_bytes()); // instructionLength

        const ON_CURVE: u8 = 1 << 0;
        const X_SHORT: u8 = 1 << 1;
        const Y_SHORT: u8 = 1 << 2;
        const X_SAME_POS: u8 = 1 << 4;
        const Y_SAME_POS: u8 = 1 << 5;

        // All three points use short, non-negative deltas for both axes.
        let flags = ON_CURVE | X_SHORT | X_SAME_POS | Y_SHORT | Y_SAME_POS;
        d.push(flags);
        d.push(flags);
        d.push(flags);

        // x coords: point0 dx=0, point1 dx=10, point2 dx=0
        d.push(0);
        d.push(10);
        d.push(0);
        // y coords: point0 dy=0, point1 dy=0, point2 dy=10
        d.push(0);
        d.push(0);
        d.push(10);

        let mut builder = RecordingBuilder { ops: Vec::new() };
        outline(&d, &d, &empty_loca(), &maxp(), &mut builder).unwrap();

        assert_eq!(builder.ops.first(), Some(&"M 0 0".to_string()));
        assert_eq!(builder.ops.last(), Some(&"Z".to_string()));
        assert!(builder.ops.contains(&"L 10 0".to_string()));
    }

    #[test]
    fn empty_glyph_produces_no_segments() {
        let d = 0i16.to_be_bytes();
        let mut builder = RecordingBuilder { ops: Vec::new() };
        outline(&d, &d, &empty_loca(), &maxp(), &mut builder).unwrap();
        assert!(builder.ops.is_empty());
    }

    #[test]
    fn point_count_exceeding_max_points_is_rejected() {
        // Same triangle as decodes_a_minimal_triangle, but endPtsOfContours[0]
        // claims a point count past maxp.max_points.
        let mut d = Vec::new();
        d.extend_from_slice(&1i16.to_be_bytes());
        d.extend_from_slice(&[0u8; 8]);
        d.extend_from_slice(&2u16.to_be_bytes()); // endPtsOfContours[0] = 2 -> 3 points
        d.extend_from_slice(&0u16.to_be_bytes()); // instructionLength

        let mut maxp = maxp();
        maxp.max_points = 2; // fewer than the 3 points this glyph declares

        let mut builder = RecordingBuilder { ops: Vec::new() };
        let result = outline(&d, &d, &empty_loca(), &maxp, &mut builder);
        assert!(matches!(result, Err(TableResult::InvalidGlyfPointCount)));
    }

    #[test]
    fn matched_point_composite_args_are_rejected() {
        let mut d = Vec::new();
        d.extend_from_slice(&(-1i16).to_be_bytes()); // numberOfContours: composite
        d.extend_from_slice(&[0u8; 8]);
        // flags: ARG_1_AND_2_ARE_WORDS set, ARGS_ARE_XY_VALUES clear -> matched points
        let flags: u16 = 1 << 0;
        d.extend_from_slice(&flags.to_be_bytes());
        d.extend_from_slice(&0u16.to_be_bytes()); // glyphIndex
        d.extend_from_slice(&0u16.to_be_bytes()); // arg1 (parent point index)
        d.extend_from_slice(&0u16.to_be_bytes()); // arg2 (child point index)

        let mut builder = RecordingBuilder { ops: Vec::new() };
        let result = outline(&d, &d, &empty_loca(), &maxp(), &mut builder);
        assert!(matches!(result, Err(TableResult::GlyfUnsupportedMatchedPoints)));
    }

    #[test]
    fn composite_depth_bound_is_enforced() {
        // A composite glyph that refers to itself forever must stop instead
        // of recursing without bound.
        let mut d = Vec::new();
        d.extend_from_slice(&(-1i16).to_be_bytes()); // numberOfContours: composite
        d.extend_from_slice(&[0u8; 8]);
        // component: flags = ARGS_ARE_XY_VALUES | MORE_COMPONENTS, args are bytes
        let flags: u16 = (1 << 1) | (1 << 5);
        d.extend_from_slice(&flags.to_be_bytes());
        d.extend_from_slice(&0u16.to_be_bytes()); // glyphIndex: itself
        d.push(0);
        d.push(0);

        // loca maps glyph 0 back onto the whole buffer, so the component
        // resolves to this same self-referential composite glyph.
        let loca_data = [0u32, d.len() as u32];
        let mut loca_bytes = Vec::new();
        for off in loca_data {
            loca_bytes.extend_from_slice(&off.to_be_bytes());
        }
        let mut maxp = maxp();
        maxp.max_component_depth = 2;
        let loca = Loca::parse(&loca_bytes, &maxp, crate::head::IndexToLocFormat::Long).unwrap();

        let mut builder = RecordingBuilder { ops: Vec::new() };
        let result = outline(&d, &d, &loca, &maxp, &mut builder);
        assert!(matches!(result, Err(TableResult::GlyfCompositeDepthExceeded)));
    }
}
