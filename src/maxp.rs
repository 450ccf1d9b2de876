// https://docs.microsoft.com/en-us/typography/opentype/spec/maxp

use crate::error::{Result, TableResult};
use crate::parser::Stream;

/// The maximum-profile table: per-glyph and per-program resource ceilings
/// that other tables are checked against.
///
/// Only `version`, `num_glyphs`, and `max_zones` are validated here — every
/// other field is itself a maximum that downstream tables (`hhea`, `loca`,
/// `glyf`) are checked against, so an out-of-range value here only manifests
/// as a failure in whichever table exceeds it.
#[derive(Clone, Copy, Debug)]
pub struct Maxp {
    pub version_high: u16,
    pub version_low: u16,
    pub num_glyphs: u16,
    pub max_points: u16,
    pub max_contours: u16,
    pub max_composite_points: u16,
    pub max_composite_contours: u16,
    pub max_zones: u16,
    pub max_twilight_points: u16,
    pub max_storage: u16,
    pub max_function_defs: u16,
    pub max_instruction_defs: u16,
    pub max_stack_elements: u16,
    pub max_size_of_instructions: u16,
    pub max_component_elements: u16,
    pub max_component_depth: u16,
}

impl Maxp {
    pub(crate) fn parse(data: &[u8]) -> Result<Self> {
        let mut s = Stream::new(data);
        let version_high: u16 = s.read().ok_or(TableResult::InvalidMaxpLength)?;
        let version_low: u16 = s.read().ok_or(TableResult::InvalidMaxpLength)?;
        let num_glyphs: u16 = s.read().ok_or(TableResult::InvalidMaxpLength)?;

        // Version 0.5 (0x00005000) marks a CFF/OpenType-CFF outline glyph
        // set, which this crate does not decode; only 1.0 (TrueType) is
        // accepted.
        if version_high != 0 || version_low != 0x1000 {
            return Err(TableResult::InvalidMaxpVersion);
        }
        if num_glyphs < 2 {
            return Err(TableResult::InvalidMaxpNumGlyphs);
        }

        let max_points: u16 = s.read().ok_or(TableResult::InvalidMaxpLength)?;
        let max_contours: u16 = s.read().ok_or(TableResult::InvalidMaxpLength)?;
        let max_composite_points: u16 = s.read().ok_or(TableResult::InvalidMaxpLength)?;
        let max_composite_contours: u16 = s.read().ok_or(TableResult::InvalidMaxpLength)?;
        let max_zones: u16 = s.read().ok_or(TableResult::InvalidMaxpLength)?;
        if max_zones != 1 && max_zones != 2 {
            return Err(TableResult::InvalidMaxpMaxZones);
        }
        let max_twilight_points: u16 = s.read().ok_or(TableResult::InvalidMaxpLength)?;
        let max_storage: u16 = s.read().ok_or(TableResult::InvalidMaxpLength)?;
        let max_function_defs: u16 = s.read().ok_or(TableResult::InvalidMaxpLength)?;
        let max_instruction_defs: u16 = s.read().ok_or(TableResult::InvalidMaxpLength)?;
        let max_stack_elements: u16 = s.read().ok_or(TableResult::InvalidMaxpLength)?;
        let max_size_of_instructions: u16 = s.read().ok_or(TableResult::InvalidMaxpLength)?;
        let max_component_elements: u16 = s.read().ok_or(TableResult::InvalidMaxpLength)?;
        let max_component_depth: u16 = s.read().ok_or(TableResult::InvalidMaxpLength)?;

        Ok(Maxp {
            version_high,
            version_low,
            num_glyphs,
            max_points,
            max_contours,
            max_composite_points,
            max_composite_contours,
            max_zones,
            max_twilight_points,
            max_storage,
            max_function_defs,
            max_instruction_defs,
            max_stack_elements,
            max_size_of_instructions,
            max_component_elements,
            max_component_depth,
        })
    }

    /// Upper bound, in bytes, on the flag and coordinate arrays of the
    /// largest simple glyph this font can contain.
    ///
    /// Worst case: every point gets its own flag byte (no run-length
    /// repetition) and a 2-byte delta on both axes, plus one `u16` contour
    /// end-point per contour.
    fn max_simple_glyph_scratch(&self) -> usize {
        let flags = self.max_points as usize;
        let coordinates = self.max_points as usize * 2 * 2;
        let end_points = self.max_contours as usize * 2;
        flags + coordinates + end_points
    }

    /// Upper bound, in bytes, on the component records of the largest
    /// composite glyph this font can contain.
    ///
    /// Worst case per component: a 2-byte flags word, a 2-byte glyph index,
    /// 2-byte-wide x/y args, and a full 2x2 `F2Dot14` transform (4 * 2
    /// bytes) — 16 bytes.
    fn max_composite_glyph_scratch(&self) -> usize {
        const MAX_COMPONENT_RECORD_SIZE: usize = 16;
        self.max_component_elements as usize * MAX_COMPONENT_RECORD_SIZE
    }

    /// Upper bound, in bytes, a caller needs for a single scratch buffer
    /// reusable across every glyph in this font, simple or composite.
    pub fn max_glyph_scratch_size(&self) -> usize {
        self.max_simple_glyph_scratch()
            .max(self.max_composite_glyph_scratch())
    }
}
