// https://docs.microsoft.com/en-us/typography/opentype/spec/hhea

use crate::error::{Result, TableResult};
use crate::maxp::Maxp;
use crate::parser::Stream;

/// The horizontal header table: ascent/descent metrics and the count of
/// metric records `hmtx` carries in full.
///
/// Almost none of these fields have an "incorrect" value — everything
/// besides `metric_data_format` and `number_of_hmetrics` is passed through
/// unchecked, since a font is free to report whatever typographic metrics it
/// wants.
#[derive(Clone, Copy, Debug)]
pub struct Hhea {
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub advance_width_max: u16,
    pub min_left_side_bearing: i16,
    pub min_right_side_bearing: i16,
    pub x_max_extent: i16,
    pub caret_slope_rise: i16,
    pub caret_slope_run: i16,
    pub caret_offset: i16,
    pub number_of_hmetrics: u16,
}

impl Hhea {
    pub(crate) fn parse(data: &[u8], maxp: &Maxp) -> Result<Self> {
        let mut s = Stream::new(data);

        let version_high: u16 = s.read().ok_or(TableResult::InvalidHheaLength)?;
        let version_low: u16 = s.read().ok_or(TableResult::InvalidHheaLength)?;
        if version_high != 1 || version_low != 0 {
            return Err(TableResult::InvalidHheaVersion);
        }

        let ascender: i16 = s.read().ok_or(TableResult::InvalidHheaLength)?;
        let descender: i16 = s.read().ok_or(TableResult::InvalidHheaLength)?;
        let line_gap: i16 = s.read().ok_or(TableResult::InvalidHheaLength)?;
        let advance_width_max: u16 = s.read().ok_or(TableResult::InvalidHheaLength)?;
        let min_left_side_bearing: i16 = s.read().ok_or(TableResult::InvalidHheaLength)?;
        let min_right_side_bearing: i16 = s.read().ok_or(TableResult::InvalidHheaLength)?;
        let x_max_extent: i16 = s.read().ok_or(TableResult::InvalidHheaLength)?;
        let caret_slope_rise: i16 = s.read().ok_or(TableResult::InvalidHheaLength)?;
        let caret_slope_run: i16 = s.read().ok_or(TableResult::InvalidHheaLength)?;
        let caret_offset: i16 = s.read().ok_or(TableResult::InvalidHheaLength)?;

        // 4 reserved i16 fields.
        s.advance(8);

        let metric_data_format: i16 = s.read().ok_or(TableResult::InvalidHheaLength)?;
        if metric_data_format != 0 {
            return Err(TableResult::InvalidHheaMetricDataFormat);
        }

        let number_of_hmetrics: u16 = s.read().ok_or(TableResult::InvalidHheaLength)?;
        if number_of_hmetrics > maxp.num_glyphs {
            return Err(TableResult::InvalidHheaNumberOfHMetrics);
        }

        Ok(Hhea {
            ascender,
            descender,
            line_gap,
            advance_width_max,
            min_left_side_bearing,
            min_right_side_bearing,
            x_max_extent,
            caret_slope_rise,
            caret_slope_run,
            caret_offset,
            number_of_hmetrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    fn maxp_with(num_glyphs: u16) -> Maxp {
        Maxp {
            version_high: 0,
            version_low: 0x1000,
            num_glyphs,
            max_points: 0,
            max_contours: 0,
            max_composite_points: 0,
            max_composite_contours: 0,
            max_zones: 1,
            max_twilight_points: 0,
            max_storage: 0,
            max_function_defs: 0,
            max_instruction_defs: 0,
            max_stack_elements: 0,
            max_size_of_instructions: 0,
            max_component_elements: 0,
            max_component_depth: 0,
        }
    }

    fn valid_hhea(number_of_hmetrics: u16) -> Vec<u8> {
        let mut d = Vec::new();
        d.extend_from_slice(&1u16.to_be_bytes());
        d.extend_from_slice(&0u16.to_be_bytes());
        d.extend_from_slice(&900i16.to_be_bytes()); // ascender
        d.extend_from_slice(&(-200i16).to_be_bytes()); // descender
        d.extend_from_slice(&0i16.to_be_bytes()); // lineGap
        d.extend_from_slice(&1000u16.to_be_bytes()); // advanceWidthMax
        d.extend_from_slice(&0i16.to_be_bytes());
        d.extend_from_slice(&0i16.to_be_bytes());
        d.extend_from_slice(&0i16.to_be_bytes());
        d.extend_from_slice(&1i16.to_be_bytes());
        d.extend_from_slice(&0i16.to_be_bytes());
        d.extend_from_slice(&0i16.to_be_bytes());
        d.extend_from_slice(&[0u8; 8]); // reserved
        d.extend_from_slice(&0i16.to_be_bytes()); // metricDataFormat
        d.extend_from_slice(&number_of_hmetrics.to_be_bytes());
        d
    }

    #[test]
    fn parses_valid_table() {
        let hhea = Hhea::parse(&valid_hhea(5), &maxp_with(10)).unwrap();
        assert_eq!(hhea.ascender, 900);
        assert_eq!(hhea.number_of_hmetrics, 5);
    }

    #[test]
    fn rejects_hmetrics_exceeding_num_glyphs() {
        let data = valid_hhea(20);
        assert!(matches!(
            Hhea::parse(&data, &maxp_with(10)),
            Err(TableResult::InvalidHheaNumberOfHMetrics)
        ));
    }
}
