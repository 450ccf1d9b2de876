// https://docs.microsoft.com/en-us/typography/opentype/spec/head

use crate::error::{Result, TableResult};
use crate::parser::Stream;

const MAGIC_NUMBER: u32 = 0x5F0F_3CF5;

/// `indexToLocFormat`: which width the `loca` table's offsets are encoded at.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IndexToLocFormat {
    /// Offsets are `u16`, stored divided by 2.
    Short,
    /// Offsets are `u32`.
    Long,
}

/// The font header table: global scaling and bounding-box metadata.
#[derive(Clone, Copy, Debug)]
pub struct Head {
    pub font_revision_high: i16,
    pub font_revision_low: u16,
    pub checksum_adjustment: u32,
    pub flags: u16,
    pub units_per_em: u16,
    pub created: i64,
    pub modified: i64,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub mac_style: u16,
    pub lowest_rec_ppem: u16,
    pub font_direction_hint: i16,
    pub index_to_loc_format: IndexToLocFormat,
}

impl Head {
    pub(crate) fn parse(data: &[u8]) -> Result<Self> {
        let mut s = Stream::new(data);

        let version_high: u16 = s.read().ok_or(TableResult::InvalidHeadLength)?;
        let version_low: u16 = s.read().ok_or(TableResult::InvalidHeadLength)?;
        if version_high != 1 || version_low != 0 {
            return Err(TableResult::InvalidHeadVersion);
        }

        let font_revision_high: i16 = s.read().ok_or(TableResult::InvalidHeadLength)?;
        let font_revision_low: u16 = s.read().ok_or(TableResult::InvalidHeadLength)?;
        let checksum_adjustment: u32 = s.read().ok_or(TableResult::InvalidHeadLength)?;
        let magic_number: u32 = s.read().ok_or(TableResult::InvalidHeadLength)?;
        if magic_number != MAGIC_NUMBER {
            return Err(TableResult::InvalidHeadMagicNumber);
        }

        let flags: u16 = s.read().ok_or(TableResult::InvalidHeadLength)?;
        let units_per_em: u16 = s.read().ok_or(TableResult::InvalidHeadLength)?;
        if !(16..=16384).contains(&units_per_em) {
            return Err(TableResult::InvalidHeadUnitsPerEm);
        }

        let created: i64 = s.read().ok_or(TableResult::InvalidHeadLength)?;
        let modified: i64 = s.read().ok_or(TableResult::InvalidHeadLength)?;

        let x_min: i16 = s.read().ok_or(TableResult::InvalidHeadLength)?;
        let y_min: i16 = s.read().ok_or(TableResult::InvalidHeadLength)?;
        let x_max: i16 = s.read().ok_or(TableResult::InvalidHeadLength)?;
        let y_max: i16 = s.read().ok_or(TableResult::InvalidHeadLength)?;

        if !(-16384..=16383).contains(&x_min) {
            return Err(TableResult::InvalidHeadXMinCoordinates);
        }
        if !(-16384..=16383).contains(&y_min) {
            return Err(TableResult::InvalidHeadYMinCoordinates);
        }
        if !(-16384..=16383).contains(&x_max) {
            return Err(TableResult::InvalidHeadXMaxCoordinates);
        }
        if !(-16384..=16383).contains(&y_max) {
            return Err(TableResult::InvalidHeadYMaxCoordinates);
        }
        if x_min > x_max {
            return Err(TableResult::InvalidHeadXMinMax);
        }
        if y_min > y_max {
            return Err(TableResult::InvalidHeadYMinMax);
        }

        let mac_style: u16 = s.read().ok_or(TableResult::InvalidHeadLength)?;
        let lowest_rec_ppem: u16 = s.read().ok_or(TableResult::InvalidHeadLength)?;
        let font_direction_hint: i16 = s.read().ok_or(TableResult::InvalidHeadLength)?;

        let index_to_loc_format: i16 = s.read().ok_or(TableResult::InvalidHeadLength)?;
        let index_to_loc_format = match index_to_loc_format {
            0 => IndexToLocFormat::Short,
            1 => IndexToLocFormat::Long,
            _ => return Err(TableResult::InvalidHeadIndexToLocFormat),
        };

        let glyph_data_format: i16 = s.read().ok_or(TableResult::InvalidHeadLength)?;
        if glyph_data_format != 0 {
            return Err(TableResult::InvalidHeadGlyphDataFormat);
        }

        Ok(Head {
            font_revision_high,
            font_revision_low,
            checksum_adjustment,
            flags,
            units_per_em,
            created,
            modified,
            x_min,
            y_min,
            x_max,
            y_max,
            mac_style,
            lowest_rec_ppem,
            font_direction_hint,
            index_to_loc_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    fn valid_head() -> Vec<u8> {
        let mut d = Vec::new();
        d.extend_from_slice(&1u16.to_be_bytes()); // version high
        d.extend_from_slice(&0u16.to_be_bytes()); // version low
        d.extend_from_slice(&0u16.to_be_bytes()); // font revision high
        d.extend_from_slice(&0u16.to_be_bytes()); // font revision low
        d.extend_from_slice(&0u32.to_be_bytes()); // checksum adjustment
        d.extend_from_slice(&MAGIC_NUMBER.to_be_bytes());
        d.extend_from_slice(&0u16.to_be_bytes()); // flags
        d.extend_from_slice(&1000u16.to_be_bytes()); // unitsPerEm
        d.extend_from_slice(&0i64.to_be_bytes()); // created
        d.extend_from_slice(&0i64.to_be_bytes()); // modified
        d.extend_from_slice(&0i16.to_be_bytes()); // xMin
        d.extend_from_slice(&0i16.to_be_bytes()); // yMin
        d.extend_from_slice(&100i16.to_be_bytes()); // xMax
        d.extend_from_slice(&100i16.to_be_bytes()); // yMax
        d.extend_from_slice(&0u16.to_be_bytes()); // macStyle
        d.extend_from_slice(&9u16.to_be_bytes()); // lowestRecPPEM
        d.extend_from_slice(&2i16.to_be_bytes()); // fontDirectionHint
        d.extend_from_slice(&0i16.to_be_bytes()); // indexToLocFormat
        d.extend_from_slice(&0i16.to_be_bytes()); // glyphDataFormat
        d
    }

    #[test]
    fn parses_valid_table() {
        let head = Head::parse(&valid_head()).unwrap();
        assert_eq!(head.units_per_em, 1000);
        assert_eq!(head.index_to_loc_format, IndexToLocFormat::Short);
    }

    #[test]
    fn rejects_bad_magic_number() {
        let mut data = valid_head();
        data[12] = 0; // stomp a byte of the magic number (offset 12..16)
        assert!(matches!(Head::parse(&data), Err(TableResult::InvalidHeadMagicNumber)));
    }

    #[test]
    fn rejects_units_per_em_out_of_range() {
        let mut data = valid_head();
        data[18..20].copy_from_slice(&4u16.to_be_bytes());
        assert!(matches!(Head::parse(&data), Err(TableResult::InvalidHeadUnitsPerEm)));
    }

    #[test]
    fn rejects_inverted_bbox() {
        let mut data = valid_head();
        // xMin at offset 36, xMax at offset 40; make xMin > xMax.
        data[36..38].copy_from_slice(&50i16.to_be_bytes());
        data[40..42].copy_from_slice(&10i16.to_be_bytes());
        assert!(matches!(Head::parse(&data), Err(TableResult::InvalidHeadXMinMax)));
    }
}
