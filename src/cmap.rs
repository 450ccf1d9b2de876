// https://docs.microsoft.com/en-us/typography/opentype/spec/cmap

use core::convert::TryFrom;

use crate::error::{Result, TableResult};
use crate::parser::{FromData, LazyArray, Stream};

/// A `cmap` encoding record: which (platform, encoding) a subtable serves,
/// and the subtable's byte offset from the start of the `cmap` table.
#[derive(Clone, Copy, Debug)]
struct EncodingRecord {
    platform_id: u16,
    encoding_id: u16,
    offset: u32,
}

impl FromData for EncodingRecord {
    const SIZE: usize = 8;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = Stream::new(data);
        EncodingRecord {
            platform_id: s.read().unwrap(),
            encoding_id: s.read().unwrap(),
            offset: s.read().unwrap(),
        }
    }
}

/// The character-to-glyph mapping table.
///
/// Subtables are not parsed eagerly — only the encoding record array is read
/// up front. Each [`Cmap::glyph_index`] call dispatches on the chosen
/// subtable's format and reads just that subtable, so a font with many
/// unused subtables (common; fonts often carry a symbol table alongside a
/// Unicode one) does no wasted work.
#[derive(Clone, Copy)]
pub struct Cmap<'a> {
    data: &'a [u8],
    records: LazyArray<'a, EncodingRecord>,
}

impl<'a> Cmap<'a> {
    pub(crate) fn parse(data: &'a [u8]) -> Result<Self> {
        let mut s = Stream::new(data);
        let version: u16 = s.read().ok_or(TableResult::InvalidCmapLength)?;
        if version != 0 {
            return Err(TableResult::InvalidCmapLength);
        }

        let num_tables: u16 = s.read().ok_or(TableResult::InvalidCmapLength)?;
        let records = s
            .read_array::<EncodingRecord>(num_tables as u32)
            .ok_or(TableResult::InvalidCmapLength)?;

        Ok(Cmap { data, records })
    }

    /// Picks the best available Unicode subtable: prefers Windows BMP/full
    /// Unicode, then the Unicode platform directly.
    fn best_unicode_subtable(&self) -> Option<(&'a [u8], u16)> {
        fn rank(platform_id: u16, encoding_id: u16) -> u8 {
            match (platform_id, encoding_id) {
                (3, 10) => 5, // Windows, full Unicode (format 12 typically)
                (3, 1) => 4,  // Windows, Unicode BMP (format 4 typically)
                (0, _) => 3,  // Unicode platform, any encoding
                (3, 0) => 1,  // Windows, symbol
                _ => 0,
            }
        }

        let mut best: Option<EncodingRecord> = None;
        for record in self.records {
            let r = rank(record.platform_id, record.encoding_id);
            if r == 0 {
                continue;
            }
            let best_rank = best.map(|b| rank(b.platform_id, b.encoding_id)).unwrap_or(0);
            if r > best_rank {
                best = Some(record);
            }
        }

        let record = best?;
        let format: u16 = Stream::read_at(self.data, record.offset as usize)?;
        let subtable = self.data.get(record.offset as usize..)?;
        Some((subtable, format))
    }

    /// Looks up the glyph ID mapped to `codepoint`, or `None` if the
    /// codepoint is unmapped.
    ///
    /// Returns `Err(TableResult::CmapNoUsableSubtable)` if no Unicode
    /// subtable could be found at all, and
    /// `Err(TableResult::CmapUnsupportedFormat)` if the best subtable found
    /// uses a format this crate recognizes but does not decode.
    pub fn glyph_index(&self, codepoint: u32) -> Result<Option<u16>> {
        let (subtable, format) = self
            .best_unicode_subtable()
            .ok_or(TableResult::CmapNoUsableSubtable)?;

        match format {
            0 => parse_format0(subtable, codepoint),
            4 => parse_format4(subtable, codepoint),
            6 => parse_format6(subtable, codepoint),
            12 => parse_format12(subtable, codepoint),
            2 | 8 | 10 | 13 | 14 => Err(TableResult::CmapUnsupportedFormat),
            _ => Err(TableResult::CmapUnsupportedFormat),
        }
    }
}

fn parse_format0(data: &[u8], codepoint: u32) -> Result<Option<u16>> {
    if codepoint > 255 {
        return Ok(None);
    }
    let glyph_ids = data
        .get(6..6 + 256)
        .ok_or(TableResult::InvalidCmapSubtableData)?;
    Ok(Some(glyph_ids[codepoint as usize] as u16).filter(|&g| g != 0))
}

fn parse_format6(data: &[u8], codepoint: u32) -> Result<Option<u16>> {
    let mut s = Stream::new_at(data, 6).ok_or(TableResult::InvalidCmapSubtableData)?;
    let first_code: u16 = s.read().ok_or(TableResult::InvalidCmapSubtableData)?;
    let entry_count: u16 = s.read().ok_or(TableResult::InvalidCmapSubtableData)?;

    let first_code = first_code as u32;
    if codepoint < first_code || codepoint >= first_code + entry_count as u32 {
        return Ok(None);
    }

    let glyph_ids: LazyArray<u16> = s
        .read_array(entry_count as u32)
        .ok_or(TableResult::InvalidCmapSubtableData)?;
    let index = codepoint - first_code;
    Ok(glyph_ids.get(index).filter(|&g| g != 0))
}

fn parse_format4(data: &[u8], codepoint: u32) -> Result<Option<u16>> {
    if codepoint > 0xFFFF {
        return Ok(None);
    }
    let codepoint = codepoint as u16;

    let mut s = Stream::new_at(data, 6).ok_or(TableResult::InvalidCmapSubtableData)?;
    let seg_count_x2: u16 = s.read().ok_or(TableResult::InvalidCmapSubtableData)?;
    let seg_count = seg_count_x2 / 2;
    s.advance(6); // searchRange, entrySelector, rangeShift

    let end_codes: LazyArray<u16> = s
        .read_array(seg_count as u32)
        .ok_or(TableResult::InvalidCmapSubtableData)?;
    s.advance(2); // reservedPad
    let start_codes: LazyArray<u16> = s
        .read_array(seg_count as u32)
        .ok_or(TableResult::InvalidCmapSubtableData)?;
    let id_deltas: LazyArray<i16> = s
        .read_array(seg_count as u32)
        .ok_or(TableResult::InvalidCmapSubtableData)?;
    let id_range_offsets_pos = s.offset();
    let id_range_offsets: LazyArray<u16> = s
        .read_array(seg_count as u32)
        .ok_or(TableResult::InvalidCmapSubtableData)?;

    for i in 0..seg_count as u32 {
        let end = end_codes.get(i).ok_or(TableResult::InvalidCmapSubtableData)?;
        if codepoint > end {
            continue;
        }
        let start = start_codes.get(i).ok_or(TableResult::InvalidCmapSubtableData)?;
        if codepoint < start {
            return Ok(None);
        }

        let delta = id_deltas.get(i).ok_or(TableResult::InvalidCmapSubtableData)?;
        let range_offset = id_range_offsets
            .get(i)
            .ok_or(TableResult::InvalidCmapSubtableData)?;

        if range_offset == 0 {
            return Ok(Some((codepoint as i32 + delta as i32) as u16).filter(|&g| g != 0));
        }

        // glyphIdArray lookup: per spec, offset is relative to the address
        // of this segment's own idRangeOffset entry.
        let entry_addr = id_range_offsets_pos + (i as usize) * 2;
        let glyph_addr = entry_addr + range_offset as usize + (codepoint - start) as usize * 2;
        let raw: u16 = Stream::read_at(data, glyph_addr).ok_or(TableResult::InvalidCmapSubtableData)?;
        if raw == 0 {
            return Ok(None);
        }
        return Ok(Some(((raw as i32 + delta as i32) & 0xFFFF) as u16));
    }

    Ok(None)
}

fn parse_format12(data: &[u8], codepoint: u32) -> Result<Option<u16>> {
    let mut s = Stream::new_at(data, 12).ok_or(TableResult::InvalidCmapSubtableData)?;
    let num_groups: u32 = s.read().ok_or(TableResult::InvalidCmapSubtableData)?;

    for _ in 0..num_groups {
        let start_char: u32 = s.read().ok_or(TableResult::InvalidCmapSubtableData)?;
        let end_char: u32 = s.read().ok_or(TableResult::InvalidCmapSubtableData)?;
        let start_glyph: u32 = s.read().ok_or(TableResult::InvalidCmapSubtableData)?;

        if codepoint >= start_char && codepoint <= end_char {
            let glyph_id = start_glyph + (codepoint - start_char);
            return Ok(u16::try_from(glyph_id).ok().filter(|&g| g != 0));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[test]
    fn format0_looks_up_byte_codepoints() {
        let mut data = vec![0u8; 6];
        let mut glyph_ids = vec![0u8; 256];
        glyph_ids[65] = 5; // 'A' -> glyph 5
        data.extend_from_slice(&glyph_ids);

        assert_eq!(parse_format0(&data, 65).unwrap(), Some(5));
        assert_eq!(parse_format0(&data, 66).unwrap(), None);
        assert_eq!(parse_format0(&data, 1000).unwrap(), None);
    }

    #[test]
    fn format12_looks_up_group_ranges() {
        let mut data = vec![0u8; 12];
        data.extend_from_slice(&1u32.to_be_bytes()); // numGroups
        data.extend_from_slice(&0x41u32.to_be_bytes()); // startCharCode 'A'
        data.extend_from_slice(&0x5Au32.to_be_bytes()); // endCharCode 'Z'
        data.extend_from_slice(&100u32.to_be_bytes()); // startGlyphID

        assert_eq!(parse_format12(&data, 0x41).unwrap(), Some(100));
        assert_eq!(parse_format12(&data, 0x43).unwrap(), Some(102));
        assert_eq!(parse_format12(&data, 0x5B).unwrap(), None);
    }

    #[test]
    fn unsupported_format_is_reported_distinctly() {
        let mut data = Vec::new();
        data.extend_from_slice(&0u16.to_be_bytes()); // version
        data.extend_from_slice(&1u16.to_be_bytes()); // numTables
        data.extend_from_slice(&3u16.to_be_bytes()); // platform windows
        data.extend_from_slice(&1u16.to_be_bytes()); // encoding
        data.extend_from_slice(&10u32.to_be_bytes()); // offset
        data.extend_from_slice(&2u16.to_be_bytes()); // subtable format 2

        let cmap = Cmap::parse(&data).unwrap();
        assert!(matches!(
            cmap.glyph_index(0x41),
            Err(TableResult::CmapUnsupportedFormat)
        ));
    }
}
