// https://docs.microsoft.com/en-us/typography/opentype/spec/loca

use core::ops::Range;

use crate::error::{Result, TableResult};
use crate::head::IndexToLocFormat;
use crate::maxp::Maxp;
use crate::parser::{LazyArray, Stream};

/// The glyph location table: a `numGlyphs + 1` length array of byte offsets
/// into `glyf`, one per glyph plus a trailing sentinel giving the last
/// glyph's end.
#[derive(Clone, Copy)]
pub enum Loca<'a> {
    Short(LazyArray<'a, u16>),
    Long(LazyArray<'a, u32>),
}

impl<'a> Loca<'a> {
    pub(crate) fn parse(data: &'a [u8], maxp: &Maxp, format: IndexToLocFormat) -> Result<Self> {
        // Overflow-checked: numGlyphs is u16, so numGlyphs + 1 always fits a u32.
        let total = maxp.num_glyphs as u32 + 1;

        let mut s = Stream::new(data);
        let table = match format {
            IndexToLocFormat::Short => {
                Loca::Short(s.read_array(total).ok_or(TableResult::InvalidLocaLength)?)
            }
            IndexToLocFormat::Long => {
                Loca::Long(s.read_array(total).ok_or(TableResult::InvalidLocaLength)?)
            }
        };

        table.validate_monotonic()?;
        Ok(table)
    }

    fn len(&self) -> u32 {
        match self {
            Loca::Short(a) => a.len(),
            Loca::Long(a) => a.len(),
        }
    }

    fn offset(&self, index: u32) -> Option<u32> {
        match self {
            Loca::Short(a) => a.get(index).map(|v| v as u32 * 2),
            Loca::Long(a) => a.get(index),
        }
    }

    fn validate_monotonic(&self) -> Result<()> {
        let mut prev = self.offset(0).ok_or(TableResult::InvalidLocaLength)?;
        for i in 1..self.len() {
            let next = self.offset(i).ok_or(TableResult::InvalidLocaLength)?;
            if next < prev {
                return Err(TableResult::InvalidLocaOffset);
            }
            prev = next;
        }
        Ok(())
    }

    /// The final entry's offset — the end of the last glyph's data in `glyf`.
    /// A conformant font has this no greater than the `glyf` table's length.
    pub(crate) fn end_offset(&self) -> Option<u32> {
        self.offset(self.len().checked_sub(1)?)
    }

    /// Returns the byte range within `glyf` holding `glyph_id`'s outline, or
    /// `None` if the glyph has an empty (zero-length) outline — a normal
    /// state for glyphs like the space character.
    pub fn glyph_range(&self, glyph_id: u16) -> Option<Range<usize>> {
        let glyph_id = glyph_id as u32;
        if glyph_id + 1 >= self.len() {
            return None;
        }

        let start = self.offset(glyph_id)? as usize;
        let end = self.offset(glyph_id + 1)? as usize;

        if start == end {
            None
        } else {
            Some(start..end)
        }
    }
}
