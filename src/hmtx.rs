// https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx

use crate::error::{Result, TableResult};
use crate::hhea::Hhea;
use crate::maxp::Maxp;
use crate::parser::{LazyArray, Stream};

/// One entry of the `hMetrics` array: a glyph's advance width and left
/// side bearing.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LongHorMetric {
    pub advance_width: u16,
    pub lsb: i16,
}

impl crate::parser::FromData for LongHorMetric {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        LongHorMetric {
            advance_width: u16::from_be_bytes([data[0], data[1]]),
            lsb: i16::from_be_bytes([data[2], data[3]]),
        }
    }
}

/// The horizontal metrics table.
///
/// `hmetrics` has `hhea.number_of_hmetrics` entries; any glyph beyond that
/// reuses the last entry's advance width and instead reads its own entry
/// from `left_side_bearings`, per the "optimization" the format allows when
/// many trailing glyphs share one advance width (commonly true of
/// monospaced fonts).
#[derive(Clone, Copy)]
pub struct Hmtx<'a> {
    hmetrics: LazyArray<'a, LongHorMetric>,
    left_side_bearings: LazyArray<'a, i16>,
}

impl<'a> Hmtx<'a> {
    pub(crate) fn parse(data: &'a [u8], maxp: &Maxp, hhea: &Hhea) -> Result<Self> {
        let mut s = Stream::new(data);
        let hmetrics = s
            .read_array::<LongHorMetric>(hhea.number_of_hmetrics as u32)
            .ok_or(TableResult::InvalidHmtxLength)?;

        let remaining = maxp.num_glyphs.saturating_sub(hhea.number_of_hmetrics);
        let left_side_bearings = s
            .read_array::<i16>(remaining as u32)
            .ok_or(TableResult::InvalidHmtxLength)?;

        Ok(Hmtx {
            hmetrics,
            left_side_bearings,
        })
    }

    /// Returns the advance width and left side bearing for `glyph_id`.
    ///
    /// `glyph_id` must already be known to be less than `maxp.num_glyphs`;
    /// this is guaranteed by every caller in this crate, which all validate
    /// the glyph ID against `maxp` before reaching here.
    pub fn metrics(&self, glyph_id: u16) -> Option<LongHorMetric> {
        if let Some(m) = self.hmetrics.get(glyph_id as u32) {
            return Some(m);
        }

        let hmetrics_len = self.hmetrics.len();
        let last = self.hmetrics.last()?;
        let lsb_index = (glyph_id as u32).checked_sub(hmetrics_len)?;
        let lsb = self.left_side_bearings.get(lsb_index)?;
        Some(LongHorMetric {
            advance_width: last.advance_width,
            lsb,
        })
    }
}
