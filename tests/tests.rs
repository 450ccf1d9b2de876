//! Integration tests over hand-built sfnt byte buffers.
//!
//! No binary font fixtures ship with this crate, so every test assembles a
//! minimal but complete nine-table font in memory, then exercises the public
//! API the way an embedder would: `Font::parse`, the metric accessors,
//! `glyph_index`, and the outline pipeline.

use truetype_outline::{Font, GlyphId, GlyphScale, LoadFlags, OutlineBuilder, Rect, TableResult};

const TAGS: [&[u8; 4]; 9] =
    [b"maxp", b"head", b"hhea", b"hmtx", b"loca", b"name", b"glyf", b"cmap", b"post"];

fn checksum(data: &[u8]) -> u32 {
    let mut sum: u32 = 0;
    let mut chunks = data.chunks_exact(4);
    for chunk in &mut chunks {
        sum = sum.wrapping_add(u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    let rem = chunks.remainder();
    if !rem.is_empty() {
        let mut buf = [0u8; 4];
        buf[..rem.len()].copy_from_slice(rem);
        sum = sum.wrapping_add(u32::from_be_bytes(buf));
    }
    sum
}

fn maxp_table(num_glyphs: u16) -> Vec<u8> {
    let mut d = vec![0u8, 0, 0x10, 0]; // version 1.0
    d.extend_from_slice(&num_glyphs.to_be_bytes());
    d.extend_from_slice(&[0u8; 8]); // maxPoints..maxCompositeContours
    d.extend_from_slice(&1u16.to_be_bytes()); // maxZones
    d.extend_from_slice(&[0u8; 16]); // remaining 8 u16 fields
    d
}

fn head_table() -> Vec<u8> {
    let mut d = Vec::new();
    d.extend_from_slice(&1u16.to_be_bytes()); // version high
    d.extend_from_slice(&0u16.to_be_bytes()); // version low
    d.extend_from_slice(&0u16.to_be_bytes()); // fontRevision high
    d.extend_from_slice(&0u16.to_be_bytes()); // fontRevision low
    d.extend_from_slice(&0u32.to_be_bytes()); // checksumAdjustment
    d.extend_from_slice(&0x5F0F_3CF5u32.to_be_bytes()); // magicNumber
    d.extend_from_slice(&0u16.to_be_bytes()); // flags
    d.extend_from_slice(&1000u16.to_be_bytes()); // unitsPerEm
    d.extend_from_slice(&0i64.to_be_bytes()); // created
    d.extend_from_slice(&0i64.to_be_bytes()); // modified
    d.extend_from_slice(&0i16.to_be_bytes()); // xMin
    d.extend_from_slice(&0i16.to_be_bytes()); // yMin
    d.extend_from_slice(&1000i16.to_be_bytes()); // xMax
    d.extend_from_slice(&1000i16.to_be_bytes()); // yMax
    d.extend_from_slice(&0u16.to_be_bytes()); // macStyle
    d.extend_from_slice(&9u16.to_be_bytes()); // lowestRecPPEM
    d.extend_from_slice(&2i16.to_be_bytes()); // fontDirectionHint
    d.extend_from_slice(&0i16.to_be_bytes()); // indexToLocFormat: short
    d.extend_from_slice(&0i16.to_be_bytes()); // glyphDataFormat
    d
}

fn hhea_table(number_of_hmetrics: u16) -> Vec<u8> {
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

fn hmtx_table(advances: &[(u16, i16)]) -> Vec<u8> {
    let mut d = Vec::new();
    for &(advance_width, lsb) in advances {
        d.extend_from_slice(&advance_width.to_be_bytes());
        d.extend_from_slice(&lsb.to_be_bytes());
    }
    d
}

/// A simple glyph: a right triangle at (0,0), (100,0), (100,100), all
/// on-curve with short positive deltas, zero-padded to an even length.
fn triangle_glyf() -> Vec<u8> {
    let mut d = Vec::new();
    d.extend_from_slice(&1i16.to_be_bytes()); // numberOfContours
    d.extend_from_slice(&[0u8; 8]); // xMin, yMin, xMax, yMax
    d.extend_from_slice(&2u16.to_be_bytes()); // endPtsOfContours[0]
    d.extend_from_slice(&0u16.to_be_bytes()); // instructionLength

    const ON_CURVE: u8 = 1 << 0;
    const X_SHORT: u8 = 1 << 1;
    const Y_SHORT: u8 = 1 << 2;
    const X_SAME_POS: u8 = 1 << 4;
    const Y_SAME_POS: u8 = 1 << 5;
    let flags = ON_CURVE | X_SHORT | X_SAME_POS | Y_SHORT | Y_SAME_POS;
    d.push(flags);
    d.push(flags);
    d.push(flags);

    d.extend_from_slice(&[0, 100, 0]); // x deltas: 0, +100, +0
    d.extend_from_slice(&[0, 0, 100]); // y deltas: 0, +0, +100

    d.push(0); // pad to an even length for the short loca format
    d
}

fn loca_table_short(offsets_halved: &[u16]) -> Vec<u8> {
    let mut d = Vec::new();
    for &o in offsets_halved {
        d.extend_from_slice(&o.to_be_bytes());
    }
    d
}

fn name_table_empty() -> Vec<u8> {
    let mut d = Vec::new();
    d.extend_from_slice(&0u16.to_be_bytes()); // version
    d.extend_from_slice(&0u16.to_be_bytes()); // count
    d.extend_from_slice(&6u16.to_be_bytes()); // storageOffset
    d
}

/// A `cmap` with a single Windows/Unicode-BMP format-0 subtable mapping
/// codepoint 'A' (0x41) to glyph 1.
fn cmap_table() -> Vec<u8> {
    let mut d = Vec::new();
    d.extend_from_slice(&0u16.to_be_bytes()); // version
    d.extend_from_slice(&1u16.to_be_bytes()); // numTables
    d.extend_from_slice(&3u16.to_be_bytes()); // platformID: Windows
    d.extend_from_slice(&1u16.to_be_bytes()); // encodingID: Unicode BMP
    d.extend_from_slice(&12u32.to_be_bytes()); // offset: right after the one record

    d.extend_from_slice(&0u16.to_be_bytes()); // format 0
    d.extend_from_slice(&262u16.to_be_bytes()); // length
    d.extend_from_slice(&0u16.to_be_bytes()); // language
    let mut glyph_ids = vec![0u8; 256];
    glyph_ids[0x41] = 1;
    d.extend_from_slice(&glyph_ids);
    d
}

fn post_table_v3() -> Vec<u8> {
    let mut d = vec![0u8; 32];
    d[0..4].copy_from_slice(&0x0003_0000u32.to_be_bytes());
    d
}

/// Assembles a minimal, directory-valid two-glyph font: glyph 0 is empty
/// (`space`), glyph 1 is [`triangle_glyf`].
fn build_font() -> Vec<u8> {
    let glyf = triangle_glyf();
    let tables: [(&[u8; 4], Vec<u8>); 9] = [
        (b"maxp", maxp_table(2)),
        (b"head", head_table()),
        (b"hhea", hhea_table(2)),
        (b"hmtx", hmtx_table(&[(0, 0), (500, 0)])),
        (b"loca", loca_table_short(&[0, 0, (glyf.len() / 2) as u16])),
        (b"name", name_table_empty()),
        (b"glyf", glyf),
        (b"cmap", cmap_table()),
        (b"post", post_table_v3()),
    ];

    let header_size = 12 + tables.len() * 16;
    let mut offset = header_size;
    let mut records = Vec::new();
    for (tag, data) in &tables {
        records.push((*tag, offset, data.len()));
        offset += data.len();
    }

    let mut out = Vec::new();
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    out.extend_from_slice(&[0u8; 6]); // searchRange, entrySelector, rangeShift

    for ((tag, data), (_, off, len)) in tables.iter().zip(records.iter()) {
        out.extend_from_slice(tag.as_slice());
        let sum = if **tag == *b"head" { 0 } else { checksum(data) };
        out.extend_from_slice(&sum.to_be_bytes());
        out.extend_from_slice(&(*off as u32).to_be_bytes());
        out.extend_from_slice(&(*len as u32).to_be_bytes());
    }

    for (_, data) in &tables {
        out.extend_from_slice(data);
    }

    out
}

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

#[test]
fn parses_a_minimal_valid_font() {
    let data = build_font();
    let font = Font::parse(&data, LoadFlags::REQUIRED).unwrap();

    assert_eq!(font.number_of_glyphs(), Some(2));
    assert_eq!(font.units_per_em(), Some(1000));
    assert_eq!(font.ascender(), Some(900));
    assert_eq!(font.descender(), Some(-200));
    assert_eq!(font.line_gap(), Some(0));
    assert_eq!(font.glyph_hor_advance(GlyphId(1)), Some(500));
}

#[test]
fn glyph_index_resolves_through_cmap() {
    let data = build_font();
    let font = Font::parse(&data, LoadFlags::REQUIRED).unwrap();
    assert_eq!(font.glyph_index('A'), Some(GlyphId(1)));
    assert_eq!(font.glyph_index('Z'), None);
}

#[test]
fn glyph_with_no_outline_is_empty() {
    let data = build_font();
    let font = Font::parse(&data, LoadFlags::REQUIRED).unwrap();

    let ready = font.glyph_contours(GlyphId(0), GlyphScale::new(12.0, 72.0)).unwrap();
    assert!(ready.contours.is_empty());
    assert_eq!(ready.bbox, Rect::default());
}

#[test]
fn glyph_outline_is_flattened_translated_and_scaled() {
    let data = build_font();
    let font = Font::parse(&data, LoadFlags::REQUIRED).unwrap();

    // unitsPerEm = 1000, point_size = 12, ppi = 72 -> factor = 12/1000.
    let mut builder = RecordingBuilder { ops: Vec::new() };
    let bbox = font
        .outline_glyph(GlyphId(1), &mut builder, GlyphScale::new(12.0, 72.0))
        .unwrap();

    assert_eq!(builder.ops.first().unwrap(), "M 0 0");
    assert_eq!(builder.ops.last().unwrap(), "Z");
    assert!((bbox.x_max - 1.2).abs() < 1e-4);
    assert!((bbox.y_max - 1.2).abs() < 1e-4);
}

#[test]
fn scaling_a_glyph_outline_is_linear_in_point_size() {
    let data = build_font();
    let font = Font::parse(&data, LoadFlags::REQUIRED).unwrap();

    let small = font.glyph_contours(GlyphId(1), GlyphScale::new(6.0, 72.0)).unwrap();
    let large = font.glyph_contours(GlyphId(1), GlyphScale::new(12.0, 72.0)).unwrap();
    assert!((large.bbox.x_max - 2.0 * small.bbox.x_max).abs() < 1e-4);
}

#[test]
fn a_malformed_optional_table_does_not_prevent_the_rest_from_loading() {
    // Corrupt `hhea`'s version field; its checksum is computed over the
    // already-corrupted bytes, so the directory still validates.
    let mut data = build_font();
    let hhea_record_index = TAGS.iter().position(|t| **t == *b"hhea").unwrap();
    let record_start = 12 + hhea_record_index * 16;
    let offset = u32::from_be_bytes([
        data[record_start + 8],
        data[record_start + 9],
        data[record_start + 10],
        data[record_start + 11],
    ]) as usize;
    let length = u32::from_be_bytes([
        data[record_start + 12],
        data[record_start + 13],
        data[record_start + 14],
        data[record_start + 15],
    ]) as usize;
    data[offset] = 0xFF; // stomp versionMajor
    data[offset + 1] = 0xFF;
    let new_sum = checksum(&data[offset..offset + length]);
    data[record_start + 4..record_start + 8].copy_from_slice(&new_sum.to_be_bytes());

    let font = Font::parse(&data, LoadFlags::REQUIRED).unwrap();
    assert_eq!(font.hhea, None);
    assert_eq!(font.hhea_result, TableResult::InvalidHheaVersion);

    // maxp/head/name/cmap have no dependency on hhea and still load.
    assert_eq!(font.number_of_glyphs(), Some(2));
    assert_eq!(font.units_per_em(), Some(1000));
    assert_eq!(font.glyph_index('A'), Some(GlyphId(1)));

    // hmtx depends on hhea and is reported as unavailable, not silently
    // treated as present.
    assert_eq!(font.hmtx, None);
    assert_eq!(font.hmtx_result, TableResult::HmtxRequiresHhea);
}

#[test]
fn requesting_a_subset_of_tables_leaves_the_rest_untouched() {
    let data = build_font();
    let font = Font::parse(&data, LoadFlags::MAXP | LoadFlags::HEAD).unwrap();

    assert_eq!(font.number_of_glyphs(), Some(2));
    assert_eq!(font.units_per_em(), Some(1000));

    assert_eq!(font.hhea, None);
    assert_eq!(font.hhea_result, TableResult::Success);
    assert_eq!(font.cmap, None);
    assert_eq!(font.cmap_result, TableResult::Success);
}

#[test]
fn rejects_a_font_missing_a_required_table() {
    // Corrupt the `post` tag so it no longer matches any required tag.
    let mut data = build_font();
    let post_index = TAGS.iter().position(|t| **t == *b"post").unwrap();
    let record_start = 12 + post_index * 16;
    data[record_start..record_start + 4].copy_from_slice(b"zzzz");

    assert!(matches!(
        Font::parse(&data, LoadFlags::REQUIRED),
        Err(TableResult::MissingDirectoryRecordTableTags)
    ));
}
