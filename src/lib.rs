/*!
A validating TrueType font parser, plus a glyph-outline extraction and
scaling pipeline.

## Scope

This crate decodes the nine tables a conformant TrueType font requires
(`maxp`, `head`, `hhea`, `hmtx`, `loca`, `name`, `glyf`, `cmap`, `post`),
resolves composite glyphs recursively, and scales a glyph's outline from
em-units to pixels. It does not execute hinting instructions, does not read
CFF/OpenType-CFF outlines, and does not shape, lay out, or kern text — those
are out of scope, along with any font *writing*.

## Error handling

Every fallible operation returns a [`TableResult`] rather than folding failure
into `Option`. Only [`TableResult::Success`] is non-fatal; see
[`TableResult::is_fatal`]. [`Font::parse`] itself only fails for
directory-level problems (the file is too short, the sfnt magic is wrong, a
required table is entirely absent) — once the directory parses, the `Font`
handle is returned with one `Option<T>` plus one [`TableResult`] per table, so
a font missing, say, a well-formed `post` table is still usable for
everything else.

## Concurrency

A loaded `Font` is immutable: every accessor takes `&self`, so a single
handle may be shared across threads once construction (a single, non-mutating
call) completes.

## Safety

No `unsafe`. A malformed font must never panic — fall back to a `TableResult`
instead.
*/

#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

#[cfg(feature = "logging")]
macro_rules! debug {
    ($($arg:tt)+) => (log::log!(log::Level::Debug, $($arg)+));
}
#[cfg(not(feature = "logging"))]
macro_rules! debug {
    ($($arg:tt)+) => {};
}

#[cfg(feature = "logging")]
macro_rules! warn {
    ($($arg:tt)+) => (log::log!(log::Level::Warn, $($arg)+));
}
#[cfg(not(feature = "logging"))]
macro_rules! warn {
    ($($arg:tt)+) => {};
}

mod cmap;
mod error;
mod glyf;
mod head;
mod hhea;
mod hmtx;
mod loca;
mod maxp;
mod name;
#[cfg(feature = "std")]
mod outline;
mod parser;
mod post;

pub use cmap::Cmap;
pub use error::{Result, TableResult};
pub use head::{Head, IndexToLocFormat};
pub use hhea::Hhea;
pub use hmtx::{Hmtx, LongHorMetric};
pub use loca::Loca;
pub use maxp::Maxp;
pub use name::{name_id, platform_id, LangTagRecord, Name, NameRecord};
#[cfg(feature = "std")]
pub use outline::{GlyphScale, ReadyContour, ReadyGlyph, ReadyPoint};
pub use post::{LineMetrics, Post};

use parser::{FromData, Stream, Tag};

const SFNT_VERSION_TRUE_TYPE: u32 = 0x0001_0000;
const DIRECTORY_HEADER_SIZE: usize = 12;

const MAXP_TAG: Tag = Tag::new(b"maxp");
const HEAD_TAG: Tag = Tag::new(b"head");
const HHEA_TAG: Tag = Tag::new(b"hhea");
const HMTX_TAG: Tag = Tag::new(b"hmtx");
const LOCA_TAG: Tag = Tag::new(b"loca");
const NAME_TAG: Tag = Tag::new(b"name");
const GLYF_TAG: Tag = Tag::new(b"glyf");
const CMAP_TAG: Tag = Tag::new(b"cmap");
const POST_TAG: Tag = Tag::new(b"post");

const REQUIRED_TAGS: [Tag; 9] = [
    MAXP_TAG, HEAD_TAG, HHEA_TAG, HMTX_TAG, LOCA_TAG, NAME_TAG, GLYF_TAG, CMAP_TAG, POST_TAG,
];

/// A type-safe wrapper for a glyph index.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct GlyphId(pub u16);

impl FromData for GlyphId {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        GlyphId(u16::parse(data))
    }
}

/// A rectangle, in the unit the producing method documents (em-units for
/// table bounding boxes, pixels for a scaled glyph outline).
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Rect {
    #[allow(missing_docs)]
    pub x_min: f32,
    #[allow(missing_docs)]
    pub y_min: f32,
    #[allow(missing_docs)]
    pub x_max: f32,
    #[allow(missing_docs)]
    pub y_max: f32,
}

/// A trait for glyph outline construction.
///
/// [`Font::outline_glyph`] calls these methods as it walks a glyph's
/// (possibly composite, already-flattened) contours; a caller implements this
/// to build whatever outline representation it needs (an SVG path, a
/// rasterizer's edge list, ...).
pub trait OutlineBuilder {
    /// Starts a new contour at `(x, y)`.
    fn move_to(&mut self, x: f32, y: f32);
    /// Appends a line segment to `(x, y)`.
    fn line_to(&mut self, x: f32, y: f32);
    /// Appends a quadratic Bézier segment with control point `(x1, y1)`,
    /// ending at `(x, y)`.
    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32);
    /// Appends a cubic Bézier segment. `glyf` outlines never produce this —
    /// it exists so the trait can serve outline sources (e.g. CFF) this crate
    /// does not decode, without being redefined downstream.
    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32);
    /// Closes the current contour.
    fn close(&mut self);
}

/// A bitmask selecting which of the nine tables [`Font::parse`] should parse.
///
/// Every requested table is attempted independently; an unrequested table is
/// simply never touched (its slot stays `None` and its result stays
/// [`TableResult::Success`], meaning "nothing failed," not "present").
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LoadFlags(u16);

impl LoadFlags {
    /// `maxp`.
    pub const MAXP: LoadFlags = LoadFlags(1 << 0);
    /// `head`.
    pub const HEAD: LoadFlags = LoadFlags(1 << 1);
    /// `hhea`.
    pub const HHEA: LoadFlags = LoadFlags(1 << 2);
    /// `hmtx`.
    pub const HMTX: LoadFlags = LoadFlags(1 << 3);
    /// `loca`.
    pub const LOCA: LoadFlags = LoadFlags(1 << 4);
    /// `name`.
    pub const NAME: LoadFlags = LoadFlags(1 << 5);
    /// `glyf`.
    pub const GLYF: LoadFlags = LoadFlags(1 << 6);
    /// `cmap`.
    pub const CMAP: LoadFlags = LoadFlags(1 << 7);
    /// `post`.
    pub const POST: LoadFlags = LoadFlags(1 << 8);

    /// All nine required tables — the common case, and the only thing a
    /// conformant font can really be validated against.
    pub const REQUIRED: LoadFlags = LoadFlags(
        Self::MAXP.0 | Self::HEAD.0 | Self::HHEA.0 | Self::HMTX.0 | Self::LOCA.0
            | Self::NAME.0 | Self::GLYF.0 | Self::CMAP.0 | Self::POST.0,
    );
    /// Every table this crate knows how to load. Identical to
    /// [`LoadFlags::REQUIRED`] today since this crate implements no optional
    /// tables beyond the nine required ones.
    pub const ALL: LoadFlags = Self::REQUIRED;

    /// Returns whether every bit in `other` is set in `self`.
    #[inline]
    pub fn contains(self, other: LoadFlags) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl core::ops::BitOr for LoadFlags {
    type Output = LoadFlags;

    #[inline]
    fn bitor(self, rhs: LoadFlags) -> LoadFlags {
        LoadFlags(self.0 | rhs.0)
    }
}

/// One table directory record: a tag, its checksum, and its byte range in the
/// file.
#[derive(Clone, Copy, Debug)]
struct TableRecord {
    tag: Tag,
    checksum: u32,
    offset: u32,
    length: u32,
}

impl FromData for TableRecord {
    const SIZE: usize = 16;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = Stream::new(data);
        TableRecord {
            tag: s.read().unwrap(),
            checksum: s.read().unwrap(),
            offset: s.read().unwrap(),
            length: s.read().unwrap(),
        }
    }
}

/// The sfnt table directory: header plus table records.
struct Directory<'a> {
    records: parser::LazyArray<'a, TableRecord>,
}

impl<'a> Directory<'a> {
    fn parse(data: &'a [u8]) -> Result<Self> {
        if data.len() < DIRECTORY_HEADER_SIZE {
            return Err(TableResult::InvalidDirectoryLength);
        }

        let mut s = Stream::new(data);
        let sfnt_version: u32 = s.read().ok_or(TableResult::InvalidDirectoryLength)?;
        if sfnt_version != SFNT_VERSION_TRUE_TYPE {
            return Err(TableResult::InvalidDirectorySfntVersion);
        }

        let num_tables: u16 = s.read().ok_or(TableResult::InvalidDirectoryLength)?;
        if num_tables < 9 {
            return Err(TableResult::InvalidDirectoryNumTables);
        }
        s.advance(6); // searchRange, entrySelector, rangeShift

        let records = s
            .read_array::<TableRecord>(num_tables as u32)
            .ok_or(TableResult::InvalidDirectoryNumTables)?;

        let directory = Directory { records };
        directory.validate(data)?;
        Ok(directory)
    }

    fn validate(&self, file: &[u8]) -> Result<()> {
        let mut found = [false; 9];

        for i in 0..self.records.len() {
            let record = self.records.get(i).unwrap();

            for j in 0..i {
                if self.records.get(j).unwrap().tag == record.tag {
                    return Err(TableResult::InvalidDirectoryRecordTableTag);
                }
            }

            let offset = record.offset as usize;
            if offset >= file.len() {
                return Err(TableResult::InvalidDirectoryRecordOffset);
            }
            let end = offset
                .checked_add(record.length as usize)
                .ok_or(TableResult::InvalidDirectoryRecordLength)?;
            if end > file.len() {
                return Err(TableResult::InvalidDirectoryRecordLength);
            }

            if record.tag != HEAD_TAG {
                let table_data = &file[offset..end];
                if table_checksum(table_data) != record.checksum {
                    return Err(TableResult::InvalidDirectoryRecordChecksum);
                }
            }

            for (slot, tag) in found.iter_mut().zip(REQUIRED_TAGS.iter()) {
                if record.tag == *tag {
                    *slot = true;
                }
            }
        }

        if found.iter().any(|present| !present) {
            return Err(TableResult::MissingDirectoryRecordTableTags);
        }

        Ok(())
    }

    fn find(&self, tag: Tag) -> Option<TableRecord> {
        self.records.into_iter().find(|r| r.tag == tag)
    }

    fn table_data<'f>(&self, file: &'f [u8], tag: Tag) -> Option<&'f [u8]> {
        let record = self.find(tag)?;
        let start = record.offset as usize;
        let end = start.checked_add(record.length as usize)?;
        file.get(start..end)
    }
}

/// Sums table bytes as big-endian `u32` words, modulo 2^32, zero-padding a
/// partial trailing word.
fn table_checksum(data: &[u8]) -> u32 {
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

/// A loaded font.
///
/// Every table is represented as an `Option<T>` paired with a [`TableResult`]
/// recording why it is `None` when it is: [`TableResult::Success`] means
/// either "parsed" (struct present) or "not requested" (struct absent); any
/// other code means a genuine parse failure for a requested table.
pub struct Font<'a> {
    data: &'a [u8],

    /// The parsed `maxp` table, if requested and valid.
    pub maxp: Option<Maxp>,
    /// Why [`Font::maxp`] is absent, if it is.
    pub maxp_result: TableResult,

    /// The parsed `head` table, if requested and valid.
    pub head: Option<Head>,
    /// Why [`Font::head`] is absent, if it is.
    pub head_result: TableResult,

    /// The parsed `hhea` table, if requested and valid.
    pub hhea: Option<Hhea>,
    /// Why [`Font::hhea`] is absent, if it is.
    pub hhea_result: TableResult,

    /// The parsed `hmtx` table, if requested and valid.
    pub hmtx: Option<Hmtx<'a>>,
    /// Why [`Font::hmtx`] is absent, if it is.
    pub hmtx_result: TableResult,

    /// The parsed `loca` table, if requested and valid.
    pub loca: Option<Loca<'a>>,
    /// Why [`Font::loca`] is absent, if it is.
    pub loca_result: TableResult,

    /// The parsed `name` table, if requested and valid.
    pub name: Option<Name<'a>>,
    /// Why [`Font::name`] is absent, if it is.
    pub name_result: TableResult,

    /// The raw `glyf` table span. Not eagerly parsed into a structure — it is
    /// only consulted, per-glyph, through [`Font::outline_glyph`] and
    /// [`Font::glyph_contours`].
    pub glyf: Option<&'a [u8]>,
    /// Why [`Font::glyf`] is absent, if it is.
    pub glyf_result: TableResult,

    /// The parsed `cmap` table, if requested and valid.
    pub cmap: Option<Cmap<'a>>,
    /// Why [`Font::cmap`] is absent, if it is.
    pub cmap_result: TableResult,

    /// The parsed `post` table, if requested and valid.
    pub post: Option<Post<'a>>,
    /// Why [`Font::post`] is absent, if it is.
    pub post_result: TableResult,
}

impl<'a> Font<'a> {
    /// Parses a font from a complete sfnt byte buffer.
    ///
    /// Fails only for directory-level problems: too short, wrong sfnt
    /// version, malformed table records, or a required tag entirely absent
    /// from the file. Once the directory parses, this always returns `Ok`;
    /// individual table failures are recorded on the returned handle rather
    /// than propagated.
    pub fn parse(data: &'a [u8], flags: LoadFlags) -> Result<Self> {
        let directory = Directory::parse(data)?;
        debug!("directory: {} table(s)", directory.records.len());

        let mut font = Font {
            data,
            maxp: None,
            maxp_result: TableResult::Success,
            head: None,
            head_result: TableResult::Success,
            hhea: None,
            hhea_result: TableResult::Success,
            hmtx: None,
            hmtx_result: TableResult::Success,
            loca: None,
            loca_result: TableResult::Success,
            name: None,
            name_result: TableResult::Success,
            glyf: None,
            glyf_result: TableResult::Success,
            cmap: None,
            cmap_result: TableResult::Success,
            post: None,
            post_result: TableResult::Success,
        };

        font.resolve(&directory, flags);
        Ok(font)
    }

    /// Runs every requested loader in dependency order, making repeated
    /// passes until a full pass does no work. Tag order in the file need not
    /// match dependency order: a table is attempted only once every table it
    /// depends on has itself been attempted (successfully or not).
    fn resolve(&mut self, directory: &Directory, flags: LoadFlags) {
        let mut maxp_attempted = !flags.contains(LoadFlags::MAXP);
        let mut head_attempted = !flags.contains(LoadFlags::HEAD);
        let mut hhea_attempted = !flags.contains(LoadFlags::HHEA);
        let mut hmtx_attempted = !flags.contains(LoadFlags::HMTX);
        let mut loca_attempted = !flags.contains(LoadFlags::LOCA);
        let mut name_attempted = !flags.contains(LoadFlags::NAME);
        let mut glyf_attempted = !flags.contains(LoadFlags::GLYF);
        let mut cmap_attempted = !flags.contains(LoadFlags::CMAP);
        let mut post_attempted = !flags.contains(LoadFlags::POST);

        loop {
            let mut progress = false;

            if !maxp_attempted {
                maxp_attempted = true;
                progress = true;
                match directory.table_data(self.data, MAXP_TAG) {
                    Some(table_data) => match Maxp::parse(table_data) {
                        Ok(t) => self.maxp = Some(t),
                        Err(e) => {
                            warn!("maxp failed to load: {}", e);
                            self.maxp_result = e;
                        }
                    },
                    None => self.maxp_result = TableResult::FailedFindTable,
                }
            }

            if !head_attempted {
                head_attempted = true;
                progress = true;
                match directory.table_data(self.data, HEAD_TAG) {
                    Some(table_data) => match Head::parse(table_data) {
                        Ok(t) => self.head = Some(t),
                        Err(e) => {
                            warn!("head failed to load: {}", e);
                            self.head_result = e;
                        }
                    },
                    None => self.head_result = TableResult::FailedFindTable,
                }
            }

            if !name_attempted {
                name_attempted = true;
                progress = true;
                match directory.table_data(self.data, NAME_TAG) {
                    Some(table_data) => match Name::parse(table_data) {
                        Ok(t) => self.name = Some(t),
                        Err(e) => {
                            warn!("name failed to load: {}", e);
                            self.name_result = e;
                        }
                    },
                    None => self.name_result = TableResult::FailedFindTable,
                }
            }

            if !cmap_attempted {
                cmap_attempted = true;
                progress = true;
                match directory.table_data(self.data, CMAP_TAG) {
                    Some(table_data) => match Cmap::parse(table_data) {
                        Ok(t) => self.cmap = Some(t),
                        Err(e) => {
                            warn!("cmap failed to load: {}", e);
                            self.cmap_result = e;
                        }
                    },
                    None => self.cmap_result = TableResult::FailedFindTable,
                }
            }

            if !hhea_attempted && maxp_attempted {
                hhea_attempted = true;
                progress = true;
                match self.maxp {
                    Some(ref maxp) => match directory.table_data(self.data, HHEA_TAG) {
                        Some(table_data) => match Hhea::parse(table_data, maxp) {
                            Ok(t) => self.hhea = Some(t),
                            Err(e) => {
                                warn!("hhea failed to load: {}", e);
                                self.hhea_result = e;
                            }
                        },
                        None => self.hhea_result = TableResult::FailedFindTable,
                    },
                    None => self.hhea_result = TableResult::HheaRequiresMaxp,
                }
            }

            if !post_attempted && maxp_attempted {
                post_attempted = true;
                progress = true;
                match self.maxp {
                    Some(ref maxp) => match directory.table_data(self.data, POST_TAG) {
                        Some(table_data) => match Post::parse(table_data, maxp) {
                            Ok(t) => self.post = Some(t),
                            Err(e) => {
                                warn!("post failed to load: {}", e);
                                self.post_result = e;
                            }
                        },
                        None => self.post_result = TableResult::FailedFindTable,
                    },
                    None => self.post_result = TableResult::PostRequiresMaxp,
                }
            }

            if !loca_attempted && maxp_attempted && head_attempted {
                loca_attempted = true;
                progress = true;
                match (&self.maxp, &self.head) {
                    (Some(maxp), Some(head)) => {
                        match directory.table_data(self.data, LOCA_TAG) {
                            Some(table_data) => {
                                match Loca::parse(table_data, maxp, head.index_to_loc_format) {
                                    Ok(t) => self.loca = Some(t),
                                    Err(e) => {
                                        warn!("loca failed to load: {}", e);
                                        self.loca_result = e;
                                    }
                                }
                            }
                            None => self.loca_result = TableResult::FailedFindTable,
                        }
                    }
                    (None, _) => self.loca_result = TableResult::LocaRequiresMaxp,
                    (_, None) => self.loca_result = TableResult::LocaRequiresHead,
                }
            }

            if !hmtx_attempted && maxp_attempted && hhea_attempted {
                hmtx_attempted = true;
                progress = true;
                match (&self.maxp, &self.hhea) {
                    (Some(maxp), Some(hhea)) => {
                        match directory.table_data(self.data, HMTX_TAG) {
                            Some(table_data) => match Hmtx::parse(table_data, maxp, hhea) {
                                Ok(t) => self.hmtx = Some(t),
                                Err(e) => {
                                    warn!("hmtx failed to load: {}", e);
                                    self.hmtx_result = e;
                                }
                            },
                            None => self.hmtx_result = TableResult::FailedFindTable,
                        }
                    }
                    (None, _) => self.hmtx_result = TableResult::HmtxRequiresMaxp,
                    (_, None) => self.hmtx_result = TableResult::HmtxRequiresHhea,
                }
            }

            if !glyf_attempted && loca_attempted {
                glyf_attempted = true;
                progress = true;
                match &self.loca {
                    Some(loca) => match directory.table_data(self.data, GLYF_TAG) {
                        Some(table_data) => {
                            let end = loca.end_offset().unwrap_or(0) as usize;
                            if end <= table_data.len() {
                                self.glyf = Some(table_data);
                            } else {
                                warn!("loca's final offset runs past the end of glyf");
                                self.glyf_result = TableResult::InvalidLocaOffset;
                            }
                        }
                        None => self.glyf_result = TableResult::FailedFindTable,
                    },
                    None => self.glyf_result = TableResult::GlyfRequiresLoca,
                }
            }

            if !progress {
                break;
            }
        }
    }

    /// Looks up the glyph ID a Unicode codepoint maps to, via `cmap`.
    pub fn glyph_index(&self, c: char) -> Option<GlyphId> {
        self.cmap.as_ref()?.glyph_index(c as u32).ok()?.map(GlyphId)
    }

    /// The font's units-per-em value, from `head`.
    pub fn units_per_em(&self) -> Option<u16> {
        self.head.map(|h| h.units_per_em)
    }

    /// Total number of glyphs in the font, from `maxp`.
    pub fn number_of_glyphs(&self) -> Option<u16> {
        self.maxp.map(|m| m.num_glyphs)
    }

    /// Typographic ascender, from `hhea`.
    pub fn ascender(&self) -> Option<i16> {
        self.hhea.map(|h| h.ascender)
    }

    /// Typographic descender, from `hhea`.
    pub fn descender(&self) -> Option<i16> {
        self.hhea.map(|h| h.descender)
    }

    /// Typographic line gap, from `hhea`.
    pub fn line_gap(&self) -> Option<i16> {
        self.hhea.map(|h| h.line_gap)
    }

    /// The underline position and thickness, from `post`.
    pub fn underline_metrics(&self) -> Option<LineMetrics> {
        self.post.as_ref().map(|p| p.underline)
    }

    /// The glyph name for `glyph_id`, from `post` (version 2.0 only).
    pub fn glyph_name(&self, glyph_id: GlyphId) -> Option<&'a str> {
        self.post.as_ref()?.glyph_name(glyph_id.0)
    }

    /// The font's family name (Windows/Unicode platform), from `name`.
    #[cfg(feature = "std")]
    pub fn family_name(&self) -> Option<std::string::String> {
        self.name.as_ref()?.find(name_id::FONT_FAMILY)
    }

    /// The font's PostScript name (Windows/Unicode platform), from `name`.
    #[cfg(feature = "std")]
    pub fn post_script_name(&self) -> Option<std::string::String> {
        self.name.as_ref()?.find(name_id::POSTSCRIPT)
    }

    /// A glyph's horizontal advance width, from `hmtx`.
    pub fn glyph_hor_advance(&self, glyph_id: GlyphId) -> Option<u16> {
        Some(self.hmtx.as_ref()?.metrics(glyph_id.0)?.advance_width)
    }

    /// A glyph's horizontal left side bearing, from `hmtx`.
    pub fn glyph_hor_side_bearing(&self, glyph_id: GlyphId) -> Option<i16> {
        Some(self.hmtx.as_ref()?.metrics(glyph_id.0)?.lsb)
    }

    /// Returns the raw `glyf` byte range for `glyph_id`, or `None` if the
    /// glyph has no outline (a normal state, not an error) or the required
    /// tables are unavailable.
    fn glyph_data(&self, glyph_id: GlyphId) -> Result<Option<&'a [u8]>> {
        let maxp = self.maxp.ok_or(TableResult::InvalidGlyfGlyphId)?;
        if glyph_id.0 as u32 >= maxp.num_glyphs as u32 {
            return Err(TableResult::InvalidGlyfGlyphId);
        }

        let loca = self.loca.as_ref().ok_or(TableResult::GlyfRequiresLoca)?;
        let glyf = self.glyf.ok_or(TableResult::GlyfRequiresLoca)?;

        match loca.glyph_range(glyph_id.0) {
            Some(range) => Ok(glyf.get(range)),
            None => Ok(None),
        }
    }

    /// Outlines a glyph into `builder`, applying composite resolution and
    /// `scale`, and returns its tight pixel-space bounding box.
    ///
    /// Returns `Ok` with an empty (zero-area) `Rect` for a glyph with no
    /// outline (e.g. `space`).
    #[cfg(feature = "std")]
    pub fn outline_glyph(
        &self,
        glyph_id: GlyphId,
        builder: &mut dyn OutlineBuilder,
        scale: GlyphScale,
    ) -> Result<Rect> {
        let ready = self.glyph_contours(glyph_id, scale)?;
        outline::replay(&ready, builder);
        Ok(ready.bbox)
    }

    /// Decodes, flattens, and scales a glyph's outline without pushing
    /// through an [`OutlineBuilder`] — for callers who want the point data
    /// directly.
    #[cfg(feature = "std")]
    pub fn glyph_contours(&self, glyph_id: GlyphId, scale: GlyphScale) -> Result<ReadyGlyph> {
        let units_per_em = self.head.ok_or(TableResult::GlyfRequiresLoca)?.units_per_em;
        let maxp = self.maxp.ok_or(TableResult::InvalidGlyfGlyphId)?;
        let loca = self.loca.as_ref().ok_or(TableResult::GlyfRequiresLoca)?;
        let glyf = self.glyf.ok_or(TableResult::GlyfRequiresLoca)?;

        let glyph_data = match self.glyph_data(glyph_id)? {
            Some(data) => data,
            None => return Ok(ReadyGlyph::default()),
        };

        outline::decode_scaled(glyph_data, glyf, loca, &maxp, units_per_em, scale)
    }
}

impl core::fmt::Debug for Font<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Font {{ .. }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_input() {
        assert!(matches!(
            Font::parse(&[], LoadFlags::REQUIRED),
            Err(TableResult::InvalidDirectoryLength)
        ));
    }

    #[test]
    fn rejects_wrong_sfnt_version() {
        let mut data = vec![0u8; 12];
        data[0..4].copy_from_slice(b"OTTO");
        assert!(matches!(
            Font::parse(&data, LoadFlags::REQUIRED),
            Err(TableResult::InvalidDirectorySfntVersion)
        ));
    }

    #[test]
    fn rejects_too_few_tables() {
        let mut data = vec![0u8; 12];
        data[0..4].copy_from_slice(&SFNT_VERSION_TRUE_TYPE.to_be_bytes());
        data[4..6].copy_from_slice(&3u16.to_be_bytes());
        assert!(matches!(
            Font::parse(&data, LoadFlags::REQUIRED),
            Err(TableResult::InvalidDirectoryNumTables)
        ));
    }

    #[test]
    fn load_flags_required_equals_all() {
        assert_eq!(LoadFlags::REQUIRED, LoadFlags::ALL);
        assert!(LoadFlags::REQUIRED.contains(LoadFlags::GLYF));
    }
}
