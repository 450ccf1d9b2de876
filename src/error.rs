//! The result taxonomy returned by every table loader and glyph operation.
//!
//! Every fallible operation in this crate returns a [`TableResult`] rather
//! than an `Option`, so a caller always gets a named reason for a parse
//! failure instead of a bare absence. The numeric discriminants are not
//! meaningful in Rust (nothing here is FFI'd across a C boundary), but they
//! are kept stable and grouped by table the way the reference numbering
//! grouped them, since that grouping is what a reader of error logs across
//! many fonts will pattern-match against.

/// Every way a table, directory, or glyph can fail to load.
///
/// Only [`TableResult::Success`] is non-fatal to the table it was returned
/// for; see [`TableResult::is_fatal`]. A fatal result for one table does not
/// necessarily prevent the rest of the font from loading — see the
/// per-table independence rules on [`crate::Font::parse`].
///
/// `Display` and `name()` are hand-written rather than derived: a
/// `thiserror`-style derive pulls in `std::error::Error` unconditionally,
/// which would defeat this crate's `#![no_std]` core (only the `std` feature
/// gates anything on the standard library actually being linked).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableResult {
    /// The operation completed without error.
    Success,

    // -- general --
    /// An allocation failed. Only returned by operations that allocate
    /// owned storage (e.g. `name`'s UTF-8 copies, `post` glyph names).
    FailedMalloc,
    /// A growable allocation failed to grow.
    FailedRealloc,
    /// The requested table tag is not present in the font's directory.
    FailedFindTable,

    // -- directory (64-71) --
    /// The file is too short to hold a table directory header.
    InvalidDirectoryLength,
    /// The sfnt version field is not `0x00010000`.
    InvalidDirectorySfntVersion,
    /// `numTables` would make the table record array run past the file.
    InvalidDirectoryNumTables,
    /// A table record's offset lies outside the file.
    InvalidDirectoryRecordOffset,
    /// A table record's length would run the table past the end of the file.
    InvalidDirectoryRecordLength,
    /// A table's computed checksum does not match its recorded checksum.
    InvalidDirectoryRecordChecksum,
    /// Two table records share the same tag.
    InvalidDirectoryRecordTableTag,
    /// A table required by the requested load flags is absent.
    MissingDirectoryRecordTableTags,

    // -- maxp (128-131) --
    /// The `maxp` table is too short for its declared version.
    InvalidMaxpLength,
    /// `maxp`'s version is not `1.0` (version `0.5` marks a CFF outline set
    /// and is rejected).
    InvalidMaxpVersion,
    /// `maxp.numGlyphs` is less than `2`.
    InvalidMaxpNumGlyphs,
    /// `maxp.maxZones` is neither `1` nor `2`.
    InvalidMaxpMaxZones,

    // -- head (192-203) --
    /// The `head` table is too short.
    InvalidHeadLength,
    /// `head`'s version is not `1.0`.
    InvalidHeadVersion,
    /// `head.magicNumber` is not `0x5F0F3CF5`.
    InvalidHeadMagicNumber,
    /// `head.unitsPerEm` is outside `16..=16384`.
    InvalidHeadUnitsPerEm,
    /// `head.xMin` is outside `-16384..=16383`.
    InvalidHeadXMinCoordinates,
    /// `head.yMin` is outside `-16384..=16383`.
    InvalidHeadYMinCoordinates,
    /// `head.xMax` is outside `-16384..=16383`.
    InvalidHeadXMaxCoordinates,
    /// `head.yMax` is outside `-16384..=16383`.
    InvalidHeadYMaxCoordinates,
    /// `head.xMin` is greater than `head.xMax`.
    InvalidHeadXMinMax,
    /// `head.yMin` is greater than `head.yMax`.
    InvalidHeadYMinMax,
    /// `head.indexToLocFormat` is neither `0` nor `1`.
    InvalidHeadIndexToLocFormat,
    /// `head.glyphDataFormat` is not `0`.
    InvalidHeadGlyphDataFormat,

    // -- hhea (256-260) --
    /// The `hhea` table is too short.
    InvalidHheaLength,
    /// `hhea`'s version is not `1.0`.
    InvalidHheaVersion,
    /// `hhea.metricDataFormat` is not `0`.
    InvalidHheaMetricDataFormat,
    /// `hhea.numberOfHMetrics` exceeds `maxp.numGlyphs`.
    InvalidHheaNumberOfHMetrics,
    /// `hhea` was requested without also requesting `maxp`.
    HheaRequiresMaxp,

    // -- hmtx (320-322) --
    /// The `hmtx` table is shorter than `hhea` and `maxp` require.
    InvalidHmtxLength,
    /// `hmtx` was requested without also requesting `maxp`.
    HmtxRequiresMaxp,
    /// `hmtx` was requested without also requesting `hhea`.
    HmtxRequiresHhea,

    // -- loca (284-287) --
    /// The `loca` table is shorter than `maxp.numGlyphs` requires.
    InvalidLocaLength,
    /// An offset in `loca` is not monotonically non-decreasing, or runs
    /// past the `glyf` table.
    InvalidLocaOffset,
    /// `loca` was requested without also requesting `maxp`.
    LocaRequiresMaxp,
    /// `loca` was requested without also requesting `head`.
    LocaRequiresHead,

    // -- name (448-451) --
    /// The `name` table is too short for its declared record count.
    InvalidNameLength,
    /// `name`'s format is neither `0` nor `1`.
    InvalidNameVersion,
    /// A name record's string offset lies outside the storage area.
    InvalidNameStorageOffset,
    /// A name record's declared length runs its string past storage.
    InvalidNameLengthOffset,

    // -- glyf --
    /// `loca`'s range for this glyph ID is empty; the glyph has no outline
    /// (this is a normal, expected state for space-like glyphs).
    GlyfEmptyGlyph,
    /// The glyph ID is not less than `maxp.numGlyphs`.
    InvalidGlyfGlyphId,
    /// The glyph's number of contours exceeds what a `i16` can represent as
    /// positive (simple) or the composite sentinel (negative).
    InvalidGlyfNumberOfContours,
    /// A simple glyph's flag or coordinate stream ran past its table slice.
    InvalidGlyfSimpleGlyphData,
    /// A simple glyph's point count (largest endpoint plus one) exceeds
    /// `maxp.maxPoints`.
    InvalidGlyfPointCount,
    /// A composite glyph's component stream ran past its table slice, or a
    /// component referenced a glyph ID out of range.
    InvalidGlyfCompositeGlyphData,
    /// A composite component's `ARGS_ARE_XY_VALUES` flag is clear, meaning
    /// the args name matched points to align rather than an (x, y)
    /// translation — recognized but not resolved into geometry.
    GlyfUnsupportedMatchedPoints,
    /// Composite component recursion exceeded the configured depth bound.
    GlyfCompositeDepthExceeded,
    /// `glyf` was requested without also requesting `loca`.
    GlyfRequiresLoca,

    // -- cmap --
    /// The `cmap` table is too short for its header.
    InvalidCmapLength,
    /// No Unicode-mapping subtable could be found among the encoding
    /// records.
    CmapNoUsableSubtable,
    /// A subtable declared a format this crate recognizes by number but does
    /// not decode (2, 8, 10, 13, or 14).
    CmapUnsupportedFormat,
    /// A subtable's internal arrays ran past its declared length.
    InvalidCmapSubtableData,

    // -- post --
    /// The `post` table is too short for its declared version.
    InvalidPostLength,
    /// `post`'s version is not one of `1.0`, `2.0`, `2.5`, or `3.0`.
    InvalidPostVersion,
    /// A version 2.0 glyph name index or Pascal string ran past storage.
    InvalidPostGlyphNameData,
    /// `post` was requested without also requesting `maxp`.
    PostRequiresMaxp,
}

impl TableResult {
    /// Returns whether this result represents a failure.
    ///
    /// Every variant other than [`TableResult::Success`] is fatal to the
    /// operation that produced it — this mirrors the reference library's
    /// rule that only the single success code is non-fatal. Fatal is scoped
    /// to the operation, not the whole font: a fatal `glyf` result for one
    /// glyph ID does not invalidate glyphs already decoded from the same
    /// font.
    #[inline]
    pub fn is_fatal(self) -> bool {
        !matches!(self, TableResult::Success)
    }

    /// The symbolic, `SCREAMING_CASE`-free name of this result, stable
    /// across versions and suitable for log correlation.
    pub fn name(self) -> &'static str {
        use TableResult::*;
        match self {
            Success => "Success",
            FailedMalloc => "FailedMalloc",
            FailedRealloc => "FailedRealloc",
            FailedFindTable => "FailedFindTable",
            InvalidDirectoryLength => "InvalidDirectoryLength",
            InvalidDirectorySfntVersion => "InvalidDirectorySfntVersion",
            InvalidDirectoryNumTables => "InvalidDirectoryNumTables",
            InvalidDirectoryRecordOffset => "InvalidDirectoryRecordOffset",
            InvalidDirectoryRecordLength => "InvalidDirectoryRecordLength",
            InvalidDirectoryRecordChecksum => "InvalidDirectoryRecordChecksum",
            InvalidDirectoryRecordTableTag => "InvalidDirectoryRecordTableTag",
            MissingDirectoryRecordTableTags => "MissingDirectoryRecordTableTags",
            InvalidMaxpLength => "InvalidMaxpLength",
            InvalidMaxpVersion => "InvalidMaxpVersion",
            InvalidMaxpNumGlyphs => "InvalidMaxpNumGlyphs",
            InvalidMaxpMaxZones => "InvalidMaxpMaxZones",
            InvalidHeadLength => "InvalidHeadLength",
            InvalidHeadVersion => "InvalidHeadVersion",
            InvalidHeadMagicNumber => "InvalidHeadMagicNumber",
            InvalidHeadUnitsPerEm => "InvalidHeadUnitsPerEm",
            InvalidHeadXMinCoordinates => "InvalidHeadXMinCoordinates",
            InvalidHeadYMinCoordinates => "InvalidHeadYMinCoordinates",
            InvalidHeadXMaxCoordinates => "InvalidHeadXMaxCoordinates",
            InvalidHeadYMaxCoordinates => "InvalidHeadYMaxCoordinates",
            InvalidHeadXMinMax => "InvalidHeadXMinMax",
            InvalidHeadYMinMax => "InvalidHeadYMinMax",
            InvalidHeadIndexToLocFormat => "InvalidHeadIndexToLocFormat",
            InvalidHeadGlyphDataFormat => "InvalidHeadGlyphDataFormat",
            InvalidHheaLength => "InvalidHheaLength",
            InvalidHheaVersion => "InvalidHheaVersion",
            InvalidHheaMetricDataFormat => "InvalidHheaMetricDataFormat",
            InvalidHheaNumberOfHMetrics => "InvalidHheaNumberOfHMetrics",
            HheaRequiresMaxp => "HheaRequiresMaxp",
            InvalidHmtxLength => "InvalidHmtxLength",
            HmtxRequiresMaxp => "HmtxRequiresMaxp",
            HmtxRequiresHhea => "HmtxRequiresHhea",
            InvalidLocaLength => "InvalidLocaLength",
            InvalidLocaOffset => "InvalidLocaOffset",
            LocaRequiresMaxp => "LocaRequiresMaxp",
            LocaRequiresHead => "LocaRequiresHead",
            InvalidNameLength => "InvalidNameLength",
            InvalidNameVersion => "InvalidNameVersion",
            InvalidNameStorageOffset => "InvalidNameStorageOffset",
            InvalidNameLengthOffset => "InvalidNameLengthOffset",
            GlyfEmptyGlyph => "GlyfEmptyGlyph",
            InvalidGlyfGlyphId => "InvalidGlyfGlyphId",
            InvalidGlyfNumberOfContours => "InvalidGlyfNumberOfContours",
            InvalidGlyfSimpleGlyphData => "InvalidGlyfSimpleGlyphData",
            InvalidGlyfPointCount => "InvalidGlyfPointCount",
            InvalidGlyfCompositeGlyphData => "InvalidGlyfCompositeGlyphData",
            GlyfUnsupportedMatchedPoints => "GlyfUnsupportedMatchedPoints",
            GlyfCompositeDepthExceeded => "GlyfCompositeDepthExceeded",
            GlyfRequiresLoca => "GlyfRequiresLoca",
            InvalidCmapLength => "InvalidCmapLength",
            CmapNoUsableSubtable => "CmapNoUsableSubtable",
            CmapUnsupportedFormat => "CmapUnsupportedFormat",
            InvalidCmapSubtableData => "InvalidCmapSubtableData",
            InvalidPostLength => "InvalidPostLength",
            InvalidPostVersion => "InvalidPostVersion",
            InvalidPostGlyphNameData => "InvalidPostGlyphNameData",
            PostRequiresMaxp => "PostRequiresMaxp",
        }
    }
}

/// A convenience alias for results returned by table loaders and glyph
/// operations.
pub type Result<T> = core::result::Result<T, TableResult>;

impl core::fmt::Display for TableResult {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use TableResult::*;
        let message = match *self {
            Success => "success",
            FailedMalloc => "allocation failed",
            FailedRealloc => "reallocation failed",
            FailedFindTable => "table not found",
            InvalidDirectoryLength => "directory: file too short for a directory header",
            InvalidDirectorySfntVersion => "directory: unrecognized sfnt version",
            InvalidDirectoryNumTables => "directory: numTables overruns the file",
            InvalidDirectoryRecordOffset => "directory: table record offset out of range",
            InvalidDirectoryRecordLength => "directory: table record length out of range",
            InvalidDirectoryRecordChecksum => "directory: table checksum mismatch",
            InvalidDirectoryRecordTableTag => "directory: duplicate table tag",
            MissingDirectoryRecordTableTags => "directory: a required table tag is missing",
            InvalidMaxpLength => "maxp: table too short",
            InvalidMaxpVersion => "maxp: unrecognized version",
            InvalidMaxpNumGlyphs => "maxp: numGlyphs is below 2",
            InvalidMaxpMaxZones => "maxp: maxZones out of range",
            InvalidHeadLength => "head: table too short",
            InvalidHeadVersion => "head: unrecognized version",
            InvalidHeadMagicNumber => "head: bad magic number",
            InvalidHeadUnitsPerEm => "head: unitsPerEm out of range",
            InvalidHeadXMinCoordinates => "head: xMin out of range",
            InvalidHeadYMinCoordinates => "head: yMin out of range",
            InvalidHeadXMaxCoordinates => "head: xMax out of range",
            InvalidHeadYMaxCoordinates => "head: yMax out of range",
            InvalidHeadXMinMax => "head: xMin exceeds xMax",
            InvalidHeadYMinMax => "head: yMin exceeds yMax",
            InvalidHeadIndexToLocFormat => "head: indexToLocFormat out of range",
            InvalidHeadGlyphDataFormat => "head: glyphDataFormat is not 0",
            InvalidHheaLength => "hhea: table too short",
            InvalidHheaVersion => "hhea: unrecognized version",
            InvalidHheaMetricDataFormat => "hhea: metricDataFormat is not 0",
            InvalidHheaNumberOfHMetrics => "hhea: numberOfHMetrics exceeds numGlyphs",
            HheaRequiresMaxp => "hhea: requires maxp",
            InvalidHmtxLength => "hmtx: table too short",
            HmtxRequiresMaxp => "hmtx: requires maxp",
            HmtxRequiresHhea => "hmtx: requires hhea",
            InvalidLocaLength => "loca: table too short",
            InvalidLocaOffset => "loca: offset out of range or non-monotonic",
            LocaRequiresMaxp => "loca: requires maxp",
            LocaRequiresHead => "loca: requires head",
            InvalidNameLength => "name: table too short",
            InvalidNameVersion => "name: unrecognized version",
            InvalidNameStorageOffset => "name: string offset out of range",
            InvalidNameLengthOffset => "name: string length out of range",
            GlyfEmptyGlyph => "glyf: glyph has no outline",
            InvalidGlyfGlyphId => "glyf: glyph id out of range",
            InvalidGlyfNumberOfContours => "glyf: invalid number of contours",
            InvalidGlyfSimpleGlyphData => "glyf: malformed simple glyph data",
            InvalidGlyfPointCount => "glyf: point count exceeds maxp.maxPoints",
            InvalidGlyfCompositeGlyphData => "glyf: malformed composite glyph data",
            GlyfUnsupportedMatchedPoints => "glyf: matched-point component alignment is unsupported",
            GlyfCompositeDepthExceeded => "glyf: composite component depth exceeded",
            GlyfRequiresLoca => "glyf: requires loca",
            InvalidCmapLength => "cmap: table too short",
            CmapNoUsableSubtable => "cmap: no usable subtable found",
            CmapUnsupportedFormat => "cmap: recognized but unsupported subtable format",
            InvalidCmapSubtableData => "cmap: malformed subtable data",
            InvalidPostLength => "post: table too short",
            InvalidPostVersion => "post: unrecognized version",
            InvalidPostGlyphNameData => "post: malformed glyph name data",
            PostRequiresMaxp => "post: requires maxp",
        };
        f.write_str(message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TableResult {}
