// https://docs.microsoft.com/en-us/typography/opentype/spec/post

use crate::error::{Result, TableResult};
use crate::maxp::Maxp;
use crate::parser::{Fixed, LazyArray, Stream};

const TABLE_SIZE: usize = 32;
const ITALIC_ANGLE_OFFSET: usize = 4;
const UNDERLINE_POSITION_OFFSET: usize = 8;
const UNDERLINE_THICKNESS_OFFSET: usize = 10;
const IS_FIXED_PITCH_OFFSET: usize = 12;

/// Number of entries in the standard Macintosh glyph-name order, independent
/// of whether [`MACINTOSH_NAMES`] itself was compiled in.
const STANDARD_MACINTOSH_NAME_COUNT: usize = 258;

// https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6post.html
#[cfg(feature = "glyph-names")]
const MACINTOSH_NAMES: &[&str] = &[
    ".notdef", ".null", "nonmarkingreturn", "space", "exclam", "quotedbl",
    "numbersign", "dollar", "percent", "ampersand", "quotesingle", "parenleft",
    "parenright", "asterisk", "plus", "comma", "hyphen", "period", "slash",
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight",
    "nine", "colon", "semicolon", "less", "equal", "greater", "question", "at",
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O",
    "P", "Q", "R", "S", "T", "U", "V", "W", "X", "Y", "Z", "bracketleft",
    "backslash", "bracketright", "asciicircum", "underscore", "grave", "a",
    "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p",
    "q", "r", "s", "t", "u", "v", "w", "x", "y", "z", "braceleft", "bar",
    "braceright", "asciitilde", "Adieresis", "Aring", "Ccedilla", "Eacute",
    "Ntilde", "Odieresis", "Udieresis", "aacute", "agrave", "acircumflex",
    "adieresis", "atilde", "aring", "ccedilla", "eacute", "egrave",
    "ecircumflex", "edieresis", "iacute", "igrave", "icircumflex",
    "idieresis", "ntilde", "oacute", "ograve", "ocircumflex", "odieresis",
    "otilde", "uacute", "ugrave", "ucircumflex", "udieresis", "dagger",
    "degree", "cent", "sterling", "section", "bullet", "paragraph",
    "germandbls", "registered", "copyright", "trademark", "acute",
    "dieresis", "notequal", "AE", "Oslash", "infinity", "plusminus",
    "lessequal", "greaterequal", "yen", "mu", "partialdiff", "summation",
    "product", "pi", "integral", "ordfeminine", "ordmasculine", "Omega",
    "ae", "oslash", "questiondown", "exclamdown", "logicalnot", "radical",
    "florin", "approxequal", "Delta", "guillemotleft", "guillemotright",
    "ellipsis", "nonbreakingspace", "Agrave", "Atilde", "Otilde", "OE", "oe",
    "endash", "emdash", "quotedblleft", "quotedblright", "quoteleft",
    "quoteright", "divide", "lozenge", "ydieresis", "Ydieresis", "fraction",
    "currency", "guilsinglleft", "guilsinglright", "fi", "fl", "daggerdbl",
    "periodcentered", "quotesinglbase", "quotedblbase", "perthousand",
    "Acircumflex", "Ecircumflex", "Aacute", "Edieresis", "Egrave", "Iacute",
    "Icircumflex", "Idieresis", "Igrave", "Oacute", "Ocircumflex", "apple",
    "Ograve", "Uacute", "Ucircumflex", "Ugrave", "dotlessi", "circumflex",
    "tilde", "macron", "breve", "dotaccent", "ring", "cedilla",
    "hungarumlaut", "ogonek", "caron", "Lslash", "lslash", "Scaron",
    "scaron", "Zcaron", "zcaron", "brokenbar", "Eth", "eth", "Yacute",
    "yacute", "Thorn", "thorn", "minus", "multiply", "onesuperior",
    "twosuperior", "threesuperior", "onehalf", "onequarter",
    "threequarters", "franc", "Gbreve", "gbreve", "Idotaccent", "Scedilla",
    "scedilla", "Cacute", "cacute", "Ccaron", "ccaron", "dcroat",
];

/// Underline placement metrics, shared with `hhea`'s notion of a line
/// metric but specific to the `post` table's fields.
#[derive(Clone, Copy, Debug)]
pub struct LineMetrics {
    pub position: i16,
    pub thickness: i16,
}

/// The glyph-naming and hinting-metadata table.
///
/// Version 2.0 carries a per-glyph name index array: indices `0..258` name
/// the glyph using the [`MACINTOSH_NAMES`] standard order, indices `258..`
/// index (after subtracting 258) into a trailing array of Pascal strings.
/// Versions 1.0 and 3.0 carry no per-glyph name arrays; 1.0 implies the
/// standard Macintosh glyph order outright, 3.0 means no names are given.
#[derive(Clone, Copy)]
pub struct Post<'a> {
    pub italic_angle: f32,
    pub underline: LineMetrics,
    pub is_fixed_pitch: bool,
    version: u32,
    name_indexes: LazyArray<'a, u16>,
    names: &'a [u8],
}

impl<'a> Post<'a> {
    pub(crate) fn parse(data: &'a [u8], maxp: &Maxp) -> Result<Self> {
        if data.len() < TABLE_SIZE {
            return Err(TableResult::InvalidPostLength);
        }

        let version: u32 = Stream::new(data).read().ok_or(TableResult::InvalidPostLength)?;
        if !matches!(version, 0x0001_0000 | 0x0002_0000 | 0x0002_5000 | 0x0003_0000) {
            return Err(TableResult::InvalidPostVersion);
        }

        let italic_angle = Stream::read_at::<Fixed>(data, ITALIC_ANGLE_OFFSET)
            .ok_or(TableResult::InvalidPostLength)?
            .0;
        let underline = LineMetrics {
            position: Stream::read_at::<i16>(data, UNDERLINE_POSITION_OFFSET)
                .ok_or(TableResult::InvalidPostLength)?,
            thickness: Stream::read_at::<i16>(data, UNDERLINE_THICKNESS_OFFSET)
                .ok_or(TableResult::InvalidPostLength)?,
        };
        let is_fixed_pitch = Stream::read_at::<u32>(data, IS_FIXED_PITCH_OFFSET)
            .ok_or(TableResult::InvalidPostLength)?
            != 0;

        let mut name_indexes = LazyArray::default();
        let mut names: &[u8] = &[];

        if version == 0x0002_0000 {
            let mut s = Stream::new_at(data, TABLE_SIZE).ok_or(TableResult::InvalidPostLength)?;
            let count: u16 = s.read().ok_or(TableResult::InvalidPostLength)?;
            if count as u32 > maxp.num_glyphs as u32 {
                return Err(TableResult::InvalidPostGlyphNameData);
            }
            name_indexes = s
                .read_array::<u16>(count as u32)
                .ok_or(TableResult::InvalidPostGlyphNameData)?;
            names = s.tail().ok_or(TableResult::InvalidPostGlyphNameData)?;
        }

        let table = Post {
            italic_angle,
            underline,
            is_fixed_pitch,
            version,
            name_indexes,
            names,
        };
        table.validate_name_indexes()?;
        Ok(table)
    }

    fn validate_name_indexes(&self) -> Result<()> {
        if self.version != 0x0002_0000 {
            return Ok(());
        }
        for index in self.name_indexes {
            if (index as usize) < STANDARD_MACINTOSH_NAME_COUNT {
                continue;
            }
            let pascal_index = index - STANDARD_MACINTOSH_NAME_COUNT as u16;
            self.find_pascal_string(pascal_index)
                .ok_or(TableResult::InvalidPostGlyphNameData)?;
        }
        Ok(())
    }

    fn find_pascal_string(&self, target_index: u16) -> Option<&'a str> {
        let mut s = Stream::new(self.names);
        let mut i = 0u16;
        while !s.at_end() {
            let len: u8 = s.read()?;
            if i == target_index {
                let bytes = s.read_bytes(len as usize)?;
                return core::str::from_utf8(bytes).ok();
            }
            s.advance(len as usize);
            i += 1;
        }
        None
    }

    /// Returns the glyph name for `glyph_id`, if this table carries names.
    ///
    /// Always `None` for versions other than 2.0. A name indexing into the
    /// standard Macintosh order additionally requires the `glyph-names`
    /// feature; without it, only custom (Pascal-string) names resolve.
    pub fn glyph_name(&self, glyph_id: u16) -> Option<&'a str> {
        let index = self.name_indexes.get(glyph_id as u32)?;
        if (index as usize) < STANDARD_MACINTOSH_NAME_COUNT {
            #[cfg(feature = "glyph-names")]
            {
                Some(MACINTOSH_NAMES[index as usize])
            }
            #[cfg(not(feature = "glyph-names"))]
            {
                None
            }
        } else {
            self.find_pascal_string(index - STANDARD_MACINTOSH_NAME_COUNT as u16)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    fn maxp(num_glyphs: u16) -> Maxp {
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

    fn header(version: u32) -> Vec<u8> {
        let mut d = vec![0u8; TABLE_SIZE];
        d[0..4].copy_from_slice(&version.to_be_bytes());
        d
    }

    #[test]
    fn version_one_has_no_name_table() {
        let data = header(0x0001_0000);
        let post = Post::parse(&data, &maxp(3)).unwrap();
        assert_eq!(post.glyph_name(0), None);
    }

    #[test]
    fn version_two_resolves_standard_name() {
        let mut data = header(0x0002_0000);
        data.extend_from_slice(&1u16.to_be_bytes()); // numberOfGlyphs
        data.extend_from_slice(&3u16.to_be_bytes()); // index 3 -> "space"
        let post = Post::parse(&data, &maxp(1)).unwrap();
        assert_eq!(post.glyph_name(0), Some("space"));
    }

    #[test]
    fn version_two_resolves_pascal_string() {
        let mut data = header(0x0002_0000);
        data.extend_from_slice(&1u16.to_be_bytes());
        let custom_index = MACINTOSH_NAMES.len() as u16; // first pascal-string slot
        data.extend_from_slice(&custom_index.to_be_bytes());
        data.push(5); // pascal length
        data.extend_from_slice(b"Hello");
        let post = Post::parse(&data, &maxp(1)).unwrap();
        assert_eq!(post.glyph_name(0), Some("Hello"));
    }

    #[test]
    fn rejects_unrecognized_version() {
        let data = header(0x0004_0000);
        assert!(matches!(Post::parse(&data, &maxp(1)), Err(TableResult::InvalidPostVersion)));
    }
}
