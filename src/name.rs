// https://docs.microsoft.com/en-us/typography/opentype/spec/name

use crate::error::{Result, TableResult};
use crate::parser::{FromData, LazyArray, Stream};

#[cfg(feature = "std")]
use std::string::String;
#[cfg(feature = "std")]
use std::vec::Vec;

/// Well-known platform IDs, per the OpenType `name` table spec.
pub mod platform_id {
    pub const UNICODE: u16 = 0;
    pub const MACINTOSH: u16 = 1;
    pub const ISO: u16 = 2;
    pub const WINDOWS: u16 = 3;
    pub const CUSTOM: u16 = 4;
}

/// Well-known name IDs.
pub mod name_id {
    pub const COPYRIGHT_NOTICE: u16 = 0;
    pub const FONT_FAMILY: u16 = 1;
    pub const FONT_SUBFAMILY: u16 = 2;
    pub const FONT_IDENTIFIER: u16 = 3;
    pub const FONT_FULL: u16 = 4;
    pub const VERSION: u16 = 5;
    pub const POSTSCRIPT: u16 = 6;
    pub const TYPOGRAPHIC_FAMILY: u16 = 16;
    pub const TYPOGRAPHIC_SUBFAMILY: u16 = 17;
}

/// A single entry of the naming table: which (platform, encoding, language,
/// meaning) a string is for, plus the byte range of the string itself
/// within the table's storage area.
#[derive(Clone, Copy, Debug)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    length: u16,
    offset: u16,
}

impl FromData for NameRecord {
    const SIZE: usize = 12;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = Stream::new(data);
        NameRecord {
            platform_id: s.read().unwrap(),
            encoding_id: s.read().unwrap(),
            language_id: s.read().unwrap(),
            name_id: s.read().unwrap(),
            length: s.read().unwrap(),
            offset: s.read().unwrap(),
        }
    }
}

/// A language-tag record, present only in `name` table version 1.
#[derive(Clone, Copy, Debug)]
pub struct LangTagRecord {
    length: u16,
    offset: u16,
}

impl FromData for LangTagRecord {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = Stream::new(data);
        LangTagRecord {
            length: s.read().unwrap(),
            offset: s.read().unwrap(),
        }
    }
}

/// The naming table: copyright, family, and other human-readable strings.
#[derive(Clone, Copy)]
pub struct Name<'a> {
    pub records: LazyArray<'a, NameRecord>,
    pub lang_tags: LazyArray<'a, LangTagRecord>,
    storage: &'a [u8],
}

impl<'a> Name<'a> {
    pub(crate) fn parse(data: &'a [u8]) -> Result<Self> {
        let mut s = Stream::new(data);
        let version: u16 = s.read().ok_or(TableResult::InvalidNameLength)?;
        if version != 0 && version != 1 {
            return Err(TableResult::InvalidNameVersion);
        }

        let count: u16 = s.read().ok_or(TableResult::InvalidNameLength)?;
        let storage_offset: u16 = s.read().ok_or(TableResult::InvalidNameLength)?;

        let records = s
            .read_array::<NameRecord>(count as u32)
            .ok_or(TableResult::InvalidNameLength)?;

        let lang_tags = if version == 1 {
            let lang_tag_count: u16 = s.read().ok_or(TableResult::InvalidNameLength)?;
            s.read_array::<LangTagRecord>(lang_tag_count as u32)
                .ok_or(TableResult::InvalidNameLength)?
        } else {
            LazyArray::default()
        };

        let storage = data
            .get(storage_offset as usize..)
            .ok_or(TableResult::InvalidNameStorageOffset)?;

        let name = Name {
            records,
            lang_tags,
            storage,
        };
        name.validate_string_ranges()?;
        Ok(name)
    }

    fn validate_string_ranges(&self) -> Result<()> {
        for record in self.records {
            self.bytes_for(record.offset, record.length)
                .ok_or(TableResult::InvalidNameLengthOffset)?;
        }
        for tag in self.lang_tags {
            self.bytes_for(tag.offset, tag.length)
                .ok_or(TableResult::InvalidNameLengthOffset)?;
        }
        Ok(())
    }

    fn bytes_for(&self, offset: u16, length: u16) -> Option<&'a [u8]> {
        let start = offset as usize;
        let end = start.checked_add(length as usize)?;
        self.storage.get(start..end)
    }

    /// Returns the raw, un-decoded string bytes for a name record.
    pub fn record_bytes(&self, record: &NameRecord) -> &'a [u8] {
        // Already validated in `parse`; safe to unwrap the slice bounds.
        self.bytes_for(record.offset, record.length).unwrap_or(&[])
    }

    /// Decodes a name record's string.
    ///
    /// Unicode and Windows-platform strings are UTF-16BE; every other
    /// platform's encoding is not decoded and this returns `None` (Macintosh
    /// Roman and the other legacy 8-bit encodings are out of scope).
    #[cfg(feature = "std")]
    pub fn record_string(&self, record: &NameRecord) -> Option<String> {
        use self::platform_id::{UNICODE, WINDOWS};
        if record.platform_id != UNICODE && record.platform_id != WINDOWS {
            return None;
        }

        let bytes = self.record_bytes(record);
        if bytes.len() % 2 != 0 {
            return None;
        }

        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        String::from_utf16(&units).ok()
    }

    /// Finds the first record matching `name_id` under the Windows/Unicode
    /// BMP encodings, which is the common case callers want (e.g. resolving
    /// `FONT_FAMILY`).
    #[cfg(feature = "std")]
    pub fn find(&self, name_id: u16) -> Option<String> {
        self.records
            .into_iter()
            .find(|r| r.name_id == name_id && (r.platform_id == platform_id::WINDOWS || r.platform_id == platform_id::UNICODE))
            .and_then(|r| self.record_string(&r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16be(s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(|u| u.to_be_bytes()).collect()
    }

    #[test]
    fn decodes_windows_unicode_string() {
        let string_bytes = utf16be("Test Sans");
        let mut data = Vec::new();
        data.extend_from_slice(&0u16.to_be_bytes()); // version
        data.extend_from_slice(&1u16.to_be_bytes()); // count
        let storage_offset = 6u16 + 12; // header(6) + one record(12)
        data.extend_from_slice(&storage_offset.to_be_bytes());
        data.extend_from_slice(&3u16.to_be_bytes()); // platform: windows
        data.extend_from_slice(&1u16.to_be_bytes()); // encoding: unicode bmp
        data.extend_from_slice(&0x0409u16.to_be_bytes()); // language: en-US
        data.extend_from_slice(&1u16.to_be_bytes()); // nameID: family
        data.extend_from_slice(&(string_bytes.len() as u16).to_be_bytes());
        data.extend_from_slice(&0u16.to_be_bytes()); // string offset within storage
        data.extend_from_slice(&string_bytes);

        let name = Name::parse(&data).unwrap();
        assert_eq!(name.find(name_id::FONT_FAMILY).as_deref(), Some("Test Sans"));
    }

    #[test]
    fn rejects_bad_version() {
        let data = [0u8, 2, 0, 0, 0, 6];
        assert!(matches!(Name::parse(&data), Err(TableResult::InvalidNameVersion)));
    }

    #[test]
    fn rejects_string_range_past_storage() {
        let mut data = Vec::new();
        data.extend_from_slice(&0u16.to_be_bytes());
        data.extend_from_slice(&1u16.to_be_bytes());
        data.extend_from_slice(&18u16.to_be_bytes());
        data.extend_from_slice(&3u16.to_be_bytes());
        data.extend_from_slice(&1u16.to_be_bytes());
        data.extend_from_slice(&0x0409u16.to_be_bytes());
        data.extend_from_slice(&1u16.to_be_bytes());
        data.extend_from_slice(&100u16.to_be_bytes()); // length far exceeds storage
        data.extend_from_slice(&0u16.to_be_bytes());
        assert!(matches!(Name::parse(&data), Err(TableResult::InvalidNameLengthOffset)));
    }
}
