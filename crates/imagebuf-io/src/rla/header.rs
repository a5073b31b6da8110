//! RLA file header
//!
//! The header is a fixed 740-byte big-endian record. Numeric fields are
//! 16-bit signed except the job number and the next-image offset. Text
//! fields are fixed-width, NUL-padded byte arrays.

use crate::{IoError, IoResult};
use imagebuf_core::Metadata;

/// Size of the fixed header in bytes.
pub(crate) const HEADER_SIZE: usize = 740;

/// Revision tag of the supported header layout.
pub(crate) const REVISION: i16 = -2;

/// Byte offset of the revision field.
pub(crate) const REVISION_OFFSET: usize = 26;

/// Channel type tags.
pub(crate) mod channel_type {
    pub const BYTE: i16 = 0;
    pub const WORD: i16 = 1;
    pub const DWORD: i16 = 2;
    pub const FLOAT: i16 = 4;
}

/// A fixed-width text field and the attribute it maps to.
struct TextField {
    offset: usize,
    len: usize,
    key: &'static str,
}

const TEXT_FIELDS: [TextField; 17] = [
    TextField { offset: 28, len: 16, key: "rla:Gamma" },
    TextField { offset: 44, len: 24, key: "rla:RedChroma" },
    TextField { offset: 68, len: 24, key: "rla:GreenChroma" },
    TextField { offset: 92, len: 24, key: "rla:BlueChroma" },
    TextField { offset: 116, len: 24, key: "rla:WhitePoint" },
    TextField { offset: 144, len: 128, key: "rla:FileName" },
    TextField { offset: 272, len: 128, key: "ImageDescription" },
    TextField { offset: 400, len: 64, key: "Software" },
    TextField { offset: 464, len: 32, key: "HostComputer" },
    TextField { offset: 496, len: 32, key: "Artist" },
    TextField { offset: 528, len: 20, key: "DateTime" },
    TextField { offset: 548, len: 24, key: "rla:Aspect" },
    TextField { offset: 572, len: 8, key: "rla:AspectRatio" },
    TextField { offset: 580, len: 32, key: "rla:ColorChannel" },
    TextField { offset: 614, len: 12, key: "rla:Time" },
    TextField { offset: 626, len: 32, key: "rla:Filter" },
    TextField { offset: 668, len: 32, key: "rla:AuxData" },
];

const WINDOW_KEYS: [&str; 4] = [
    "rla:WindowLeft",
    "rla:WindowRight",
    "rla:WindowBottom",
    "rla:WindowTop",
];

/// Inclusive rectangle in RLA's bottom-up coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Bounds {
    pub left: i16,
    pub right: i16,
    pub bottom: i16,
    pub top: i16,
}

impl Bounds {
    pub fn width(&self) -> i32 {
        self.right as i32 - self.left as i32 + 1
    }

    pub fn height(&self) -> i32 {
        self.top as i32 - self.bottom as i32 + 1
    }
}

/// Parsed RLA header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct RlaHeader {
    pub window: Bounds,
    pub active: Bounds,
    pub frame: i16,
    pub color_type: i16,
    pub num_color: i16,
    pub num_matte: i16,
    pub num_aux: i16,
    pub job: i32,
    pub field_rendered: i16,
    pub color_bits: i16,
    pub matte_type: i16,
    pub matte_bits: i16,
    pub aux_type: i16,
    pub aux_bits: i16,
    /// Text field values, parallel to `TEXT_FIELDS`
    pub text: [String; 17],
}

fn get_i16(data: &[u8], offset: usize) -> i16 {
    i16::from_be_bytes([data[offset], data[offset + 1]])
}

fn get_i32(data: &[u8], offset: usize) -> i32 {
    i32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn put_i16(out: &mut [u8], offset: usize, value: i16) {
    out[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
}

fn put_i32(out: &mut [u8], offset: usize, value: i32) {
    out[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
}

fn get_bounds(data: &[u8], offset: usize) -> Bounds {
    Bounds {
        left: get_i16(data, offset),
        right: get_i16(data, offset + 2),
        bottom: get_i16(data, offset + 4),
        top: get_i16(data, offset + 6),
    }
}

fn put_bounds(out: &mut [u8], offset: usize, b: &Bounds) {
    put_i16(out, offset, b.left);
    put_i16(out, offset + 2, b.right);
    put_i16(out, offset + 4, b.bottom);
    put_i16(out, offset + 6, b.top);
}

impl RlaHeader {
    /// Parse the header at the start of `data`.
    ///
    /// # Errors
    ///
    /// [`IoError::TruncatedData`] if fewer than 740 bytes are present,
    /// [`IoError::Format`] if the revision tag does not match.
    pub fn parse(data: &[u8]) -> IoResult<Self> {
        if data.len() < HEADER_SIZE {
            return Err(IoError::TruncatedData {
                what: "RLA header",
                offset: 0,
                needed: HEADER_SIZE,
                available: data.len(),
            });
        }
        let revision = get_i16(data, REVISION_OFFSET);
        if revision != REVISION {
            return Err(IoError::Format(format!(
                "RLA revision 0x{:04X} not supported",
                revision as u16
            )));
        }

        let text = std::array::from_fn(|i| {
            let field = &TEXT_FIELDS[i];
            let raw = &data[field.offset..field.offset + field.len];
            let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
            String::from_utf8_lossy(&raw[..end]).into_owned()
        });

        Ok(RlaHeader {
            window: get_bounds(data, 0),
            active: get_bounds(data, 8),
            frame: get_i16(data, 16),
            color_type: get_i16(data, 18),
            num_color: get_i16(data, 20),
            num_matte: get_i16(data, 22),
            num_aux: get_i16(data, 24),
            job: get_i32(data, 140),
            field_rendered: get_i16(data, 612),
            color_bits: get_i16(data, 658),
            matte_type: get_i16(data, 660),
            matte_bits: get_i16(data, 662),
            aux_type: get_i16(data, 664),
            aux_bits: get_i16(data, 666),
            text,
        })
    }

    /// Serialize to the fixed 740-byte layout.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        put_bounds(&mut out, 0, &self.window);
        put_bounds(&mut out, 8, &self.active);
        put_i16(&mut out, 16, self.frame);
        put_i16(&mut out, 18, self.color_type);
        put_i16(&mut out, 20, self.num_color);
        put_i16(&mut out, 22, self.num_matte);
        put_i16(&mut out, 24, self.num_aux);
        put_i16(&mut out, REVISION_OFFSET, REVISION);
        put_i32(&mut out, 140, self.job);
        put_i16(&mut out, 612, self.field_rendered);
        put_i16(&mut out, 658, self.color_bits);
        put_i16(&mut out, 660, self.matte_type);
        put_i16(&mut out, 662, self.matte_bits);
        put_i16(&mut out, 664, self.aux_type);
        put_i16(&mut out, 666, self.aux_bits);
        for (field, value) in TEXT_FIELDS.iter().zip(&self.text) {
            let bytes = value.as_bytes();
            let n = bytes.len().min(field.len);
            out[field.offset..field.offset + n].copy_from_slice(&bytes[..n]);
        }
        // next-image offset (736) stays 0: single image per file
        out
    }

    /// Attributes carried by this header.
    ///
    /// The display window is always reported; other fields only when set.
    pub fn to_metadata(&self) -> Metadata {
        let mut meta = Metadata::new();
        let w = &self.window;
        for (key, value) in WINDOW_KEYS.iter().zip([w.left, w.right, w.bottom, w.top]) {
            meta.set(*key, value as i64);
        }
        for (key, value) in [
            ("rla:FrameNumber", self.frame as i32),
            ("rla:JobNumber", self.job),
            ("rla:FieldRendered", self.field_rendered as i32),
        ] {
            if value != 0 {
                meta.set(key, value);
            }
        }
        for (field, value) in TEXT_FIELDS.iter().zip(&self.text) {
            if !value.is_empty() {
                meta.set(field.key, value.as_str());
            }
        }
        meta
    }

    /// Fill the descriptive fields from attributes.
    ///
    /// Returns the display window if all four window attributes are
    /// present. Values that do not fit their field are truncated.
    pub fn apply_metadata(&mut self, meta: &Metadata) -> Option<Bounds> {
        let clamp16 = |v: i64| v.clamp(i16::MIN as i64, i16::MAX as i64) as i16;
        self.frame = meta.get_int("rla:FrameNumber").map(clamp16).unwrap_or(0);
        self.field_rendered = meta.get_int("rla:FieldRendered").map(clamp16).unwrap_or(0);
        self.job = meta
            .get_int("rla:JobNumber")
            .map(|v| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
            .unwrap_or(0);
        for (field, slot) in TEXT_FIELDS.iter().zip(self.text.iter_mut()) {
            *slot = meta.get_str(field.key).map(str::to_owned).unwrap_or_default();
        }

        let mut window = [0i16; 4];
        for (key, slot) in WINDOW_KEYS.iter().zip(window.iter_mut()) {
            let v = meta.get_int(key)?;
            *slot = i16::try_from(v).ok()?;
        }
        Some(Bounds {
            left: window[0],
            right: window[1],
            bottom: window[2],
            top: window[3],
        })
    }
}

/// Quick structural check of an RLA header.
pub(crate) fn looks_like_rla(data: &[u8]) -> bool {
    if data.len() < HEADER_SIZE || get_i16(data, REVISION_OFFSET) != REVISION {
        return false;
    }
    let active = get_bounds(data, 8);
    active.width() > 0 && active.height() > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> RlaHeader {
        let mut h = RlaHeader {
            window: Bounds { left: 0, right: 9, bottom: 0, top: 4 },
            active: Bounds { left: 2, right: 7, bottom: 1, top: 3 },
            frame: 12,
            color_type: channel_type::BYTE,
            num_color: 3,
            num_matte: 1,
            color_bits: 8,
            matte_bits: 8,
            job: 70000,
            ..Default::default()
        };
        h.text[0] = "2.2".into();
        h.text[7] = "imagebuf".into();
        h
    }

    #[test]
    fn test_field_table_fits_header() {
        for f in &TEXT_FIELDS {
            assert!(f.offset + f.len <= HEADER_SIZE, "{}", f.key);
        }
        // aux data ends where the reserved block starts
        assert_eq!(TEXT_FIELDS[16].offset + TEXT_FIELDS[16].len, 700);
    }

    #[test]
    fn test_header_roundtrip() {
        let h = sample_header();
        let bytes = h.to_bytes();
        assert_eq!(&bytes[26..28], &[0xFF, 0xFE]);
        assert_eq!(&bytes[736..740], &[0, 0, 0, 0]);
        assert_eq!(RlaHeader::parse(&bytes).unwrap(), h);
    }

    #[test]
    fn test_parse_rejects_short_and_bad_revision() {
        let bytes = sample_header().to_bytes();
        assert!(matches!(
            RlaHeader::parse(&bytes[..700]),
            Err(IoError::TruncatedData { needed: 740, available: 700, .. })
        ));
        let mut bad = bytes;
        bad[27] = 0xFD;
        assert!(matches!(RlaHeader::parse(&bad), Err(IoError::Format(_))));
    }

    #[test]
    fn test_long_text_truncated() {
        let mut h = sample_header();
        h.text[16] = "x".repeat(40);
        let parsed = RlaHeader::parse(&h.to_bytes()).unwrap();
        assert_eq!(parsed.text[16].len(), 32);
    }

    #[test]
    fn test_metadata_mapping() {
        let h = sample_header();
        let meta = h.to_metadata();
        assert_eq!(meta.get_int("rla:WindowRight"), Some(9));
        assert_eq!(meta.get_int("rla:FrameNumber"), Some(12));
        assert_eq!(meta.get_int("rla:JobNumber"), Some(70000));
        assert!(!meta.contains("rla:FieldRendered"));
        assert_eq!(meta.get_str("rla:Gamma"), Some("2.2"));
        assert_eq!(meta.get_str("Software"), Some("imagebuf"));
        assert!(!meta.contains("Artist"));

        let mut back = RlaHeader::default();
        let window = back.apply_metadata(&meta);
        assert_eq!(window, Some(h.window));
        assert_eq!(back.text, h.text);
        assert_eq!(back.frame, 12);
    }

    #[test]
    fn test_window_requires_all_keys() {
        let mut meta = Metadata::new();
        meta.set("rla:WindowLeft", 0i64);
        meta.set("rla:WindowRight", 5i64);
        meta.set("rla:WindowBottom", 0i64);
        assert_eq!(RlaHeader::default().apply_metadata(&meta), None);
        meta.set("rla:WindowTop", 70000i64);
        assert_eq!(RlaHeader::default().apply_metadata(&meta), None);
    }

    #[test]
    fn test_looks_like_rla() {
        let bytes = sample_header().to_bytes();
        assert!(looks_like_rla(&bytes));
        assert!(!looks_like_rla(&bytes[..100]));
        let mut empty = sample_header();
        empty.active.right = empty.active.left - 1;
        assert!(!looks_like_rla(&empty.to_bytes()));
    }
}
