//! RLA run-length coding of byte planes
//!
//! Each packet starts with a signed count byte:
//!
//! - `n >= 0`: the following byte is repeated `n + 1` times
//! - `n < 0`: the following `-n` bytes are copied literally
//!
//! A plane is one byte of every sample of a scanline channel, so a
//! 16-bit channel is coded as two consecutive planes (high bytes first).

use crate::{IoError, IoResult};

/// Longest run or literal packet.
const MAX_PACKET: usize = 128;

/// Append the run-length coding of `plane` to `out`.
pub(crate) fn encode_plane(plane: &[u8], out: &mut Vec<u8>) {
    let n = plane.len();
    let mut i = 0;
    while i < n {
        let mut run = 1;
        while i + run < n && run < MAX_PACKET && plane[i + run] == plane[i] {
            run += 1;
        }
        if run >= 2 {
            out.push((run - 1) as u8);
            out.push(plane[i]);
            i += run;
            continue;
        }

        // Literal packet: extend until the next pair of equal bytes.
        let start = i;
        while i < n && i - start < MAX_PACKET {
            if i + 1 < n && plane[i] == plane[i + 1] {
                break;
            }
            i += 1;
        }
        let len = i - start;
        out.push((-(len as i32)) as i8 as u8);
        out.extend_from_slice(&plane[start..i]);
    }
}

/// Decode one plane of `out.len()` bytes from `src` starting at `*pos`.
///
/// On return `*pos` points just past the consumed packets. Packets that
/// run past the end of the plane are clamped to it.
pub(crate) fn decode_plane(src: &[u8], pos: &mut usize, out: &mut [u8]) -> IoResult<()> {
    let truncated = |offset: usize, needed: usize| IoError::TruncatedData {
        what: "RLE packet",
        offset,
        needed,
        available: src.len().saturating_sub(offset),
    };

    let width = out.len();
    let mut x = 0;
    while x < width {
        let count = *src.get(*pos).ok_or_else(|| truncated(*pos, 1))? as i8 as i32;
        *pos += 1;
        if count >= 0 {
            let value = *src.get(*pos).ok_or_else(|| truncated(*pos, 1))?;
            *pos += 1;
            let run = (count as usize + 1).min(width - x);
            if run as i32 != count + 1 {
                log::trace!("RLA: run of {} clamped to {} at x={}", count + 1, run, x);
            }
            out[x..x + run].fill(value);
            x += run;
        } else {
            let len = (-count) as usize;
            let bytes = src
                .get(*pos..*pos + len)
                .ok_or_else(|| truncated(*pos, len))?;
            *pos += len;
            let take = len.min(width - x);
            if take != len {
                log::trace!("RLA: literal of {} clamped to {} at x={}", len, take, x);
            }
            out[x..x + take].copy_from_slice(&bytes[..take]);
            x += take;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(plane: &[u8]) -> Vec<u8> {
        let mut enc = Vec::new();
        encode_plane(plane, &mut enc);
        let mut out = vec![0u8; plane.len()];
        let mut pos = 0;
        decode_plane(&enc, &mut pos, &mut out).unwrap();
        assert_eq!(pos, enc.len(), "decoder must consume the whole stream");
        out
    }

    #[test]
    fn test_encode_run() {
        let mut enc = Vec::new();
        encode_plane(&[7; 5], &mut enc);
        assert_eq!(enc, [4, 7]);
    }

    #[test]
    fn test_encode_literal() {
        let mut enc = Vec::new();
        encode_plane(&[1, 2, 3], &mut enc);
        assert_eq!(enc, [0xFD, 1, 2, 3]);
    }

    #[test]
    fn test_encode_mixed() {
        let mut enc = Vec::new();
        encode_plane(&[1, 2, 9, 9, 9, 3], &mut enc);
        assert_eq!(enc, [0xFE, 1, 2, 2, 9, 0xFF, 3]);
    }

    #[test]
    fn test_long_packets_split() {
        let flat = vec![42u8; 300];
        let mut enc = Vec::new();
        encode_plane(&flat, &mut enc);
        assert_eq!(enc, [127, 42, 127, 42, 43, 42]);

        let ramp: Vec<u8> = (0..300u32).map(|i| i as u8).collect();
        let mut enc = Vec::new();
        encode_plane(&ramp, &mut enc);
        assert_eq!(enc[0], 0x80); // literal of 128
        assert_eq!(roundtrip(&ramp), ramp);
    }

    #[test]
    fn test_roundtrip_patterns() {
        let patterns: [&[u8]; 5] = [
            &[0],
            &[0, 0],
            &[5, 6],
            &[1, 1, 2, 2, 3, 3, 4],
            &[9, 8, 7, 7, 7, 7, 6, 5, 5],
        ];
        for p in patterns {
            assert_eq!(roundtrip(p), p);
        }
    }

    #[test]
    fn test_decode_truncated() {
        let mut out = [0u8; 4];
        let mut pos = 0;
        assert!(matches!(
            decode_plane(&[3], &mut pos, &mut out),
            Err(IoError::TruncatedData { .. })
        ));
        let mut pos = 0;
        assert!(matches!(
            decode_plane(&[0xFC, 1, 2], &mut pos, &mut out),
            Err(IoError::TruncatedData { .. })
        ));
        let mut pos = 0;
        assert!(matches!(
            decode_plane(&[1, 9], &mut pos, &mut out),
            Err(IoError::TruncatedData { .. })
        ));
    }

    #[test]
    fn test_decode_clamps_overlong_run() {
        let mut out = [0u8; 3];
        let mut pos = 0;
        decode_plane(&[9, 4], &mut pos, &mut out).unwrap();
        assert_eq!(out, [4, 4, 4]);
        assert_eq!(pos, 2);
    }
}
