//! Wavefront RLA image format support
//!
//! Reads and writes single-image RLA files (header revision `0xFFFE`)
//! with an alpha-only, RGB or RGBA channel set stored as 8-bit, 16-bit
//! (including 10-bit data) or 32-bit float samples.
//!
//! # File layout
//!
//! ```text
//! header          740 bytes, big-endian
//! offset table    height x i32, entry 0 = bottom scanline
//! scanlines       per channel: u16 length + payload
//! ```
//!
//! Integer payloads are run-length coded per byte plane (high byte
//! first); float payloads are raw big-endian samples.

mod header;
mod layout;
mod rle;

use crate::header::ImageHeader;
use crate::{DecoderConfig, IoError, IoResult};
use header::{Bounds, HEADER_SIZE, RlaHeader};
use imagebuf_core::{ImageBuf, ImageBufMut, ImageFormat, SampleFormat, Samples, format};
use layout::ChannelLayout;
use std::io::{Read, Write};

/// Check whether `data` starts with a plausible RLA header.
pub fn is_rla(data: &[u8]) -> bool {
    header::looks_like_rla(data)
}

/// Read an RLA image from a reader.
pub fn read_rla<R: Read>(mut reader: R) -> IoResult<ImageBuf> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data).map_err(IoError::Io)?;
    read_rla_mem(&data)
}

/// Read an RLA image from memory.
pub fn read_rla_mem(data: &[u8]) -> IoResult<ImageBuf> {
    read_rla_mem_with(data, &DecoderConfig::default())
}

/// Read an RLA image from memory with decoder limits.
///
/// # Errors
///
/// - [`IoError::TruncatedData`] if any declared structure extends past
///   the end of `data`
/// - [`IoError::Format`] for a bad revision tag, empty active window or
///   malformed channel data
/// - [`IoError::UnsupportedVariant`] for channel layouts other than
///   alpha, RGB and RGBA in 8/16-bit integer or 32-bit float
/// - [`IoError::ImageTooLarge`] if the frame exceeds
///   [`DecoderConfig::frame_size_limit`]
pub fn read_rla_mem_with(data: &[u8], config: &DecoderConfig) -> IoResult<ImageBuf> {
    let header = RlaHeader::parse(data)?;
    let layout = ChannelLayout::from_header(&header)?;
    let (width, height) = active_size(&header)?;
    config.check_frame_size(width, height)?;

    log::debug!(
        "RLA decode: {}x{} {:?} {:?} ({} bits), {} bytes",
        width,
        height,
        layout.set,
        layout.format,
        layout.bits,
        data.len()
    );

    let offsets = read_offset_table(data, height as usize)?;
    check_payload_size(data, &layout, width, height)?;
    let nch = layout.set.len();
    let bps = layout.format.bytes();
    let row_bytes = width as usize * nch * bps;

    // Big-endian interleaved samples, top row first
    let mut scratch = vec![0u8; row_bytes * height as usize];
    let mut plane = vec![0u8; width as usize];

    for (row, dst) in scratch.chunks_exact_mut(row_bytes).enumerate() {
        let offset = offsets[height as usize - 1 - row];
        let mut pos = usize::try_from(offset)
            .map_err(|_| IoError::Format(format!("negative scanline offset {offset}")))?;
        for c in 0..nch {
            let len = read_u16(data, pos, "RLA channel length")? as usize;
            pos += 2;
            let chunk = data.get(pos..pos + len).ok_or(IoError::TruncatedData {
                what: "RLA channel data",
                offset: pos,
                needed: len,
                available: data.len().saturating_sub(pos),
            })?;
            pos += len;
            decode_channel(chunk, layout.format, c, nch, &mut plane, dst)?;
        }
        log::trace!("RLA decode: row {} at offset {}", row, offset);
    }

    let samples = match layout.format {
        SampleFormat::UInt8 => Samples::U8(scratch),
        SampleFormat::UInt16 => Samples::U16(
            scratch
                .chunks_exact(2)
                .map(|b| u16::from_be_bytes([b[0], b[1]]))
                .collect(),
        ),
        SampleFormat::Float32 => Samples::F32(
            scratch
                .chunks_exact(4)
                .map(|b| f32::from_be_bytes([b[0], b[1], b[2], b[3]]))
                .collect(),
        ),
    };

    let mut buf = ImageBufMut::from_samples(
        width,
        height,
        layout.set.descriptors(layout.format),
        samples,
    )?;
    if let Err(e) = buf.set_bits_per_sample(layout.bits) {
        log::warn!("RLA decode: keeping container precision: {}", e);
    }
    let w = &header.window;
    let a = &header.active;
    buf.set_origin(
        a.left as i32 - w.left as i32,
        w.top as i32 - a.top as i32,
    );
    buf.set_metadata(header.to_metadata());
    Ok(buf.into())
}

/// Read RLA image metadata without decoding pixel data.
pub fn read_header_rla(data: &[u8]) -> IoResult<ImageHeader> {
    let header = RlaHeader::parse(data)?;
    let layout = ChannelLayout::from_header(&header)?;
    let (width, height) = active_size(&header)?;
    Ok(ImageHeader {
        width,
        height,
        nchannels: layout.set.len(),
        channel_set: Some(layout.set),
        sample_format: layout.format,
        bits_per_sample: layout.bits,
        format: ImageFormat::Rla,
    })
}

/// Write an RLA image to a writer.
pub fn write_rla<W: Write>(buf: &ImageBuf, mut writer: W) -> IoResult<()> {
    let data = write_rla_mem(buf)?;
    writer.write_all(&data).map_err(IoError::Io)?;
    Ok(())
}

/// Encode an RLA image into memory.
///
/// The display window comes from the `rla:Window*` attributes when all
/// four are present, otherwise it spans the origin plus the image size.
///
/// # Errors
///
/// - [`IoError::UnsupportedVariant`] unless the channels are `A`,
///   `R,G,B` or `R,G,B,A`
/// - [`IoError::EncodeError`] if the geometry does not fit 16-bit
///   coordinates, an integer sample exceeds the buffer's bit depth, or a
///   scanline channel exceeds 65535 bytes
pub fn write_rla_mem(buf: &ImageBuf) -> IoResult<Vec<u8>> {
    let layout = ChannelLayout::from_buf(buf)?;
    let (width, height) = (buf.width(), buf.height());

    if let Some(max) = buf.samples().max_int()
        && max > format::max_int_value(layout.bits)
    {
        return Err(IoError::EncodeError(format!(
            "sample value {} exceeds {}-bit range",
            max, layout.bits
        )));
    }

    let mut header = RlaHeader::default();
    let window = header.apply_metadata(buf.metadata());
    layout.apply_to_header(&mut header);
    let (window, active) = encode_geometry(window, buf.origin(), width, height)?;
    header.window = window;
    header.active = active;

    log::debug!(
        "RLA encode: {}x{} {:?} {:?} ({} bits), active {:?}",
        width,
        height,
        layout.set,
        layout.format,
        layout.bits,
        active
    );

    let nch = layout.set.len();
    let bps = layout.format.bytes();
    let row_bytes = width as usize * nch * bps;
    let scratch = samples_to_be_bytes(buf.samples());

    let table_start = HEADER_SIZE;
    let mut out = Vec::with_capacity(table_start + 4 * height as usize + scratch.len());
    out.extend_from_slice(&header.to_bytes());
    out.resize(table_start + 4 * height as usize, 0);

    let mut plane = vec![0u8; width as usize];
    let mut payload = Vec::new();
    for (row, src) in scratch.chunks_exact(row_bytes).enumerate() {
        let offset = i32::try_from(out.len())
            .map_err(|_| IoError::EncodeError("file exceeds 2 GiB offset range".into()))?;
        let slot = table_start + 4 * (height as usize - 1 - row);
        out[slot..slot + 4].copy_from_slice(&offset.to_be_bytes());

        for c in 0..nch {
            payload.clear();
            encode_channel(src, layout.format, c, nch, &mut plane, &mut payload);
            let len = u16::try_from(payload.len()).map_err(|_| {
                IoError::EncodeError(format!(
                    "channel {} of row {} needs {} bytes, more than a scanline can hold",
                    c,
                    row,
                    payload.len()
                ))
            })?;
            out.extend_from_slice(&len.to_be_bytes());
            out.extend_from_slice(&payload);
        }
    }

    log::trace!("RLA encode: {} bytes", out.len());
    Ok(out)
}

/// Width and height of the active window.
fn active_size(h: &RlaHeader) -> IoResult<(u32, u32)> {
    let (w, h_) = (h.active.width(), h.active.height());
    if w <= 0 || h_ <= 0 {
        return Err(IoError::Format(format!(
            "invalid RLA active window {:?}",
            h.active
        )));
    }
    Ok((w as u32, h_ as u32))
}

/// Compute display and active windows for a buffer of `width` x `height`
/// at `origin`.
fn encode_geometry(
    window: Option<Bounds>,
    origin: (i32, i32),
    width: u32,
    height: u32,
) -> IoResult<(Bounds, Bounds)> {
    let to_i16 = |v: i64| {
        i16::try_from(v).map_err(|_| {
            IoError::EncodeError(format!("coordinate {v} does not fit the RLA header"))
        })
    };
    let (ox, oy) = (origin.0 as i64, origin.1 as i64);
    let (w, h) = (width as i64, height as i64);

    let window = match window {
        Some(b) => b,
        None => Bounds {
            left: 0,
            right: to_i16(ox + w - 1)?,
            bottom: 0,
            top: to_i16(oy + h - 1)?,
        },
    };
    let left = window.left as i64 + ox;
    let top = window.top as i64 - oy;
    let active = Bounds {
        left: to_i16(left)?,
        right: to_i16(left + w - 1)?,
        bottom: to_i16(top - h + 1)?,
        top: to_i16(top)?,
    };
    Ok((window, active))
}

/// Read the scanline offset table that follows the header.
fn read_offset_table(data: &[u8], height: usize) -> IoResult<Vec<i32>> {
    let needed = height * 4;
    let table = data
        .get(HEADER_SIZE..HEADER_SIZE + needed)
        .ok_or(IoError::TruncatedData {
            what: "RLA offset table",
            offset: HEADER_SIZE,
            needed,
            available: data.len().saturating_sub(HEADER_SIZE),
        })?;
    Ok(table
        .chunks_exact(4)
        .map(|b| i32::from_be_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

/// Smallest number of bytes one scanline can occupy: a length per
/// channel plus either raw floats or one two-byte run per 128 bytes of
/// each byte plane.
fn min_scanline_bytes(layout: &ChannelLayout, width: u32) -> usize {
    let width = width as usize;
    let payload = match layout.format {
        SampleFormat::Float32 => 4 * width,
        _ => layout.format.bytes() * 2 * width.div_ceil(128),
    };
    layout.set.len() * (2 + payload)
}

/// Reject files whose declared geometry needs more scanline data than
/// follows the offset table.
fn check_payload_size(
    data: &[u8],
    layout: &ChannelLayout,
    width: u32,
    height: u32,
) -> IoResult<()> {
    let start = HEADER_SIZE + 4 * height as usize;
    let available = data.len().saturating_sub(start);
    let needed = min_scanline_bytes(layout, width).saturating_mul(height as usize);
    if needed > available {
        return Err(IoError::TruncatedData {
            what: "RLA scanline data",
            offset: start,
            needed,
            available,
        });
    }
    Ok(())
}

fn read_u16(data: &[u8], pos: usize, what: &'static str) -> IoResult<u16> {
    match data.get(pos..pos + 2) {
        Some(b) => Ok(u16::from_be_bytes([b[0], b[1]])),
        None => Err(IoError::TruncatedData {
            what,
            offset: pos,
            needed: 2,
            available: data.len().saturating_sub(pos),
        }),
    }
}

/// Decode one channel of a scanline into interleaved big-endian `dst`.
fn decode_channel(
    chunk: &[u8],
    format: SampleFormat,
    c: usize,
    nch: usize,
    plane: &mut [u8],
    dst: &mut [u8],
) -> IoResult<()> {
    let bps = format.bytes();
    let width = plane.len();

    if format == SampleFormat::Float32 {
        if chunk.len() < width * 4 {
            return Err(IoError::Format(format!(
                "float channel holds {} bytes, expected {}",
                chunk.len(),
                width * 4
            )));
        }
        for (x, sample) in chunk.chunks_exact(4).take(width).enumerate() {
            let at = (x * nch + c) * 4;
            dst[at..at + 4].copy_from_slice(sample);
        }
        return Ok(());
    }

    let mut pos = 0;
    for b in 0..bps {
        rle::decode_plane(chunk, &mut pos, plane)?;
        for (x, &v) in plane.iter().enumerate() {
            dst[(x * nch + c) * bps + b] = v;
        }
    }
    Ok(())
}

/// Encode one channel of interleaved big-endian `src` into `out`.
fn encode_channel(
    src: &[u8],
    format: SampleFormat,
    c: usize,
    nch: usize,
    plane: &mut [u8],
    out: &mut Vec<u8>,
) {
    let bps = format.bytes();

    if format == SampleFormat::Float32 {
        for x in 0..plane.len() {
            let at = (x * nch + c) * 4;
            out.extend_from_slice(&src[at..at + 4]);
        }
        return;
    }

    for b in 0..bps {
        for (x, v) in plane.iter_mut().enumerate() {
            *v = src[(x * nch + c) * bps + b];
        }
        rle::encode_plane(plane, out);
    }
}

fn samples_to_be_bytes(samples: &Samples) -> Vec<u8> {
    match samples {
        Samples::U8(v) => v.clone(),
        Samples::U16(v) => v.iter().flat_map(|s| s.to_be_bytes()).collect(),
        Samples::F32(v) => v.iter().flat_map(|s| s.to_be_bytes()).collect(),
    }
}
