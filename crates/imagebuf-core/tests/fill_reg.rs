//! Fill regression test
//!
//! Tests fill, zero and checker on every sample format, including
//! region-restricted fills, negative checker offsets and bounds errors.

use imagebuf_core::{ChannelSet, Error, ImageBuf, ImageBufMut, Roi, Sample, SampleFormat};
use imagebuf_test::RegParams;

fn as_f64(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

#[test]
fn fill_reg() {
    let mut rp = RegParams::new("fill");

    let formats = [
        (SampleFormat::UInt8, 8),
        (SampleFormat::UInt16, 10),
        (SampleFormat::UInt16, 16),
        (SampleFormat::Float32, 32),
    ];

    for (format, bits) in formats {
        // --- Test 1: whole-image fill ---
        let mut bm = ImageBufMut::new(40, 30, ChannelSet::Rgba, format).unwrap();
        bm.set_bits_per_sample(bits).unwrap();
        bm.fill(&[0.0, 0.25, 0.5, 1.0], None).unwrap();
        let buf: ImageBuf = bm.into();
        for (c, want) in [0.0, 0.25, 0.5, 1.0].into_iter().enumerate() {
            let got = buf.get_float(39, 29, c).unwrap();
            let tol = if format.is_integer() {
                1.0 / buf.max_sample_value() as f64
            } else {
                0.0
            };
            rp.compare_values(want, got as f64, tol);
        }

        // --- Test 2: zero a region, leave the rest ---
        let mut bm = buf.to_mut();
        bm.zero(Some(Roi::new(10, 10, 5, 5))).unwrap();
        let zeroed: ImageBuf = bm.into();
        rp.compare_values(0.0, zeroed.get_float(12, 12, 3).unwrap() as f64, 0.0);
        rp.compare_values(1.0, zeroed.get_float(15, 12, 3).unwrap() as f64, 0.0);
        rp.compare_values(1.0, zeroed.get_float(12, 9, 3).unwrap() as f64, 0.0);
    }

    // --- Test 3: checkerboard parity with offsets ---
    let mut bm = ImageBufMut::new(16, 16, ChannelSet::Alpha, SampleFormat::UInt8).unwrap();
    bm.checker(4, 4, &[0.0], &[1.0], -2, 3, None).unwrap();
    let board: ImageBuf = bm.into();
    for (x, y) in [(0u32, 0u32), (1, 2), (2, 3), (5, 3), (15, 15), (6, 7)] {
        let xt = (x as i64 + 2).div_euclid(4);
        let yt = (y as i64 - 3).div_euclid(4);
        let want = if (xt + yt).rem_euclid(2) == 0 { 0 } else { 255 };
        rp.compare_values(
            1.0,
            as_f64(board.get_sample(x, y, 0) == Some(Sample::U8(want))),
            0.0,
        );
    }

    // Checker restricted to a region leaves the outside alone
    let mut bm = ImageBufMut::new(8, 8, ChannelSet::Rgb, SampleFormat::Float32).unwrap();
    bm.checker(
        2,
        2,
        &[1.0, 1.0, 1.0],
        &[0.5, 0.5, 0.5],
        0,
        0,
        Some(Roi::new(4, 4, 4, 4)),
    )
    .unwrap();
    let partial: ImageBuf = bm.into();
    rp.compare_values(0.0, partial.get_float(3, 3, 0).unwrap() as f64, 0.0);
    rp.compare_values(1.0, partial.get_float(4, 4, 0).unwrap() as f64, 0.0);
    rp.compare_values(0.5, partial.get_float(6, 4, 1).unwrap() as f64, 0.0);

    // --- Test 4: errors ---
    let mut bm = ImageBufMut::new(8, 8, ChannelSet::Rgb, SampleFormat::UInt8).unwrap();
    rp.compare_values(
        1.0,
        as_f64(matches!(
            bm.fill(&[1.0, 1.0], None),
            Err(Error::InvalidParameter(_))
        )),
        0.0,
    );
    rp.compare_values(
        1.0,
        as_f64(matches!(
            bm.zero(Some(Roi::new(4, 4, 8, 1))),
            Err(Error::OutOfBounds { .. })
        )),
        0.0,
    );
    rp.compare_values(
        1.0,
        as_f64(matches!(
            bm.checker(0, 4, &[0.0; 3], &[1.0; 3], 0, 0, None),
            Err(Error::InvalidParameter(_))
        )),
        0.0,
    );

    assert!(rp.cleanup(), "fill regression test failed");
}
