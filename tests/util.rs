//! MGH files assembled byte by byte, independently of the crate's encoder.
#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

pub const HEADER_SIZE: usize = 284;

pub fn push_i16(buf: &mut Vec<u8>, v: i16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

pub fn push_i32(buf: &mut Vec<u8>, v: i32) {
    buf.extend_from_slice(&v.to_be_bytes());
}

pub fn push_f32(buf: &mut Vec<u8>, v: f32) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn dimension_fields(dim: [i32; 3], nframes: i32, type_code: i32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE);
    push_i32(&mut buf, 1);
    for d in &dim {
        push_i32(&mut buf, *d);
    }
    push_i32(&mut buf, nframes);
    push_i32(&mut buf, type_code);
    push_i32(&mut buf, 1);
    buf
}

/// Header without orientation data (`ras_good == 0`).
pub fn plain_header(dim: [i32; 3], nframes: i32, type_code: i32) -> Vec<u8> {
    let mut buf = dimension_fields(dim, nframes, type_code);
    push_i16(&mut buf, 0);
    buf.resize(HEADER_SIZE, 0);
    buf
}

/// Header with orientation data. `columns` holds the direction cosines in
/// file order: x_r, x_a, x_s, y_r, y_a, y_s, z_r, z_a, z_s.
pub fn ras_header(
    dim: [i32; 3],
    nframes: i32,
    type_code: i32,
    spacing: [f32; 3],
    columns: [f32; 9],
    center: [f32; 3],
) -> Vec<u8> {
    let mut buf = dimension_fields(dim, nframes, type_code);
    push_i16(&mut buf, 1);
    for v in spacing.iter().chain(&columns).chain(&center) {
        push_f32(&mut buf, *v);
    }
    buf.resize(HEADER_SIZE, 0);
    buf
}

/// Direction cosines of FreeSurfer's conformed space (LIA).
pub const LIA_COLUMNS: [f32; 9] = [-1., 0., 0., 0., 0., -1., 0., 1., 0.];

/// A 2x1x1 volume of 16-bit values with 2 frames, followed by TR and
/// FlipAngle and 3 stray bytes. In memory the values are [1, 10, 2, 20].
pub fn two_frame_short_file() -> Vec<u8> {
    let mut buf = plain_header([2, 1, 1], 2, 4);
    // frame-major: frame 0 of both voxels, then frame 1
    for v in &[1i16, 2, 10, 20] {
        push_i16(&mut buf, *v);
    }
    push_f32(&mut buf, 2300.);
    push_f32(&mut buf, 0.157);
    buf.extend_from_slice(&[0xCA, 0xFE, 0x00]);
    buf
}

/// A 4x4x4 volume of bytes where voxel `i` in raster order holds `2 * i`,
/// with the LIA orientation and no scan parameters.
pub fn conformed_uchar_file() -> Vec<u8> {
    let mut buf = ras_header([4, 4, 4], 1, 0, [1.; 3], LIA_COLUMNS, [1.5, -2., 10.]);
    buf.extend((0..64u8).map(|i| i * 2));
    buf
}

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut e = GzEncoder::new(Vec::new(), Compression::default());
    e.write_all(data).unwrap();
    e.finish().unwrap()
}
