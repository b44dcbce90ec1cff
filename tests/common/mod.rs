//! Builders for synthetic GIF files.

#![allow(dead_code)]

use std::collections::HashMap;

pub const GIF87A: &[u8; 6] = b"GIF87a";
pub const GIF89A: &[u8; 6] = b"GIF89a";

/// The classic single black pixel GIF87a, two color global table.
pub fn one_pixel_gif87a() -> Vec<u8> {
    vec![
        // Header.
        b'G', b'I', b'F', b'8', b'7', b'a',
        // Logical screen descriptor: 1x1, global table of 2.
        0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00,
        // Global color table.
        0x00, 0x00, 0x00, 0xff, 0xff, 0xff,
        // Image descriptor.
        0x2c, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00,
        // Image data: min code size 2, clear, 0, end.
        0x02, 0x02, 0x44, 0x01, 0x00,
        // Trailer.
        0x3b,
    ]
}

#[derive(Default)]
struct BitWriter {
    bytes: Vec<u8>,
    bits: u32,
    bit_count: u32,
}

impl BitWriter {
    fn write(&mut self, code: u32, size: u32) {
        self.bits |= code << self.bit_count;
        self.bit_count += size;
        while self.bit_count >= 8 {
            self.bytes.push(self.bits as u8);
            self.bits >>= 8;
            self.bit_count -= 8;
        }
    }

    fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.bits as u8);
        }
        self.bytes
    }
}

/// Wraps a payload into length-prefixed sub-blocks plus the terminator.
pub fn sub_blocks(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    for chunk in payload.chunks(255) {
        out.push(chunk.len() as u8);
        out.extend_from_slice(chunk);
    }
    out.push(0);
    out
}

/// Encodes `indices` as an image data stream made only of literal codes,
/// tracking the code width growth a decoder goes through.
pub fn lzw_literals(min_code_size: u8, indices: &[u8]) -> Vec<u8> {
    let clear_code = 1u32 << min_code_size;
    let initial_size = u32::from(min_code_size) + 1;

    let mut writer = BitWriter::default();
    let mut code_size = initial_size;
    let mut next_code = clear_code + 2;
    let mut first = true;

    writer.write(clear_code, code_size);
    for &index in indices {
        if next_code >= 4000 {
            writer.write(clear_code, code_size);
            code_size = initial_size;
            next_code = clear_code + 2;
            first = true;
        }

        writer.write(u32::from(index), code_size);
        if first {
            first = false;
        } else {
            next_code += 1;
            if next_code >= 1 << code_size && code_size < 12 {
                code_size += 1;
            }
        }
    }
    writer.write(clear_code + 1, code_size);

    let mut out = vec![min_code_size];
    out.extend(sub_blocks(&writer.finish()));
    out
}

/// Encodes `indices` with a real string table, so the stream is full of
/// multi-byte codes. Emits a clear code before the table runs out.
pub fn lzw_compress(min_code_size: u8, indices: &[u8]) -> Vec<u8> {
    struct Encoder {
        writer: BitWriter,
        table: HashMap<(u32, u8), u32>,
        clear_code: u32,
        initial_size: u32,
        code_size: u32,
        // next entry of our own table, one ahead of the decoder
        next_code: u32,
        // next entry of the decoder's table, drives the code width
        decoder_next: u32,
        first: bool,
    }

    impl Encoder {
        fn reset(&mut self) {
            self.table.clear();
            self.code_size = self.initial_size;
            self.next_code = self.clear_code + 2;
            self.decoder_next = self.clear_code + 2;
            self.first = true;
        }

        fn emit(&mut self, code: u32) {
            self.writer.write(code, self.code_size);
            if self.first {
                self.first = false;
            } else {
                self.decoder_next += 1;
                if self.decoder_next >= 1 << self.code_size && self.code_size < 12 {
                    self.code_size += 1;
                }
            }
        }
    }

    let clear_code = 1u32 << min_code_size;
    let initial_size = u32::from(min_code_size) + 1;
    let mut encoder = Encoder {
        writer: BitWriter::default(),
        table: HashMap::new(),
        clear_code,
        initial_size,
        code_size: initial_size,
        next_code: clear_code + 2,
        decoder_next: clear_code + 2,
        first: true,
    };

    encoder.writer.write(clear_code, initial_size);
    let mut current: Option<u32> = None;
    for &index in indices {
        let Some(prefix) = current else {
            current = Some(u32::from(index));
            continue;
        };

        if let Some(&code) = encoder.table.get(&(prefix, index)) {
            current = Some(code);
            continue;
        }

        encoder.emit(prefix);
        let next_code = encoder.next_code;
        encoder.table.insert((prefix, index), next_code);
        encoder.next_code += 1;
        current = Some(u32::from(index));

        if encoder.next_code >= 4000 {
            encoder.writer.write(clear_code, encoder.code_size);
            encoder.reset();
        }
    }
    if let Some(code) = current {
        encoder.emit(code);
    }
    encoder.writer.write(clear_code + 1, encoder.code_size);

    let mut out = vec![min_code_size];
    out.extend(sub_blocks(&encoder.writer.finish()));
    out
}

fn minimum_code_size(indices: &[u8]) -> u8 {
    let max = indices.iter().copied().max().unwrap_or(0);
    let bits = 8 - max.leading_zeros() as u8;
    bits.max(2)
}

fn table_exponent(colors: &[[u8; 3]]) -> u8 {
    assert!(colors.len().is_power_of_two() && (2..=256).contains(&colors.len()));
    colors.len().trailing_zeros() as u8 - 1
}

/// Rows of `height` in the order an interlaced image stores them.
pub fn interlace_order(height: usize) -> Vec<usize> {
    let mut rows = Vec::new();
    for (start, step) in [(0, 8), (4, 8), (2, 4), (1, 2)] {
        let mut row = start;
        while row < height {
            rows.push(row);
            row += step;
        }
    }
    rows
}

pub struct Image<'a> {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub interlaced: bool,
    pub local_table: Option<&'a [[u8; 3]]>,
    /// Display order, row by row.
    pub indices: &'a [u8],
}

impl<'a> Image<'a> {
    pub fn new(width: u16, height: u16, indices: &'a [u8]) -> Self {
        assert_eq!(usize::from(width) * usize::from(height), indices.len());
        Self {
            left: 0,
            top: 0,
            width,
            height,
            interlaced: false,
            local_table: None,
            indices,
        }
    }
}

pub struct GifBuilder {
    bytes: Vec<u8>,
}

impl GifBuilder {
    pub fn new(
        signature: &[u8; 6],
        width: u16,
        height: u16,
        global_table: Option<&[[u8; 3]]>,
    ) -> Self {
        let mut bytes = signature.to_vec();
        bytes.extend_from_slice(&width.to_le_bytes());
        bytes.extend_from_slice(&height.to_le_bytes());
        match global_table {
            Some(colors) => {
                bytes.extend_from_slice(&[0x80 | 0x70 | table_exponent(colors), 0, 0]);
                bytes.extend(colors.iter().flatten());
            }
            None => bytes.extend_from_slice(&[0x70, 0, 0]),
        }
        Self { bytes }
    }

    pub fn graphic_control(mut self, disposal: u8, delay: u16, transparent: Option<u8>) -> Self {
        let packed = (disposal << 2) | u8::from(transparent.is_some());
        self.bytes.extend_from_slice(&[0x21, 0xf9, 0x04, packed]);
        self.bytes.extend_from_slice(&delay.to_le_bytes());
        self.bytes.extend_from_slice(&[transparent.unwrap_or(0), 0x00]);
        self
    }

    pub fn comment(mut self, text: &str) -> Self {
        self.bytes.extend_from_slice(&[0x21, 0xfe]);
        self.bytes.extend(sub_blocks(text.as_bytes()));
        self
    }

    pub fn netscape_loop(mut self, count: u16) -> Self {
        self.bytes.extend_from_slice(&[0x21, 0xff, 0x0b]);
        self.bytes.extend_from_slice(b"NETSCAPE2.0");
        self.bytes.extend_from_slice(&[0x03, 0x01]);
        self.bytes.extend_from_slice(&count.to_le_bytes());
        self.bytes.push(0x00);
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// Adds an image block whose data holds only literal codes.
    pub fn image(self, image: &Image<'_>) -> Self {
        self.image_with(image, lzw_literals)
    }

    /// Adds an image block compressed with a real string table.
    pub fn compressed_image(self, image: &Image<'_>) -> Self {
        self.image_with(image, lzw_compress)
    }

    fn image_with(mut self, image: &Image<'_>, encode: fn(u8, &[u8]) -> Vec<u8>) -> Self {
        self.bytes.push(0x2c);
        for field in [image.left, image.top, image.width, image.height] {
            self.bytes.extend_from_slice(&field.to_le_bytes());
        }

        let mut packed = 0;
        if image.interlaced {
            packed |= 0x40;
        }
        if let Some(colors) = image.local_table {
            packed |= 0x80 | table_exponent(colors);
        }
        self.bytes.push(packed);
        if let Some(colors) = image.local_table {
            self.bytes.extend(colors.iter().flatten());
        }

        let width = usize::from(image.width);
        let stored: Vec<u8> = if image.interlaced {
            interlace_order(usize::from(image.height))
                .into_iter()
                .flat_map(|row| image.indices[row * width..(row + 1) * width].iter().copied())
                .collect()
        } else {
            image.indices.to_vec()
        };

        self.bytes
            .extend(encode(minimum_code_size(image.indices), &stored));
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.bytes.push(0x3b);
        self.bytes
    }
}

pub const BLACK_WHITE: &[[u8; 3]] = &[[0, 0, 0], [255, 255, 255]];

pub const FOUR_COLORS: &[[u8; 3]] = &[[0, 0, 0], [255, 0, 0], [0, 255, 0], [0, 0, 255]];

/// Two 2x2 frames behind graphic control extensions, looping forever.
pub fn two_frame_animation() -> Vec<u8> {
    GifBuilder::new(GIF89A, 2, 2, Some(FOUR_COLORS))
        .netscape_loop(0)
        .graphic_control(1, 10, None)
        .image(&Image::new(2, 2, &[0, 1, 2, 3]))
        .graphic_control(2, 20, Some(0))
        .image(&Image {
            left: 1,
            top: 1,
            ..Image::new(1, 1, &[3])
        })
        .finish()
}
