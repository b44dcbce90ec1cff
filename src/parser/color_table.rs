use super::cursor::Cursor;
use crate::error::{DecodeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    colors: Box<[Rgb]>,
}

/// Number of entries encoded by the low three bits of a packed field.
pub(crate) fn table_len(packed_fields: u8) -> usize {
    2 << (packed_fields & 0b00000111)
}

impl ColorTable {
    pub fn load(cursor: &mut Cursor<'_>, count: usize) -> Result<Self> {
        let bytes = cursor
            .read_bytes(count * 3)
            .map_err(|_| truncated(cursor, count))?;

        let colors = bytes
            .chunks_exact(3)
            .map(|rgb| Rgb {
                red: rgb[0],
                green: rgb[1],
                blue: rgb[2],
            })
            .collect();

        Ok(Self { colors })
    }

    /// Advances past a table of `count` entries without materialising it.
    pub fn skip(cursor: &mut Cursor<'_>, count: usize) -> Result<()> {
        cursor
            .skip(count * 3)
            .map_err(|_| truncated(cursor, count))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: u8) -> Option<Rgb> {
        self.colors.get(usize::from(index)).copied()
    }
}

fn truncated(cursor: &Cursor<'_>, count: usize) -> DecodeError {
    DecodeError::TruncatedColorTable {
        expected: count * 3,
        available: cursor.remaining(),
    }
}
