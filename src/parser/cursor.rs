use crate::error::{DecodeError, Result};

/// Forward-only position over a resident byte buffer.
///
/// Every read either advances the position by exactly the number of bytes it
/// returns or fails without moving, so a caller can always tell where the
/// next block begins.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Bytes from the current position to the end of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.buffer[self.position..]
    }

    pub fn peek_byte(&self) -> Result<u8> {
        self.buffer
            .get(self.position)
            .copied()
            .ok_or(self.truncated())
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        let byte = self.peek_byte()?;
        self.position += 1;
        Ok(byte)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        // multi-byte fields are stored least significant byte first
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(self.truncated());
        }
        let bytes = &self.buffer[self.position..self.position + count];
        self.position += count;
        Ok(bytes)
    }

    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Reads a chain of length-prefixed sub-blocks up to and including the
    /// zero-length terminator, returning the concatenated payload.
    pub fn read_sub_blocks(&mut self) -> Result<Vec<u8>> {
        let mut block_size = self.read_byte()?;
        let mut result = Vec::with_capacity(block_size.into());

        while block_size != 0 {
            result.extend_from_slice(self.read_bytes(block_size.into())?);
            block_size = self.read_byte()?;
        }

        Ok(result)
    }

    /// Like [`Cursor::read_sub_blocks`] but discards the payload.
    pub fn skip_sub_blocks(&mut self) -> Result<()> {
        loop {
            let block_size = self.read_byte()?;
            if block_size == 0 {
                return Ok(());
            }
            self.skip(block_size.into())?;
        }
    }

    fn truncated(&self) -> DecodeError {
        DecodeError::TruncatedStream {
            offset: self.position,
        }
    }
}
