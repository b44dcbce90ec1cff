#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeResult {
    Code(u16),
    /// The zero-length terminator sub-block was reached.
    EndOfStream,
    /// The buffer ran out before the terminator sub-block.
    NeedMoreData,
}

/// Reads least-significant-bit-first codes out of a chain of GIF data
/// sub-blocks, crossing sub-block boundaries transparently.
pub struct CodeReader<'a> {
    buf: &'a [u8],
    // index of the next unread byte, length prefixes included
    position: usize,
    block_remaining: usize,
    bits: u32,
    bit_count: u32,
    done: bool,
}

impl<'a> CodeReader<'a> {
    /// `buf` starts at the first sub-block length byte.
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            position: 0,
            block_remaining: 0,
            bits: 0,
            bit_count: 0,
            done: false,
        }
    }

    pub fn next(&mut self, code_size: u32) -> CodeResult {
        debug_assert!((1..=12).contains(&code_size));

        while self.bit_count < code_size {
            if self.done {
                return CodeResult::EndOfStream;
            }

            if self.block_remaining == 0 {
                let Some(&block_size) = self.buf.get(self.position) else {
                    return CodeResult::NeedMoreData;
                };
                self.position += 1;
                if block_size == 0 {
                    self.done = true;
                    return CodeResult::EndOfStream;
                }
                self.block_remaining = block_size.into();
            }

            let Some(&byte) = self.buf.get(self.position) else {
                return CodeResult::NeedMoreData;
            };
            self.position += 1;
            self.block_remaining -= 1;

            self.bits |= u32::from(byte) << self.bit_count;
            self.bit_count += 8;
        }

        let code = self.bits & ((1 << code_size) - 1);
        self.bits >>= code_size;
        self.bit_count -= code_size;
        CodeResult::Code(code as u16)
    }

    /// Skips whatever is left of the sub-block chain, terminator included,
    /// and returns the total number of bytes consumed. `None` if the buffer
    /// ends before the terminator.
    pub fn finish(mut self) -> Option<usize> {
        if self.done {
            return Some(self.position);
        }

        self.position += self.block_remaining;
        loop {
            let block_size = *self.buf.get(self.position)?;
            self.position += 1;
            if block_size == 0 {
                return Some(self.position);
            }
            self.position += usize::from(block_size);
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }
}
