use super::bit_reader::{CodeReader, CodeResult};
use crate::error::{DecodeError, Result};

use log::trace;

/// Codes are at most 12 bits wide.
pub const MAX_CODES: usize = 4096;
const MAX_STACK: usize = 2 * MAX_CODES;
const NO_PREFIX: u16 = u16::MAX;

#[derive(Debug)]
pub struct Decompressed {
    pub indices: Vec<u8>,
    /// Input bytes consumed, minimum code size and terminator included.
    pub consumed: usize,
}

/// Decompresses an image data stream: the minimum code size byte followed by
/// the data sub-blocks.
pub fn decompress(buf: &[u8]) -> Result<Decompressed> {
    LzwDecoder::new().decompress(buf, usize::MAX)
}

/// Prefix/suffix string table. Every code at or above `clear_code + 2` is a
/// prefix code plus one trailing byte; codes below `clear_code` are literals.
struct Dictionary {
    prefix: [u16; MAX_CODES],
    suffix: [u8; MAX_CODES],
    clear_code: u16,
    next_code: u16,
}

impl Dictionary {
    fn new(minimum_code_size: u8) -> Self {
        let clear_code = 1u16 << minimum_code_size;
        let mut suffix = [0; MAX_CODES];
        for (code, byte) in suffix.iter_mut().enumerate().take(clear_code.into()) {
            *byte = code as u8;
        }

        Self {
            prefix: [NO_PREFIX; MAX_CODES],
            suffix,
            clear_code,
            next_code: clear_code + 2,
        }
    }

    fn reset(&mut self) {
        self.prefix[usize::from(self.clear_code)..].fill(NO_PREFIX);
        self.next_code = self.clear_code + 2;
    }

    fn insert(&mut self, prefix: u16, suffix: u8) -> bool {
        if usize::from(self.next_code) >= MAX_CODES {
            return false;
        }
        self.prefix[usize::from(self.next_code)] = prefix;
        self.suffix[usize::from(self.next_code)] = suffix;
        self.next_code += 1;
        true
    }

    /// Pushes the string for `code` onto `stack` last byte first and returns
    /// its first byte.
    fn resolve(&self, mut code: u16, stack: &mut Vec<u8>) -> Result<u8> {
        let end_code = self.clear_code + 1;
        while code > end_code {
            let prefix = self.prefix[usize::from(code)];
            if prefix == code || prefix == NO_PREFIX || stack.len() >= MAX_STACK {
                return Err(DecodeError::CorruptDictionary { code });
            }
            stack.push(self.suffix[usize::from(code)]);
            code = prefix;
        }

        if code >= self.clear_code {
            return Err(DecodeError::CorruptDictionary { code });
        }

        let first = self.suffix[usize::from(code)];
        stack.push(first);
        Ok(first)
    }
}

/// Working memory for one decompression. Built fresh for every call so no
/// table state survives between images.
pub struct LzwDecoder {
    stack: Vec<u8>,
    base_offset: usize,
}

impl LzwDecoder {
    pub fn new() -> Self {
        Self {
            stack: Vec::with_capacity(MAX_STACK),
            base_offset: 0,
        }
    }

    /// File offset of the first byte handed to [`LzwDecoder::decompress`],
    /// used to report truncation at an absolute position.
    pub fn with_base_offset(mut self, base_offset: usize) -> Self {
        self.base_offset = base_offset;
        self
    }

    /// Decompresses `buf`, keeping at most `limit` output bytes. The stream
    /// is still walked to its terminator once the limit is reached.
    pub fn decompress(mut self, buf: &[u8], limit: usize) -> Result<Decompressed> {
        let Some((&minimum_code_size, data)) = buf.split_first() else {
            return Err(DecodeError::TruncatedStream {
                offset: self.base_offset,
            });
        };
        if !(2..=8).contains(&minimum_code_size) {
            return Err(DecodeError::InvalidMinimumCodeSize(minimum_code_size));
        }

        let mut dictionary = Box::new(Dictionary::new(minimum_code_size));
        let clear_code = dictionary.clear_code;
        let end_of_information_code = clear_code + 1;
        let initial_code_size = u32::from(minimum_code_size) + 1;

        let mut code_size = initial_code_size;
        let mut threshold = clear_code * 2;
        let mut reader = CodeReader::new(data);
        let mut indices = Vec::new();

        let mut last_code: Option<u16> = None;
        let mut first_byte = 0u8;

        loop {
            let code = match reader.next(code_size) {
                CodeResult::Code(code) => code,
                CodeResult::EndOfStream | CodeResult::NeedMoreData => {
                    return Err(DecodeError::TruncatedStream {
                        offset: self.base_offset + 1 + reader.position(),
                    });
                }
            };

            if code == clear_code {
                trace!("clear code, resetting dictionary");
                dictionary.reset();
                code_size = initial_code_size;
                threshold = clear_code * 2;
                last_code = None;
                continue;
            }

            if code == end_of_information_code {
                trace!("end of information code");
                break;
            }

            let Some(previous) = last_code else {
                // the first code after a clear must be a literal
                if code >= clear_code {
                    return Err(DecodeError::CorruptDictionary { code });
                }
                first_byte = code as u8;
                push_limited(&mut indices, &[first_byte], limit);
                last_code = Some(code);
                continue;
            };

            self.stack.clear();
            if code < dictionary.next_code {
                first_byte = dictionary.resolve(code, &mut self.stack)?;
            } else if code == dictionary.next_code {
                // the code being defined right now: previous string plus its
                // own first byte
                self.stack.push(first_byte);
                first_byte = dictionary.resolve(previous, &mut self.stack)?;
            } else {
                return Err(DecodeError::CorruptDictionary { code });
            }

            self.stack.reverse();
            push_limited(&mut indices, &self.stack, limit);

            if dictionary.insert(previous, first_byte)
                && dictionary.next_code >= threshold
                && usize::from(threshold) < MAX_CODES
            {
                threshold *= 2;
                code_size += 1;
            }

            last_code = Some(code);
        }

        let consumed = reader.finish().ok_or(DecodeError::TruncatedStream {
            offset: self.base_offset + buf.len(),
        })?;

        Ok(Decompressed {
            indices,
            consumed: 1 + consumed,
        })
    }
}

impl Default for LzwDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn push_limited(indices: &mut Vec<u8>, bytes: &[u8], limit: usize) {
    let room = limit.saturating_sub(indices.len());
    indices.extend_from_slice(&bytes[..bytes.len().min(room)]);
}
