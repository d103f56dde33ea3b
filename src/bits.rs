//! A small byte cursor over an on-disk trie image, used by [`crate::storage`]
//! to parse the serialized format and by nothing else.

use byteorder::{BigEndian, ReadBytesExt};
use std::{error, fmt, io};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    BufferOverflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("buffer overflow")
    }
}

impl error::Error for Error {}

impl From<io::Error> for Error {
    fn from(_: io::Error) -> Self {
        Error::BufferOverflow
    }
}

#[derive(Clone)]
pub struct Cursor<'input> {
    buffer: &'input [u8],
    offset: usize,
}

impl<'input> Cursor<'input> {
    #[must_use]
    pub fn new(buffer: &'input [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    pub fn read_u8(&mut self) -> Result<u8, Error> {
        let mut rest = self.rest();
        let v = rest.read_u8()?;
        self.offset += 1;
        Ok(v)
    }

    pub fn read_u32(&mut self) -> Result<u32, Error> {
        let mut rest = self.rest();
        let v = rest.read_u32::<BigEndian>()?;
        self.offset += 4;
        Ok(v)
    }

    pub fn read_bytes(&mut self, length: usize) -> Result<&'input [u8], Error> {
        let start = self.offset;
        let end = start + length;
        let bytes = self.buffer.get(start..end).ok_or(Error::BufferOverflow)?;
        self.offset = end;
        Ok(bytes)
    }

    pub fn skip(&mut self, count: usize) -> Result<(), Error> {
        let end = self.offset + count;
        if end > self.buffer.len() {
            return Err(Error::BufferOverflow);
        }
        self.offset = end;
        Ok(())
    }

    fn rest(&self) -> &'input [u8] {
        &self.buffer[self.offset..]
    }
}

impl fmt::Debug for Cursor<'_> {
    #[cold]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("offset", &self.offset)
            .field("remaining", &self.remaining())
            .finish()
    }
}

#[test]
fn test_cursor_u32_roundtrip() {
    let bytes = [0x00, 0x00, 0x01, 0x00, 0xAB, 0xCD, 0xEF, 0x01];
    let mut c = Cursor::new(&bytes);
    assert_eq!(256, c.read_u32().unwrap());
    assert_eq!(0xABCDEF01, c.read_u32().unwrap());
    assert!(c.is_at_end());
    assert!(c.read_u8().is_err());
}

#[test]
fn test_cursor_bytes_and_skip() {
    let bytes = [1, 2, 3, 4, 5, 6];
    let mut c = Cursor::new(&bytes);
    assert_eq!(1, c.read_u8().unwrap());
    assert_eq!(&[2, 3], c.read_bytes(2).unwrap());
    c.skip(1).unwrap();
    assert_eq!(&[5, 6], c.read_bytes(2).unwrap());
    assert!(c.is_at_end());
    assert!(c.skip(1).is_err());
}
