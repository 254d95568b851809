// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! The reader side of the codec: decode primitives from a buffer through a
//! monotonically-advancing cursor.

use bytes::{Buf, Bytes};

use crate::{
    constants::{BOOL_FALSE, BOOL_TRUE},
    error::{UnpackResult, UnpackingError},
};

macro_rules! unpack_fixed_width {
    ($(#[$attr:meta])* $name:ident, $t:ty, $get:ident) => {
        $(#[$attr])*
        ///
        /// # Errors
        /// If fewer bytes remain than the encoded width.
        pub fn $name(&mut self) -> UnpackResult<$t> {
            const WIDTH: usize = std::mem::size_of::<$t>();
            self.check_remaining(WIDTH)?;
            let mut chunk = &self.buf[self.offset..self.offset + WIDTH];
            self.offset += WIDTH;
            Ok(chunk.$get())
        }
    };
}

/// Decodes the primitive sequence a [`Packer`](crate::Packer) produced, in
/// the same order, advancing a cursor by the exact encoded width per call.
///
/// After a decode error the cursor position is unspecified; discard the
/// instance rather than continuing to read from it. A successfully-read
/// buffer can be re-read from the start with [`Unpacker::reset`].
#[derive(Debug, Clone)]
pub struct Unpacker {
    buf: Bytes,
    offset: usize,
}

impl Unpacker {
    /// Wrap a buffer for decoding, cursor at offset 0.
    pub fn new(buf: Bytes) -> Unpacker {
        Unpacker { buf, offset: 0 }
    }

    /// Wrap a copy of the given bytes for decoding.
    pub fn from_slice(buf: &[u8]) -> Unpacker {
        Unpacker::new(Bytes::copy_from_slice(buf))
    }

    /// Current cursor position in bytes from the start of the buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Rewind the cursor to the start for a full re-read.
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Check whether enough bytes remain to decode a given width.
    fn check_remaining(&self, needed: usize) -> UnpackResult<()> {
        let remaining = self.remaining();
        if remaining < needed {
            Err(UnpackingError::RanOutOfBuffer {
                offset: self.offset,
                needed,
                remaining,
            })
        } else {
            Ok(())
        }
    }

    unpack_fixed_width!(
        /// Read one byte as an unsigned value.
        u8, u8, get_u8);
    unpack_fixed_width!(
        /// Read two little-endian bytes as an unsigned value.
        u16, u16, get_u16_le);
    unpack_fixed_width!(
        /// Read four little-endian bytes as an unsigned value.
        u32, u32, get_u32_le);
    unpack_fixed_width!(
        /// Read eight little-endian bytes as an unsigned value.
        u64, u64, get_u64_le);
    unpack_fixed_width!(
        /// Read one byte as a two's-complement value.
        i8, i8, get_i8);
    unpack_fixed_width!(
        /// Read two little-endian two's-complement bytes.
        i16, i16, get_i16_le);
    unpack_fixed_width!(
        /// Read four little-endian two's-complement bytes.
        i32, i32, get_i32_le);
    unpack_fixed_width!(
        /// Read eight little-endian two's-complement bytes.
        i64, i64, get_i64_le);
    unpack_fixed_width!(
        /// Read four bytes of IEEE-754 little-endian.
        f32, f32, get_f32_le);
    unpack_fixed_width!(
        /// Read eight bytes of IEEE-754 little-endian.
        f64, f64, get_f64_le);

    /// Read one byte as a boolean: 0 is false, 1 is true.
    ///
    /// Any other byte is an error. The byte is consumed before validation,
    /// so the cursor has still advanced by 1 — stream position stays
    /// consistent with a successful read of an unknown-but-present byte.
    ///
    /// # Errors
    /// If the buffer is exhausted or the byte is not 0 or 1.
    pub fn bool(&mut self) -> UnpackResult<bool> {
        let offset = self.offset;
        match self.u8()? {
            BOOL_FALSE => Ok(false),
            BOOL_TRUE => Ok(true),
            value => Err(UnpackingError::InvalidBool { offset, value }),
        }
    }

    /// Read a 4-byte little-endian length prefix, then that many raw bytes.
    ///
    /// The returned [`Bytes`] is a zero-copy view into the input buffer.
    ///
    /// # Errors
    /// If the prefix or the declared length runs past the end of the buffer.
    pub fn byte_array(&mut self) -> UnpackResult<Bytes> {
        let len = self.u32()? as usize;
        self.check_remaining(len)?;
        let start = self.offset;
        self.offset += len;
        Ok(self.buf.slice(start..start + len))
    }

    /// Read a length-prefixed byte array and decode it as UTF-8 text.
    ///
    /// Decoding is permissive: invalid UTF-8 sequences become U+FFFD
    /// replacement characters rather than failing, matching the behavior of
    /// the peer implementations this format is shared with.
    ///
    /// # Errors
    /// If the prefix or the declared length runs past the end of the buffer.
    pub fn string(&mut self) -> UnpackResult<String> {
        let bytes = self.byte_array()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl From<Bytes> for Unpacker {
    fn from(buf: Bytes) -> Unpacker {
        Unpacker::new(buf)
    }
}

impl From<Vec<u8>> for Unpacker {
    fn from(buf: Vec<u8>) -> Unpacker {
        Unpacker::new(Bytes::from(buf))
    }
}
