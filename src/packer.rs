// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! The writer side of the codec: serialize primitives into a growable buffer.

use std::convert::TryFrom;

use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    constants::{BOOL_FALSE, BOOL_TRUE, DEFAULT_BLOCK_SIZE, LENGTH_PREFIX_LEN},
    error::{PackResult, PackingError},
};

macro_rules! pack_checked_int {
    ($(#[$attr:meta])* $name:ident, $t:ty, $put:ident, $min:expr, $max:expr) => {
        $(#[$attr])*
        ///
        /// # Errors
        /// If the value is outside the encodable range.
        pub fn $name(&mut self, v: i64) -> PackResult {
            const MIN: i64 = $min;
            const MAX: i64 = $max;
            if v > MAX {
                return Err(PackingError::AboveBound {
                    value: v,
                    bound: MAX,
                    encoding: stringify!($name),
                });
            }
            if v < MIN {
                return Err(PackingError::BelowBound {
                    value: v,
                    bound: MIN,
                    encoding: stringify!($name),
                });
            }
            self.grow_for(std::mem::size_of::<$t>());
            self.buf.$put(v as $t);
            Ok(())
        }
    };
}

macro_rules! pack_exact_width {
    ($(#[$attr:meta])* $name:ident, $t:ty, $put:ident) => {
        $(#[$attr])*
        pub fn $name(&mut self, v: $t) {
            self.grow_for(std::mem::size_of::<$t>());
            self.buf.$put(v);
        }
    };
}

/// Serializes a sequence of primitive values into a contiguous byte buffer.
///
/// The backing buffer grows in multiples of a block size (default
/// [`DEFAULT_BLOCK_SIZE`]) so that a message much larger than one block costs
/// one copy per block rather than one per write. The finished bytes are
/// obtained exactly once with [`Packer::pack`], which consumes the instance.
///
/// There are no type tags on the wire: the peer must unpack the same type
/// sequence in the same order.
#[derive(Debug)]
pub struct Packer {
    buf: BytesMut,
    block_size: usize,
}

impl Default for Packer {
    fn default() -> Self {
        Self::new()
    }
}

impl Packer {
    /// Create a packer with the default growth block size.
    ///
    /// No allocation happens until the first write.
    pub fn new() -> Packer {
        Packer::with_block_size(DEFAULT_BLOCK_SIZE)
    }

    /// Create a packer whose buffer grows in multiples of `block_size` bytes.
    pub fn with_block_size(block_size: usize) -> Packer {
        assert!(block_size > 0, "block size must be nonzero");
        Packer {
            buf: BytesMut::new(),
            block_size,
        }
    }

    /// Create a packer pre-sized for a message of roughly `capacity` bytes,
    /// with the default block size for any growth beyond that.
    pub fn with_capacity(capacity: usize) -> Packer {
        Packer {
            buf: BytesMut::with_capacity(capacity),
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }

    /// Ensure capacity for `additional` more bytes, growing to the smallest
    /// block-size multiple that fits the pending write.
    fn grow_for(&mut self, additional: usize) {
        let needed = self.buf.len() + additional;
        if needed > self.buf.capacity() {
            let target = ((needed + self.block_size - 1) / self.block_size) * self.block_size;
            self.buf.reserve(target - self.buf.len());
        }
    }

    pack_checked_int!(
        /// Append one byte encoding an unsigned value in `0..=255`.
        u8, u8, put_u8, 0, u8::MAX as i64);
    pack_checked_int!(
        /// Append two little-endian bytes encoding an unsigned value in `0..=65535`.
        u16, u16, put_u16_le, 0, u16::MAX as i64);
    pack_checked_int!(
        /// Append four little-endian bytes encoding an unsigned value in `0..=4294967295`.
        u32, u32, put_u32_le, 0, u32::MAX as i64);
    pack_checked_int!(
        /// Append one two's-complement byte.
        ///
        /// Accepts `-127..=127`: the low bound is one short of what the wire
        /// byte could hold. The reference implementation rejects -128 and
        /// peers may rely on never seeing it, so we reproduce the check
        /// rather than widen it.
        i8, i8, put_i8, -(i8::MAX as i64), i8::MAX as i64);
    pack_checked_int!(
        /// Append two little-endian two's-complement bytes encoding a value
        /// in `-32768..=32767`.
        i16, i16, put_i16_le, i16::MIN as i64, i16::MAX as i64);
    pack_checked_int!(
        /// Append four little-endian two's-complement bytes encoding a value
        /// in `i32::MIN..=i32::MAX`.
        i32, i32, put_i32_le, i32::MIN as i64, i32::MAX as i64);

    pack_exact_width!(
        /// Append eight little-endian bytes. The parameter type already
        /// enforces the width, so there is no range check to fail.
        u64, u64, put_u64_le);
    pack_exact_width!(
        /// Append eight little-endian two's-complement bytes.
        i64, i64, put_i64_le);
    pack_exact_width!(
        /// Append four bytes of IEEE-754 little-endian. Any value is
        /// accepted, including infinities and NaN.
        f32, f32, put_f32_le);
    pack_exact_width!(
        /// Append eight bytes of IEEE-754 little-endian.
        f64, f64, put_f64_le);

    /// Append one byte: 1 for true, 0 for false.
    pub fn bool(&mut self, v: bool) {
        self.grow_for(1);
        self.buf.put_u8(if v { BOOL_TRUE } else { BOOL_FALSE });
    }

    /// Append raw bytes with no length prefix.
    ///
    /// This is the building block for the prefixed variants, and the way to
    /// splice an already-packed sub-message into a larger one.
    pub fn append_bytes(&mut self, v: &[u8]) {
        self.grow_for(v.len());
        self.buf.put_slice(v);
    }

    /// Append a 4-byte little-endian length prefix, then the raw bytes.
    ///
    /// The largest accepted length is `u32::MAX` bytes. Note that this is
    /// one stricter than some peer implementations, which accept a length of
    /// exactly 2^32 and then silently write a wrapped prefix of 0; that
    /// input is rejected here instead of corrupting the stream.
    ///
    /// # Errors
    /// If the length does not fit in the u32 prefix.
    pub fn byte_array(&mut self, v: &[u8]) -> PackResult {
        let len = u32::try_from(v.len())
            .map_err(|_| PackingError::OversizeByteArray { len: v.len() })?;
        self.grow_for(LENGTH_PREFIX_LEN + v.len());
        self.buf.put_u32_le(len);
        self.buf.put_slice(v);
        Ok(())
    }

    /// Append a string as its length-prefixed UTF-8 bytes.
    ///
    /// # Errors
    /// If the UTF-8 encoding does not fit in the u32 prefix.
    pub fn string(&mut self, v: &str) -> PackResult {
        self.byte_array(v.as_bytes())
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The bytes written so far, without consuming the packer.
    ///
    /// Only the logically-written prefix is visible, never the
    /// over-allocated tail of the backing buffer.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..]
    }

    /// Finish, yielding exactly the written bytes.
    ///
    /// Consumes the packer: a fresh instance is needed for the next message.
    pub fn pack(self) -> Bytes {
        self.buf.freeze()
    }
}
