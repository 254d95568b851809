// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Error types returned by packing/unpacking.

use thiserror::Error;

/// Error type returned by `Packer` methods.
///
/// Every variant carries the offending value and the bound it violated, so a
/// failed pack can be diagnosed without reproducing the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackingError {
    #[error("value {value} is above the maximum {bound} encodable as {encoding}")]
    AboveBound {
        value: i64,
        bound: i64,
        encoding: &'static str,
    },
    #[error("value {value} is below the minimum {bound} encodable as {encoding}")]
    BelowBound {
        value: i64,
        bound: i64,
        encoding: &'static str,
    },
    #[error("byte array of length {len} does not fit in a u32 length prefix")]
    OversizeByteArray { len: usize },
}

/// Error type returned by `Unpacker` methods.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnpackingError {
    #[error(
        "reading {needed} bytes at offset {offset} would run past the end of the buffer: only {remaining} bytes remain"
    )]
    RanOutOfBuffer {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    #[error("invalid byte {value:#04x} at offset {offset}: expected a boolean (0 or 1)")]
    InvalidBool { offset: usize, value: u8 },
}

/// Shorthand name for what a packing operation should return.
pub type PackResult = std::result::Result<(), PackingError>;

/// Shorthand name for what an unpacking operation should return.
pub type UnpackResult<T> = std::result::Result<T, UnpackingError>;
