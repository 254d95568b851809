// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Little-endian, length-prefixed binary packing and unpacking.
//!
//! [`Packer`] serializes a sequence of primitive values into a contiguous,
//! block-grown byte buffer; [`Unpacker`] decodes the same sequence back
//! through an explicit cursor. The format is not self-describing: there are
//! no type tags, so both ends must agree on the type/order sequence out of
//! band. Framing, transport, and message dispatch all live in layers above
//! this crate.
//!
//! ```
//! use wirepack::{Packer, Unpacker};
//!
//! let mut packer = Packer::new();
//! packer.u8(17)?;
//! packer.string("Hello")?;
//! let bytes = packer.pack();
//!
//! let mut unpacker = Unpacker::new(bytes);
//! assert_eq!(unpacker.u8()?, 17);
//! assert_eq!(unpacker.string()?, "Hello");
//! assert_eq!(unpacker.offset(), 1 + 4 + 5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod constants;
mod error;
mod packer;
mod traits;
mod unpacker;

pub use crate::{
    error::{PackResult, PackingError, UnpackResult, UnpackingError},
    packer::Packer,
    traits::{PackInto, UnpackFrom},
    unpacker::Unpacker,
};
