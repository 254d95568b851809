// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Traits for message types built on top of the codec.

use bytes::Bytes;

use crate::{
    error::{PackResult, PackingError, UnpackResult},
    packer::Packer,
    unpacker::Unpacker,
};

/// Trait for types that can serialize themselves through a [`Packer`].
///
/// Implementations define the field order; the matching [`UnpackFrom`] must
/// read the same fields in the same order, since the wire format carries no
/// type tags.
pub trait PackInto {
    /// Append this value's encoding to the given packer.
    fn pack_into(&self, packer: &mut Packer) -> PackResult;

    /// Pack a fresh buffer containing just this value.
    ///
    /// # Errors
    /// If any field fails its range check.
    fn pack(&self) -> std::result::Result<Bytes, PackingError> {
        let mut packer = Packer::new();
        self.pack_into(&mut packer)?;
        Ok(packer.pack())
    }
}

/// Trait for types that can deserialize themselves through an [`Unpacker`].
pub trait UnpackFrom: Sized {
    /// Decode a value at the unpacker's cursor, advancing past it.
    fn unpack_from(unpacker: &mut Unpacker) -> UnpackResult<Self>;
}
