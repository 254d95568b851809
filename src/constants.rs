// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Constants of the wire layout.
//!
//! Constants in this file must remain unchanged so that encoded buffers stay
//! readable by every peer implementation.

/// Default increment by which a `Packer`'s backing buffer grows.
pub const DEFAULT_BLOCK_SIZE: usize = 512 * 1024;

/// Width of the length field preceding byte arrays and strings.
pub const LENGTH_PREFIX_LEN: usize = std::mem::size_of::<u32>();

/// Wire byte for boolean false.
pub const BOOL_FALSE: u8 = 0;

/// Wire byte for boolean true.
pub const BOOL_TRUE: u8 = 1;
