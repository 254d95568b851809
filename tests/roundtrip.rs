// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! End-to-end pack/unpack tests over whole messages.

use bytes::Bytes;
use hex_literal::hex;
use proptest::prelude::*;
use wirepack::{Packer, Unpacker};

static_assertions::assert_impl_all!(Packer: Send);
static_assertions::assert_impl_all!(Unpacker: Send, Clone);

#[test]
fn worked_example() {
    let mut p = Packer::new();
    p.u8(17).unwrap();
    p.string("Hello").unwrap();
    p.byte_array(&[1, 2, 3, 5, 8, 13, 21]).unwrap();
    p.string("bye").unwrap();
    let bytes = p.pack();

    assert_eq!(
        &bytes[..],
        hex!("11 05000000 48656c6c6f 07000000 010203 05080d15 03000000 627965")
    );
    assert_eq!(bytes.len(), 1 + (4 + 5) + (4 + 7) + (4 + 3));

    let mut u = Unpacker::new(bytes);
    assert_eq!(u.u8().unwrap(), 17);
    assert_eq!(u.string().unwrap(), "Hello");
    assert_eq!(
        u.byte_array().unwrap(),
        Bytes::from_static(&[1, 2, 3, 5, 8, 13, 21])
    );
    assert_eq!(u.string().unwrap(), "bye");
    assert_eq!(u.offset(), 28);
}

#[test]
fn heterogeneous_sequence() {
    let mut p = Packer::new();
    p.u8(200).unwrap();
    p.u16(31234).unwrap();
    p.u32(1_234_567_890).unwrap();
    p.i8(-50).unwrap();
    p.i16(-12345).unwrap();
    p.i32(-987_654_321).unwrap();
    p.u64(u64::MAX);
    p.i64(i64::MIN);
    p.f32(1.5);
    p.f64(-0.0);
    p.bool(true);
    p.string("grüße").unwrap();
    let bytes = p.pack();
    let total = bytes.len();

    let mut u = Unpacker::new(bytes);
    assert_eq!(u.u8().unwrap(), 200);
    assert_eq!(u.u16().unwrap(), 31234);
    assert_eq!(u.u32().unwrap(), 1_234_567_890);
    assert_eq!(u.i8().unwrap(), -50);
    assert_eq!(u.i16().unwrap(), -12345);
    assert_eq!(u.i32().unwrap(), -987_654_321);
    assert_eq!(u.u64().unwrap(), u64::MAX);
    assert_eq!(u.i64().unwrap(), i64::MIN);
    assert_eq!(u.f32().unwrap(), 1.5);
    let negative_zero = u.f64().unwrap();
    assert_eq!(negative_zero.to_bits(), (-0.0f64).to_bits());
    assert_eq!(u.bool().unwrap(), true);
    assert_eq!(u.string().unwrap(), "grüße");
    assert_eq!(u.offset(), total);
}

#[test]
fn growth_matches_presized_output() {
    // Three and a bit blocks' worth of data through a tiny block size.
    let chunk: Vec<u8> = (0..=255).collect();
    let mut grown = Packer::with_block_size(100);
    let mut presized = Packer::with_capacity(4096);
    for _ in 0..13 {
        grown.append_bytes(&chunk);
        presized.append_bytes(&chunk);
    }
    grown.u32(0xFEED_FACE_i64).unwrap();
    presized.u32(0xFEED_FACE_i64).unwrap();

    let grown = grown.pack();
    let presized = presized.pack();
    assert_eq!(grown.len(), 13 * 256 + 4);
    assert_eq!(grown, presized);
}

#[test]
fn nan_payload_survives() {
    let bits = 0x7FF8_DEAD_BEEF_0001_u64;
    let mut p = Packer::new();
    p.f64(f64::from_bits(bits));
    let mut u = Unpacker::new(p.pack());
    assert_eq!(u.f64().unwrap().to_bits(), bits);

    let bits = 0x7FC0_BEEF_u32;
    let mut p = Packer::new();
    p.f32(f32::from_bits(bits));
    p.f32(-0.0);
    let mut u = Unpacker::new(p.pack());
    assert_eq!(u.f32().unwrap().to_bits(), bits);
    assert_eq!(u.f32().unwrap().to_bits(), (-0.0f32).to_bits());
}

#[test]
fn spliced_submessage() {
    // A pre-packed message dropped into a larger one with append_bytes
    // decodes as if its fields had been packed inline.
    let mut inner = Packer::new();
    inner.u16(777).unwrap();
    inner.bool(false);
    let inner = inner.pack();

    let mut outer = Packer::new();
    outer.u8(1).unwrap();
    outer.append_bytes(&inner);
    outer.u8(2).unwrap();

    let mut u = Unpacker::new(outer.pack());
    assert_eq!(u.u8().unwrap(), 1);
    assert_eq!(u.u16().unwrap(), 777);
    assert_eq!(u.bool().unwrap(), false);
    assert_eq!(u.u8().unwrap(), 2);
}

#[test]
fn reread_after_reset() {
    let mut p = Packer::new();
    p.string("again").unwrap();
    p.i32(-1).unwrap();
    let mut u = Unpacker::new(p.pack());

    for _ in 0..2 {
        assert_eq!(u.string().unwrap(), "again");
        assert_eq!(u.i32().unwrap(), -1);
        assert_eq!(u.offset(), (4 + 5) + 4);
        u.reset();
    }
}

proptest! {
    #[test]
    fn roundtrip_u8(v: u8) {
        let mut p = Packer::new();
        p.u8(i64::from(v)).unwrap();
        let mut u = Unpacker::new(p.pack());
        prop_assert_eq!(u.u8().unwrap(), v);
    }

    #[test]
    fn roundtrip_i8(v in -127i8..=127) {
        // -127 is the packer's low bound for i8; it rejects -128.
        let mut p = Packer::new();
        p.i8(i64::from(v)).unwrap();
        let mut u = Unpacker::new(p.pack());
        prop_assert_eq!(u.i8().unwrap(), v);
    }

    #[test]
    fn roundtrip_u16(v: u16) {
        let mut p = Packer::new();
        p.u16(i64::from(v)).unwrap();
        let mut u = Unpacker::new(p.pack());
        prop_assert_eq!(u.u16().unwrap(), v);
    }

    #[test]
    fn roundtrip_i16(v: i16) {
        let mut p = Packer::new();
        p.i16(i64::from(v)).unwrap();
        let mut u = Unpacker::new(p.pack());
        prop_assert_eq!(u.i16().unwrap(), v);
    }

    #[test]
    fn roundtrip_u32(v: u32) {
        let mut p = Packer::new();
        p.u32(i64::from(v)).unwrap();
        let mut u = Unpacker::new(p.pack());
        prop_assert_eq!(u.u32().unwrap(), v);
    }

    #[test]
    fn roundtrip_i32(v: i32) {
        let mut p = Packer::new();
        p.i32(i64::from(v)).unwrap();
        let mut u = Unpacker::new(p.pack());
        prop_assert_eq!(u.i32().unwrap(), v);
    }

    #[test]
    fn roundtrip_u64(v: u64) {
        let mut p = Packer::new();
        p.u64(v);
        let mut u = Unpacker::new(p.pack());
        prop_assert_eq!(u.u64().unwrap(), v);
    }

    #[test]
    fn roundtrip_i64(v: i64) {
        let mut p = Packer::new();
        p.i64(v);
        let mut u = Unpacker::new(p.pack());
        prop_assert_eq!(u.i64().unwrap(), v);
    }

    #[test]
    fn roundtrip_f32_bit_pattern(bits: u32) {
        let mut p = Packer::new();
        p.f32(f32::from_bits(bits));
        let mut u = Unpacker::new(p.pack());
        prop_assert_eq!(u.f32().unwrap().to_bits(), bits);
    }

    #[test]
    fn roundtrip_f64_bit_pattern(bits: u64) {
        let mut p = Packer::new();
        p.f64(f64::from_bits(bits));
        let mut u = Unpacker::new(p.pack());
        prop_assert_eq!(u.f64().unwrap().to_bits(), bits);
    }

    #[test]
    fn roundtrip_string(s in ".*") {
        let mut p = Packer::new();
        p.string(&s).unwrap();
        let mut u = Unpacker::new(p.pack());
        prop_assert_eq!(u.string().unwrap(), s);
        prop_assert_eq!(u.remaining(), 0);
    }

    #[test]
    fn roundtrip_byte_array(v in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let mut p = Packer::new();
        p.byte_array(&v).unwrap();
        let mut u = Unpacker::new(p.pack());
        prop_assert_eq!(&u.byte_array().unwrap()[..], &v[..]);
        prop_assert_eq!(u.offset(), 4 + v.len());
    }
}
