//! Edge cases integration tests for the identifier codec.
//!
//! These tests verify the codec under boundary values, truncated and
//! malformed input, and the reserved root sentinel.

use crdt_id::{
    DecodeError, Decoder, Encoder, Id, ROOT_REPLICA, TypeKind, WireId, Write, ids_equal,
    make_id, read_id, read_wire_id, write_id,
};

fn encode(id: &Id) -> Vec<u8> {
    let mut encoder = Encoder::new();
    write_id(&mut encoder, id);
    encoder.into_vec()
}

#[test]
fn test_encoded_sizes() {
    assert_eq!(encode(&make_id(0, 0)), vec![0x00, 0x00]);
    assert_eq!(encode(&make_id(127, 128)).len(), 3);
    assert_eq!(encode(&make_id(u64::MAX, 0)).len(), 11);
    assert_eq!(encode(&make_id(u64::MAX, u64::MAX)).len(), 20);
}

#[test]
fn test_extreme_values_round_trip() {
    let boundaries = [
        0,
        1,
        127,
        128,
        16_383,
        16_384,
        u64::from(u32::MAX),
        (1 << 53) - 1,
        u64::MAX - 1,
        u64::MAX,
    ];
    for &replica in &boundaries {
        for &sequence in &boundaries {
            let id = make_id(replica, sequence);
            let bytes = encode(&id);
            assert_eq!(read_id(&mut Decoder::new(&bytes)).unwrap(), id);
        }
    }
}

#[test]
fn test_every_truncation_is_eof() {
    let bytes = encode(&make_id(300_000, 1 << 40));
    for cut in 0..bytes.len() {
        let err = read_id(&mut Decoder::new(&bytes[..cut])).unwrap_err();
        assert!(
            matches!(err, DecodeError::UnexpectedEof { .. }),
            "cut at {cut}: {err}"
        );
        assert!(!err.is_malformed());
    }
}

#[test]
fn test_empty_buffer() {
    assert_eq!(
        read_id(&mut Decoder::new(&[])),
        Err(DecodeError::UnexpectedEof { offset: 0 })
    );
    assert_eq!(
        read_wire_id(&mut Decoder::new(&[])),
        Err(DecodeError::UnexpectedEof { offset: 0 })
    );
}

#[test]
fn test_overflowing_varuint_is_malformed() {
    let mut bytes = vec![0xff; 10];
    bytes.push(0x01);
    let err = read_id(&mut Decoder::new(&bytes)).unwrap_err();
    assert!(err.is_malformed());
    assert_eq!(err.offset(), 0);
}

#[test]
fn test_malformed_sequence_reports_offset() {
    // Valid replica, then a non-minimal sequence
    let bytes = [0x05, 0x81, 0x00];
    let err = read_id(&mut Decoder::new(&bytes)).unwrap_err();
    assert!(err.is_malformed());
    assert_eq!(err.offset(), 1);
}

#[test]
fn test_trailing_bytes_are_left_unread() {
    let mut bytes = encode(&make_id(1, 2));
    bytes.extend_from_slice(&[0xde, 0xad]);

    let mut decoder = Decoder::new(&bytes);
    assert_eq!(read_id(&mut decoder).unwrap(), make_id(1, 2));
    assert_eq!(decoder.remaining(), &[0xde, 0xad]);
}

#[test]
fn test_vec_and_encoder_agree() {
    let id = make_id(77, 1_000_000);
    let mut vec: Vec<u8> = Vec::new();
    write_id(&mut vec, &id);
    assert_eq!(vec, encode(&id));
}

#[test]
fn test_sentinel_replica_in_wire_slot_is_root() {
    // An ordinary id using the reserved replica cannot be read as an item slot
    let bytes = encode(&make_id(ROOT_REPLICA, 0));
    assert!(read_wire_id(&mut Decoder::new(&bytes)).is_err());

    let mut buf: Vec<u8> = Vec::new();
    buf.write_var_uint(ROOT_REPLICA);
    buf.write_var_string("");
    buf.write_u8(TypeKind::Map.type_ref());
    let decoded = read_wire_id(&mut Decoder::new(&buf)).unwrap();
    assert_eq!(
        decoded,
        WireId::Root(crdt_id::RootId::new("", TypeKind::Map))
    );
}

#[test]
fn test_neighbours_of_sentinel_are_items() {
    for replica in [ROOT_REPLICA - 1, ROOT_REPLICA + 1] {
        let bytes = encode(&make_id(replica, 3));
        assert_eq!(
            read_wire_id(&mut Decoder::new(&bytes)).unwrap(),
            WireId::Item(make_id(replica, 3))
        );
    }
}

#[test]
fn test_root_id_with_truncated_name() {
    let mut buf: Vec<u8> = Vec::new();
    buf.write_var_uint(ROOT_REPLICA);
    buf.write_var_uint(10);
    buf.write_buf(b"abc");

    let err = read_wire_id(&mut Decoder::new(&buf)).unwrap_err();
    assert!(matches!(err, DecodeError::UnexpectedEof { .. }));
}

#[test]
fn test_root_id_missing_type_ref() {
    let mut buf: Vec<u8> = Vec::new();
    buf.write_var_uint(ROOT_REPLICA);
    buf.write_var_string("text");

    let mut decoder = Decoder::new(&buf);
    assert_eq!(
        read_wire_id(&mut decoder),
        Err(DecodeError::UnexpectedEof { offset: buf.len() })
    );
}

#[test]
fn test_ids_equal_with_extremes() {
    let max = make_id(u64::MAX, u64::MAX);
    let zero = make_id(0, 0);
    assert!(ids_equal(Some(&max), Some(&max)));
    assert!(!ids_equal(Some(&max), Some(&zero)));
    assert!(zero.less_than(&max));
    assert!(!max.less_than(&zero));
    assert!(!max.less_than(&max));
}
