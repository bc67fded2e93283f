use mtwire_mtproto::{Error, MessageId, PlainMessage, ServiceMessage, container, gzip, hashed, nonce};
use mtwire_tl_types::types::{self, Message};
use mtwire_tl_types::{Blob, Registry, Serializable, enums, functions};

fn pong_bytes(msg_id: i64, ping_id: i64) -> Vec<u8> {
    enums::Pong::from(types::Pong { msg_id, ping_id }).to_bytes().unwrap()
}

// ── Plaintext envelope ────────────────────────────────────────────────────────

#[test]
fn plain_message_roundtrip_reports_consumed() {
    let body = functions::ReqPq { nonce: [9; 16] }.to_bytes().unwrap();
    let msg = PlainMessage::new(MessageId(0x5e0b_700a_0000_0004), body);
    let mut wire = msg.to_bytes().unwrap();
    wire.extend_from_slice(&[0xee; 3]);

    let (back, used) = PlainMessage::from_bytes(&wire).unwrap();
    assert_eq!(back, msg);
    assert_eq!(used, wire.len() - 3);
    assert_eq!(back.body_id(), 0x60469778);
    assert_eq!(back.msg_id.unix_secs(), 0x5e0b_700a);
}

#[test]
fn plain_message_rejects_auth_key_id() {
    let mut wire = PlainMessage::new(MessageId(4), vec![]).to_bytes().unwrap();
    wire[0] = 1;
    assert!(matches!(
        PlainMessage::from_bytes(&wire),
        Err(Error::InvalidAuthKeyId { got: 1 })
    ));
}

#[test]
fn plain_message_length_past_end() {
    let mut wire = PlainMessage::new(MessageId(4), vec![1, 2, 3, 4]).to_bytes().unwrap();
    wire.truncate(wire.len() - 1);
    assert!(matches!(
        PlainMessage::from_bytes(&wire),
        Err(Error::LengthMismatch { declared: 4, available: 3 })
    ));
}

#[test]
fn plain_message_truncated_header_is_decode_error() {
    assert!(matches!(PlainMessage::from_bytes(&[0; 10]), Err(Error::Decode(_))));
}

// ── gzip_packed ───────────────────────────────────────────────────────────────

#[test]
fn gzip_pack_unpack() {
    let object = pong_bytes(1, 2).repeat(20);
    let packed = gzip::pack(&object).unwrap();
    assert!(packed.packed_data.len() < object.len());
    assert_eq!(gzip::unpack(&packed).unwrap(), object);
}

#[test]
fn inflate_body_passes_other_bodies_through() {
    let pong = pong_bytes(1, 2);
    assert!(matches!(gzip::inflate_body(&pong).unwrap(), std::borrow::Cow::Borrowed(_)));

    let boxed = enums::Object::from(gzip::pack(&pong).unwrap()).to_bytes().unwrap();
    assert_eq!(gzip::inflate_body(&boxed).unwrap().as_ref(), pong.as_slice());
}

#[test]
fn gzip_of_empty_object_unpacks_empty() {
    let packed = gzip::pack(&[]).unwrap();
    assert_eq!(gzip::unpack(&packed).unwrap(), Vec::<u8>::new());
}

#[test]
fn zlib_stream_is_accepted() {
    use std::io::Write;
    let object = pong_bytes(7, 8);
    let mut enc = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    enc.write_all(&object).unwrap();
    let packed = types::GzipPacked { packed_data: enc.finish().unwrap() };
    assert_eq!(gzip::unpack(&packed).unwrap(), object);
}

#[test]
fn garbage_gzip_is_an_error() {
    let packed = types::GzipPacked { packed_data: vec![1, 2, 3, 4, 5] };
    assert!(matches!(gzip::unpack(&packed), Err(Error::Gzip(_))));
}

// ── Containers ────────────────────────────────────────────────────────────────

#[test]
fn flatten_opens_containers_and_gzip() {
    let ack = enums::MsgsAck::from(types::MsgsAck { msg_ids: vec![7] }).to_bytes().unwrap();
    let zipped_pong = enums::Object::from(gzip::pack(&pong_bytes(3, 4)).unwrap()).to_bytes().unwrap();
    let copy = enums::MessageCopy::from(types::MsgCopy {
        orig_message: Message { msg_id: 30, seqno: 5, body: pong_bytes(5, 6) },
    })
    .to_bytes()
    .unwrap();

    let outer = container::pack(vec![
        Message { msg_id: 10, seqno: 1, body: ack.clone() },
        Message { msg_id: 20, seqno: 3, body: zipped_pong },
        Message { msg_id: 25, seqno: 4, body: copy },
    ]);
    let top = Message { msg_id: 1, seqno: 0, body: outer.to_bytes().unwrap() };

    let leaves = container::flatten(top).unwrap();
    let ids: Vec<_> = leaves.iter().map(|m| m.msg_id).collect();
    assert_eq!(ids, [10, 20, 30]);
    assert_eq!(leaves[0].body, ack);
    assert_eq!(leaves[1].body, pong_bytes(3, 4));
    assert_eq!(leaves[2].body, pong_bytes(5, 6));
}

#[test]
fn unpack_returns_messages_in_order() {
    let msgs = vec![
        Message { msg_id: 1, seqno: 1, body: pong_bytes(1, 1) },
        Message { msg_id: 2, seqno: 2, body: pong_bytes(2, 2) },
    ];
    assert_eq!(container::unpack(container::pack(msgs.clone())), msgs);
}

#[test]
fn flatten_leaf_is_itself() {
    let msg = Message { msg_id: 1, seqno: 1, body: pong_bytes(1, 1) };
    assert_eq!(container::flatten(msg.clone()).unwrap(), vec![msg]);
}

// ── Hashed payloads ───────────────────────────────────────────────────────────

#[test]
fn hashed_roundtrip_ignores_padding() {
    let inner = enums::ClientDhInnerData::from(types::ClientDhInnerData {
        nonce: nonce::int128().unwrap(),
        server_nonce: nonce::int128().unwrap(),
        retry_id: 0,
        g_b: 3u32.into(),
    });
    let wire = hashed::encode_hashed(&inner).unwrap();
    assert_eq!(wire.len() % 16, 0);
    assert_eq!(hashed::decode_hashed::<enums::ClientDhInnerData>(&wire).unwrap(), inner);
}

#[test]
fn hashed_detects_tampering() {
    let mut wire = hashed::with_hash(&pong_bytes(1, 2)).unwrap();
    wire[hashed::HASH_LEN + 5] ^= 0xff;
    assert!(matches!(
        hashed::decode_hashed::<enums::Pong>(&wire),
        Err(Error::HashMismatch { .. })
    ));
}

// ── Service messages ──────────────────────────────────────────────────────────

#[test]
fn service_decode_pong() {
    let mut bytes = pong_bytes(0x10, 42);
    bytes.extend_from_slice(&[0; 8]);
    let (msg, used) = ServiceMessage::decode(&bytes).unwrap();
    assert_eq!(msg, ServiceMessage::Pong(types::Pong { msg_id: 0x10, ping_id: 42 }));
    assert_eq!(used, 20);
    assert_eq!(msg.id(), 0x347773c5);
}

#[test]
fn service_decode_bad_server_salt() {
    let salt = types::BadServerSalt {
        bad_msg_id: 0x100,
        bad_msg_seqno: 1,
        error_code: 48,
        new_server_salt: 0x7777,
    };
    let bytes = enums::BadMsgNotification::from(salt.clone()).to_bytes().unwrap();
    let (msg, used) = ServiceMessage::decode(&bytes).unwrap();
    assert_eq!(used, bytes.len());
    assert_eq!(
        msg,
        ServiceMessage::BadMsgNotification(enums::BadMsgNotification::BadServerSalt(salt))
    );

    let reg = Registry::mtproto().unwrap();
    assert_eq!(
        msg.describe(&reg),
        "bad_server_salt#edab447b bad_msg_id=0x100 new_server_salt=0x7777"
    );
}

#[test]
fn service_describe_rpc_result_looks_inside() {
    let err = enums::RpcError::from(types::RpcError {
        error_code: 400,
        error_message: "BAD_REQUEST".into(),
    })
    .to_bytes()
    .unwrap();
    let bytes = enums::RpcResult::from(types::RpcResult { req_msg_id: 0xabc, result: Blob(err) })
        .to_bytes()
        .unwrap();

    let (msg, used) = ServiceMessage::decode(&bytes).unwrap();
    assert_eq!(used, bytes.len());
    let reg = Registry::mtproto().unwrap();
    assert_eq!(
        msg.describe(&reg),
        "rpc_result#f35c6d01 req_msg_id=0xabc result=rpc_error#2144ca19 400 BAD_REQUEST"
    );
}

#[test]
fn service_describe_container_lists_bodies() {
    let body = container::pack(vec![
        Message { msg_id: 1, seqno: 1, body: pong_bytes(1, 1) },
        Message { msg_id: 2, seqno: 2, body: vec![0xef, 0xbe, 0xad, 0xde] },
    ])
    .to_bytes()
    .unwrap();
    let (msg, _) = ServiceMessage::decode(&body).unwrap();
    let reg = Registry::mtproto().unwrap();
    assert_eq!(msg.describe(&reg), "msg_container#73f1f8dc [pong#347773c5, #deadbeef]");
}

#[test]
fn service_unknown_keeps_whole_body() {
    let bytes = [0xef, 0xbe, 0xad, 0xde, 1, 2, 3, 4];
    let (msg, used) = ServiceMessage::decode(&bytes).unwrap();
    assert_eq!(msg, ServiceMessage::Unknown { id: 0xdeadbeef, body: bytes.to_vec() });
    assert_eq!(used, 8);
    assert_eq!(msg.describe(&Registry::new()), "#deadbeef (8 bytes)");
}

#[test]
fn service_decode_error_renders_through_registry() {
    // a pong id followed by too few bytes
    let bytes = 0x347773c5u32.to_le_bytes();
    let err = ServiceMessage::decode(&bytes).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
    assert_eq!(err.describe(&Registry::mtproto().unwrap()), "unexpected end of buffer");
}
