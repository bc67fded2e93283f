//! Bare constructors of the MTProto service schema.
//!
//! Encoding a value from this module writes its fields only. Wrap it in the
//! matching [`crate::enums`] variant to get the boxed form with its command id.

use num_bigint::BigUint;

use crate::deserialize::{self, Buffer};
use crate::serialize::{self, Error};
use crate::{Blob, Cursor, Deserializable, RawVec, Serializable, Writer};

// ─── Key exchange ────────────────────────────────────────────────────────────

tl_constructor! {
    /// Server answer to `req_pq`.
    ResPq = 0x05162463, "resPQ" {
        nonce: [u8; 16],
        server_nonce: [u8; 16],
        /// Big-endian product to factorize, kept verbatim.
        pq: Vec<u8>,
        server_public_key_fingerprints: Vec<i64>,
    }
}

tl_constructor! {
    PQInnerData = 0x83c95aec, "p_q_inner_data" {
        pq: Vec<u8>,
        p: BigUint,
        q: BigUint,
        nonce: [u8; 16],
        server_nonce: [u8; 16],
        new_nonce: [u8; 32],
    }
}

tl_constructor! {
    ServerDhParamsFail = 0x79cb045d, "server_DH_params_fail" {
        nonce: [u8; 16],
        server_nonce: [u8; 16],
        new_nonce_hash: [u8; 16],
    }
}

tl_constructor! {
    ServerDhParamsOk = 0xd0e8075c, "server_DH_params_ok" {
        nonce: [u8; 16],
        server_nonce: [u8; 16],
        encrypted_answer: Vec<u8>,
    }
}

tl_constructor! {
    ServerDhInnerData = 0xb5890dba, "server_DH_inner_data" {
        nonce: [u8; 16],
        server_nonce: [u8; 16],
        g: i32,
        dh_prime: BigUint,
        g_a: BigUint,
        server_time: i32,
    }
}

tl_constructor! {
    ClientDhInnerData = 0x6643b654, "client_DH_inner_data" {
        nonce: [u8; 16],
        server_nonce: [u8; 16],
        retry_id: i64,
        g_b: BigUint,
    }
}

tl_constructor! {
    DhGenOk = 0x3bcbf734, "dh_gen_ok" {
        nonce: [u8; 16],
        server_nonce: [u8; 16],
        new_nonce_hash1: [u8; 16],
    }
}

tl_constructor! {
    DhGenRetry = 0x46dc1fb9, "dh_gen_retry" {
        nonce: [u8; 16],
        server_nonce: [u8; 16],
        new_nonce_hash2: [u8; 16],
    }
}

tl_constructor! {
    DhGenFail = 0xa69dae02, "dh_gen_fail" {
        nonce: [u8; 16],
        server_nonce: [u8; 16],
        new_nonce_hash3: [u8; 16],
    }
}

// ─── RPC envelopes ───────────────────────────────────────────────────────────

tl_constructor! {
    /// Answer to an RPC call. `result` is the still-encoded boxed answer.
    RpcResult = 0xf35c6d01, "rpc_result" {
        req_msg_id: i64,
        result: Blob,
    }
}

tl_constructor! {
    RpcError = 0x2144ca19, "rpc_error" {
        error_code: i32,
        error_message: String,
    }
}

tl_constructor! {
    RpcAnswerUnknown = 0x5e2ad36e, "rpc_answer_unknown" {}
}

tl_constructor! {
    RpcAnswerDroppedRunning = 0xcd78e586, "rpc_answer_dropped_running" {}
}

tl_constructor! {
    RpcAnswerDropped = 0xa43ad8b7, "rpc_answer_dropped" {
        msg_id: i64,
        seq_no: i32,
        bytes: i32,
    }
}

// ─── Session lifecycle ───────────────────────────────────────────────────────

tl_constructor! {
    FutureSalt = 0x0949d9dc, "future_salt" {
        valid_since: i32,
        valid_until: i32,
        salt: i64,
    }
}

tl_constructor! {
    FutureSalts = 0xae500895, "future_salts" {
        req_msg_id: i64,
        now: i32,
        salts: RawVec<FutureSalt>,
    }
}

tl_constructor! {
    Pong = 0x347773c5, "pong" {
        msg_id: i64,
        ping_id: i64,
    }
}

tl_constructor! {
    DestroySessionOk = 0xe22045fc, "destroy_session_ok" {
        session_id: i64,
    }
}

tl_constructor! {
    DestroySessionNone = 0x62d350c9, "destroy_session_none" {
        session_id: i64,
    }
}

tl_constructor! {
    NewSessionCreated = 0x9ec20908, "new_session_created" {
        first_msg_id: i64,
        unique_id: i64,
        server_salt: i64,
    }
}

// ─── Containers ──────────────────────────────────────────────────────────────

tl_constructor! {
    MsgContainer = 0x73f1f8dc, "msg_container" {
        messages: RawVec<Message>,
    }
}

/// `message msg_id:long seqno:int bytes:int body:Object = Message;`
///
/// Always bare, so it has no command id. `bytes` is not stored: it is the
/// length of `body` and is written and checked on the fly.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub msg_id: i64,
    pub seqno: i32,
    /// The encoded boxed body.
    pub body: Vec<u8>,
}

impl Message {
    /// Leading command id of the body, `0` if the body is too short.
    pub fn body_id(&self) -> u32 {
        crate::command_of_payload(&self.body)
    }

    /// A cursor over the body.
    pub fn body_cursor(&self) -> Cursor<'_> {
        Cursor::from_slice(&self.body)
    }
}

impl Serializable for Message {
    fn serialize(&self, w: &mut Writer) -> serialize::Result<()> {
        let len = i32::try_from(self.body.len()).map_err(|_| Error::ContractViolation {
            field: "message body length",
            value: self.body.len() as u64,
            max: i32::MAX as u64,
        })?;
        w.write_i64(self.msg_id);
        w.write_i32(self.seqno);
        w.write_i32(len);
        w.write_raw(&self.body);
        Ok(())
    }
}

impl Deserializable for Message {
    fn deserialize(buf: Buffer) -> deserialize::Result<Self> {
        let msg_id = buf.read_i64()?;
        let seqno = buf.read_i32()?;
        let len = buf.read_u32()? as usize;
        let body = buf.take(len)?.to_vec();
        Ok(Self { msg_id, seqno, body })
    }
}

tl_constructor! {
    MsgCopy = 0xe06046b2, "msg_copy" {
        orig_message: Message,
    }
}

tl_constructor! {
    GzipPacked = 0x3072cfa1, "gzip_packed" {
        packed_data: Vec<u8>,
    }
}

// ─── Acknowledgement and state ───────────────────────────────────────────────

tl_constructor! {
    MsgsAck = 0x62d6b459, "msgs_ack" {
        msg_ids: Vec<i64>,
    }
}

tl_constructor! {
    BadMsgNotification = 0xa7eff811, "bad_msg_notification" {
        bad_msg_id: i64,
        bad_msg_seqno: i32,
        error_code: i32,
    }
}

tl_constructor! {
    BadServerSalt = 0xedab447b, "bad_server_salt" {
        bad_msg_id: i64,
        bad_msg_seqno: i32,
        error_code: i32,
        new_server_salt: i64,
    }
}

tl_constructor! {
    MsgResendReq = 0x7d861a08, "msg_resend_req" {
        msg_ids: Vec<i64>,
    }
}

tl_constructor! {
    MsgsStateReq = 0xda69fb52, "msgs_state_req" {
        msg_ids: Vec<i64>,
    }
}

tl_constructor! {
    MsgsStateInfo = 0x04deb57d, "msgs_state_info" {
        req_msg_id: i64,
        info: Vec<u8>,
    }
}

tl_constructor! {
    MsgsAllInfo = 0x8cc0d131, "msgs_all_info" {
        msg_ids: Vec<i64>,
        info: Vec<u8>,
    }
}

tl_constructor! {
    MsgDetailedInfo = 0x276d3ec6, "msg_detailed_info" {
        msg_id: i64,
        answer_msg_id: i64,
        bytes: i32,
        status: i32,
    }
}

tl_constructor! {
    MsgNewDetailedInfo = 0x809db6df, "msg_new_detailed_info" {
        answer_msg_id: i64,
        bytes: i32,
        status: i32,
    }
}
