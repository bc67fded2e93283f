//! RPC methods of the MTProto service schema (after `---functions---`).

use num_bigint::BigUint;

use crate::{Blob, enums};

tl_function! {
    /// First step of the key exchange.
    ReqPq = 0x60469778, "req_pq" {
        nonce: [u8; 16],
    } -> enums::ResPq
}

tl_function! {
    ReqDhParams = 0xd712e4be, "req_DH_params" {
        nonce: [u8; 16],
        server_nonce: [u8; 16],
        p: BigUint,
        q: BigUint,
        public_key_fingerprint: i64,
        encrypted_data: Vec<u8>,
    } -> enums::ServerDhParams
}

tl_function! {
    SetClientDhParams = 0xf5045f1f, "set_client_DH_params" {
        nonce: [u8; 16],
        server_nonce: [u8; 16],
        encrypted_data: Vec<u8>,
    } -> enums::SetClientDhParamsAnswer
}

tl_function! {
    RpcDropAnswer = 0x58e4a740, "rpc_drop_answer" {
        req_msg_id: i64,
    } -> enums::RpcDropAnswer
}

tl_function! {
    GetFutureSalts = 0xb921bd04, "get_future_salts" {
        num: i32,
    } -> enums::FutureSalts
}

tl_function! {
    Ping = 0x7abe77ec, "ping" {
        ping_id: i64,
    } -> enums::Pong
}

tl_function! {
    PingDelayDisconnect = 0xf3427b8c, "ping_delay_disconnect" {
        ping_id: i64,
        disconnect_delay: i32,
    } -> enums::Pong
}

tl_function! {
    DestroySession = 0xe7512126, "destroy_session" {
        session_id: i64,
    } -> enums::DestroySessionRes
}

tl_function! {
    /// HTTP transport long-poll. `HttpWait` has no constructors, so the
    /// answer is passed through undecoded.
    HttpWait = 0x9299359f, "http_wait" {
        max_delay: i32,
        wait_after: i32,
        max_wait: i32,
    } -> Blob
}
