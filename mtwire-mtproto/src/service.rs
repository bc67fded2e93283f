//! Typed view of the service messages a server sends.

use mtwire_tl_types::{Cursor, Deserializable, Identifiable, Registry, enums, types};

use crate::errors::Result;
use crate::gzip;

/// Any message body, decoded into its service record when the command id is
/// one of the MTProto service combinators.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq)]
pub enum ServiceMessage {
    RpcResult(types::RpcResult),
    RpcError(types::RpcError),
    RpcDropAnswer(enums::RpcDropAnswer),
    Container(types::MsgContainer),
    Copy(types::MsgCopy),
    GzipPacked(types::GzipPacked),
    Pong(types::Pong),
    MsgsAck(types::MsgsAck),
    BadMsgNotification(enums::BadMsgNotification),
    NewSessionCreated(types::NewSessionCreated),
    FutureSalts(types::FutureSalts),
    DestroySession(enums::DestroySessionRes),
    MsgResendReq(types::MsgResendReq),
    MsgsStateReq(types::MsgsStateReq),
    MsgsStateInfo(types::MsgsStateInfo),
    MsgsAllInfo(types::MsgsAllInfo),
    MsgDetailedInfo(enums::MsgDetailedInfo),
    /// A body whose command id is not a service combinator. `body` holds the
    /// whole payload, command id included.
    Unknown { id: u32, body: Vec<u8> },
}

/// Read the command id of a bare constructor, then the constructor itself.
fn boxed<T: Deserializable + Identifiable>(cur: &mut Cursor) -> Result<T> {
    cur.expect_command(T::CONSTRUCTOR_ID)?;
    Ok(T::deserialize(cur)?)
}

impl ServiceMessage {
    /// Decode the message at the start of `bytes`, returning it together with
    /// the number of bytes it occupied.
    ///
    /// `rpc_result` and unknown bodies extend to the end of the input.
    pub fn decode(bytes: &[u8]) -> Result<(Self, usize)> {
        let mut cur = Cursor::from_slice(bytes);
        let id = cur.peek_command()?;

        let msg = match id {
            types::RpcResult::CONSTRUCTOR_ID => Self::RpcResult(boxed(&mut cur)?),
            types::RpcError::CONSTRUCTOR_ID => Self::RpcError(boxed(&mut cur)?),
            types::RpcAnswerUnknown::CONSTRUCTOR_ID
            | types::RpcAnswerDroppedRunning::CONSTRUCTOR_ID
            | types::RpcAnswerDropped::CONSTRUCTOR_ID => {
                Self::RpcDropAnswer(enums::RpcDropAnswer::deserialize(&mut cur)?)
            }
            types::MsgContainer::CONSTRUCTOR_ID => Self::Container(boxed(&mut cur)?),
            types::MsgCopy::CONSTRUCTOR_ID => Self::Copy(boxed(&mut cur)?),
            types::GzipPacked::CONSTRUCTOR_ID => Self::GzipPacked(boxed(&mut cur)?),
            types::Pong::CONSTRUCTOR_ID => Self::Pong(boxed(&mut cur)?),
            types::MsgsAck::CONSTRUCTOR_ID => Self::MsgsAck(boxed(&mut cur)?),
            types::BadMsgNotification::CONSTRUCTOR_ID | types::BadServerSalt::CONSTRUCTOR_ID => {
                Self::BadMsgNotification(enums::BadMsgNotification::deserialize(&mut cur)?)
            }
            types::NewSessionCreated::CONSTRUCTOR_ID => Self::NewSessionCreated(boxed(&mut cur)?),
            types::FutureSalts::CONSTRUCTOR_ID => Self::FutureSalts(boxed(&mut cur)?),
            types::DestroySessionOk::CONSTRUCTOR_ID | types::DestroySessionNone::CONSTRUCTOR_ID => {
                Self::DestroySession(enums::DestroySessionRes::deserialize(&mut cur)?)
            }
            types::MsgResendReq::CONSTRUCTOR_ID => Self::MsgResendReq(boxed(&mut cur)?),
            types::MsgsStateReq::CONSTRUCTOR_ID => Self::MsgsStateReq(boxed(&mut cur)?),
            types::MsgsStateInfo::CONSTRUCTOR_ID => Self::MsgsStateInfo(boxed(&mut cur)?),
            types::MsgsAllInfo::CONSTRUCTOR_ID => Self::MsgsAllInfo(boxed(&mut cur)?),
            types::MsgDetailedInfo::CONSTRUCTOR_ID | types::MsgNewDetailedInfo::CONSTRUCTOR_ID => {
                Self::MsgDetailedInfo(enums::MsgDetailedInfo::deserialize(&mut cur)?)
            }
            _ => {
                log::debug!("[mtwire] not a service message: #{id:08x}");
                Self::Unknown { id, body: cur.read_to_end().to_vec() }
            }
        };
        Ok((msg, cur.pos()))
    }

    /// Command id of the decoded record.
    pub fn id(&self) -> u32 {
        match self {
            Self::RpcResult(_) => types::RpcResult::CONSTRUCTOR_ID,
            Self::RpcError(_) => types::RpcError::CONSTRUCTOR_ID,
            Self::RpcDropAnswer(x) => x.constructor_id(),
            Self::Container(_) => types::MsgContainer::CONSTRUCTOR_ID,
            Self::Copy(_) => types::MsgCopy::CONSTRUCTOR_ID,
            Self::GzipPacked(_) => types::GzipPacked::CONSTRUCTOR_ID,
            Self::Pong(_) => types::Pong::CONSTRUCTOR_ID,
            Self::MsgsAck(_) => types::MsgsAck::CONSTRUCTOR_ID,
            Self::BadMsgNotification(x) => x.constructor_id(),
            Self::NewSessionCreated(_) => types::NewSessionCreated::CONSTRUCTOR_ID,
            Self::FutureSalts(_) => types::FutureSalts::CONSTRUCTOR_ID,
            Self::DestroySession(x) => x.constructor_id(),
            Self::MsgResendReq(_) => types::MsgResendReq::CONSTRUCTOR_ID,
            Self::MsgsStateReq(_) => types::MsgsStateReq::CONSTRUCTOR_ID,
            Self::MsgsStateInfo(_) => types::MsgsStateInfo::CONSTRUCTOR_ID,
            Self::MsgsAllInfo(_) => types::MsgsAllInfo::CONSTRUCTOR_ID,
            Self::MsgDetailedInfo(x) => x.constructor_id(),
            Self::Unknown { id, .. } => *id,
        }
    }

    /// One-line human-readable summary, with command ids rendered through
    /// `registry`.
    pub fn describe(&self, registry: &Registry) -> String {
        let name = registry.describe(self.id());
        match self {
            Self::RpcResult(r) => format!(
                "{name} req_msg_id={:#x} result={}",
                r.req_msg_id,
                describe_object(&r.result.0, registry)
            ),
            Self::RpcError(e) => format!("{name} {} {}", e.error_code, e.error_message),
            Self::Container(c) => {
                let inner: Vec<String> = c
                    .messages
                    .0
                    .iter()
                    .map(|m| registry.describe(m.body_id()))
                    .collect();
                format!("{name} [{}]", inner.join(", "))
            }
            Self::Copy(c) => format!("{name} of {}", registry.describe(c.orig_message.body_id())),
            Self::GzipPacked(p) => match gzip::unpack(p) {
                Ok(inner) => format!("{name} → {}", describe_object(&inner, registry)),
                Err(e) => format!("{name} ({e})"),
            },
            Self::Pong(p) => format!("{name} msg_id={:#x} ping_id={}", p.msg_id, p.ping_id),
            Self::MsgsAck(a) => format!("{name} {:x?}", a.msg_ids),
            Self::BadMsgNotification(enums::BadMsgNotification::Notification(n)) => {
                format!("{name} bad_msg_id={:#x} error_code={}", n.bad_msg_id, n.error_code)
            }
            Self::BadMsgNotification(enums::BadMsgNotification::BadServerSalt(s)) => {
                format!("{name} bad_msg_id={:#x} new_server_salt={:#x}", s.bad_msg_id, s.new_server_salt)
            }
            Self::Unknown { body, .. } => format!("{name} ({} bytes)", body.len()),
            other => format!("{name} {other:?}"),
        }
    }
}

/// Describe an encoded object, looking through `rpc_error` and `gzip_packed`.
fn describe_object(object: &[u8], registry: &Registry) -> String {
    match ServiceMessage::decode(object) {
        Ok((msg @ (ServiceMessage::RpcError(_) | ServiceMessage::GzipPacked(_)), _)) => {
            msg.describe(registry)
        }
        _ => registry.describe_payload(object),
    }
}
