//! Boxed types of the MTProto service schema.
//!
//! Each enum writes the command id of its variant before the fields and
//! dispatches on it when decoding.

use crate::types;

tl_enum! { ResPq { ResPq(types::ResPq) } }

tl_enum! { PQInnerData { PQInnerData(types::PQInnerData) } }

tl_enum! {
    ServerDhParams {
        Fail(types::ServerDhParamsFail),
        Ok(types::ServerDhParamsOk),
    }
}

tl_enum! { ServerDhInnerData { ServerDhInnerData(types::ServerDhInnerData) } }

tl_enum! { ClientDhInnerData { ClientDhInnerData(types::ClientDhInnerData) } }

tl_enum! {
    SetClientDhParamsAnswer {
        DhGenOk(types::DhGenOk),
        DhGenRetry(types::DhGenRetry),
        DhGenFail(types::DhGenFail),
    }
}

tl_enum! { RpcResult { RpcResult(types::RpcResult) } }

tl_enum! { RpcError { RpcError(types::RpcError) } }

tl_enum! {
    RpcDropAnswer {
        Unknown(types::RpcAnswerUnknown),
        DroppedRunning(types::RpcAnswerDroppedRunning),
        Dropped(types::RpcAnswerDropped),
    }
}

tl_enum! { FutureSalt { FutureSalt(types::FutureSalt) } }

tl_enum! { FutureSalts { FutureSalts(types::FutureSalts) } }

tl_enum! { Pong { Pong(types::Pong) } }

tl_enum! {
    DestroySessionRes {
        DestroySessionOk(types::DestroySessionOk),
        DestroySessionNone(types::DestroySessionNone),
    }
}

tl_enum! { NewSession { Created(types::NewSessionCreated) } }

tl_enum! { MessageContainer { Container(types::MsgContainer) } }

tl_enum! { MessageCopy { Copy(types::MsgCopy) } }

tl_enum! {
    /// `gzip_packed#3072cfa1 packed_data:bytes = Object;`
    Object { GzipPacked(types::GzipPacked) }
}

tl_enum! { MsgsAck { MsgsAck(types::MsgsAck) } }

tl_enum! {
    BadMsgNotification {
        Notification(types::BadMsgNotification),
        BadServerSalt(types::BadServerSalt),
    }
}

tl_enum! { MsgResendReq { MsgResendReq(types::MsgResendReq) } }

tl_enum! { MsgsStateReq { MsgsStateReq(types::MsgsStateReq) } }

tl_enum! { MsgsStateInfo { MsgsStateInfo(types::MsgsStateInfo) } }

tl_enum! { MsgsAllInfo { MsgsAllInfo(types::MsgsAllInfo) } }

tl_enum! {
    MsgDetailedInfo {
        Info(types::MsgDetailedInfo),
        NewInfo(types::MsgNewDetailedInfo),
    }
}
