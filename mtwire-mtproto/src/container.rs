//! `msg_container#73f1f8dc messages:vector<%Message> = MessageContainer;`

use mtwire_tl_types::types::{self, Message};
use mtwire_tl_types::{Deserializable, Identifiable, RawVec, enums};

use crate::errors::Result;
use crate::gzip;

/// Containers nested deeper than this are returned as plain messages.
const MAX_DEPTH: usize = 4;

/// Wrap `messages` into a boxed container.
pub fn pack(messages: Vec<Message>) -> enums::MessageContainer {
    types::MsgContainer { messages: RawVec(messages) }.into()
}

/// The messages held by `container`, in order.
pub fn unpack(container: enums::MessageContainer) -> Vec<Message> {
    let enums::MessageContainer::Container(c) = container;
    c.messages.0
}

/// Expand `message` into the leaf messages it carries.
///
/// Containers and `msg_copy` are opened recursively, and gzip bodies are
/// inflated along the way. Any other body is a leaf and is returned as is.
pub fn flatten(message: Message) -> Result<Vec<Message>> {
    let mut out = Vec::new();
    flatten_into(message, 0, &mut out)?;
    Ok(out)
}

fn flatten_into(message: Message, depth: usize, out: &mut Vec<Message>) -> Result<()> {
    let body = gzip::inflate_body(&message.body)?.into_owned();
    let message = Message { body, ..message };

    if depth >= MAX_DEPTH {
        log::warn!("[mtwire] container nesting too deep in {:#x}", message.msg_id);
        out.push(message);
        return Ok(());
    }

    match message.body_id() {
        types::MsgContainer::CONSTRUCTOR_ID => {
            let inner = unpack(enums::MessageContainer::from_bytes(&message.body)?);
            log::trace!("[mtwire] container {:#x} holds {} messages", message.msg_id, inner.len());
            for m in inner {
                flatten_into(m, depth + 1, out)?;
            }
        }
        types::MsgCopy::CONSTRUCTOR_ID => {
            let enums::MessageCopy::Copy(copy) = enums::MessageCopy::from_bytes(&message.body)?;
            flatten_into(copy.orig_message, depth + 1, out)?;
        }
        _ => out.push(message),
    }
    Ok(())
}
