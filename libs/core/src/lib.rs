//! Core of the LINE webhook relay.
//!
//! Decodes webhook envelopes, narrows each event's message into a typed
//! variant, applies the per-kind reply rules and hands the resulting replies to
//! a [`MessagingApi`] implementation. Transport concerns live in the
//! application crate.
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod kind;
pub mod message;
pub mod outbound;
pub mod pipeline;
pub mod push;
pub mod reply;

pub use dispatch::*;
pub use envelope::*;
pub use error::*;
pub use kind::*;
pub use message::*;
pub use outbound::*;
pub use pipeline::*;
pub use push::*;
pub use reply::{build_reply, reply_message, truncate_chars};
