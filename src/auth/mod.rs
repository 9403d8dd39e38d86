//! Request authentication for the seller platform.
//!
//! Every request carries an `Anti-Content` header, an anti-bot token computed
//! per attempt. The algorithm behind it is supplied by the caller through
//! [`AntiContentProvider`].

mod anti_content;

pub use anti_content::{
    ANTI_CONTENT_HEADER, AntiContentProvider, EnvAntiContent, SignatureError, StaticAntiContent,
};
