//! Outbound webcast notification: the ping client and the explicit
//! post-commit hook registry that defers it until the enclosing data
//! transaction has committed.

pub mod hooks;
pub mod ping;

pub use hooks::{BoxFuture, CommitHooks};
pub use ping::{PING_TIMEOUT, PingError, WebcastPinger};
