//! Bridge to the external standings prediction engine.
//!
//! The engine is an opaque component shipped as a shared library. This crate
//! owns the call discipline around it, never the prediction algorithm:
//!
//! - [`StandingsEngine`]: the request → response contract the rest of the
//!   suite programs against,
//! - [`LibraryEngine`]: the production implementation that loads the engine
//!   library once, caches the handle, and retries resolution on the next
//!   invocation after a failure,
//! - [`EngineVTable`] / [`EngineReply`]: the C ABI shared with engine
//!   builds,
//! - [`ReplyBuffer`]: scoped ownership of the text buffer the engine hands
//!   back, released through the engine's own allocator exactly once on every
//!   exit path.
//!
//! Invocation is synchronous and performs no internal retries or timeouts;
//! a slow engine stalls the calling tick, and retry policy belongs to the
//! caller. Every [`BridgeError`] is recoverable: a failed call means "no new
//! standings this tick", never a crash.

mod abi;
mod engine;
mod error;
mod reply;

pub use abi::{ENGINE_ABI_VERSION, ENGINE_VTABLE_SYMBOL, EngineReply, EngineVTable, check_abi};
pub use engine::{LibraryEngine, StandingsEngine};
pub use error::BridgeError;
pub use reply::ReplyBuffer;
