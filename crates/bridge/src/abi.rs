//! C ABI shared with prediction-engine libraries.

use std::os::raw::c_char;

use crate::error::BridgeError;

/// ABI version this bridge speaks. Bump on any vtable or ownership change.
pub const ENGINE_ABI_VERSION: u32 = 1;

/// Exported symbol every engine library must provide.
pub const ENGINE_VTABLE_SYMBOL: &[u8] = b"standings_engine_vtable";

/// Result of one engine call.
///
/// `data` is a NUL-terminated UTF-8 buffer allocated by the engine, or null
/// when the engine produced nothing. Ownership transfers to the caller, who
/// must hand it back through [`EngineVTable::release`] exactly once.
#[repr(C)]
pub struct EngineReply {
    /// Encoded response text; null when absent.
    pub data: *mut c_char,
    /// Zero on success; any other value is an engine-reported failure.
    pub status: i32,
}

/// Function table exported by an engine library via
/// [`ENGINE_VTABLE_SYMBOL`].
#[repr(C)]
#[derive(Clone, Copy)]
pub struct EngineVTable {
    /// ABI version the engine was built against.
    pub abi_version: u32,

    /// Compute predicted standings.
    ///
    /// Takes two text buffers: a request-source identifier (a past-results
    /// filename on current engine builds) and the encoded snapshot. Neither
    /// is NUL-terminated; lengths are explicit.
    pub predict: extern "C" fn(
        source_ptr: *const u8,
        source_len: usize,
        request_ptr: *const u8,
        request_len: usize,
    ) -> EngineReply,

    /// Release a reply buffer previously returned by `predict`.
    ///
    /// Must be used instead of the host allocator's `free`; the engine and
    /// the host do not necessarily share a heap.
    pub release: extern "C" fn(data: *mut c_char),
}

/// Refuse vtables built against another ABI revision.
///
/// # Errors
///
/// [`BridgeError::EngineUnavailable`] naming both versions when they differ.
pub fn check_abi(actual: u32) -> Result<(), BridgeError> {
    if actual == ENGINE_ABI_VERSION {
        Ok(())
    } else {
        Err(BridgeError::unavailable(format!(
            "engine ABI version {actual} does not match expected {ENGINE_ABI_VERSION}"
        )))
    }
}
