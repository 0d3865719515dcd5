//! Engine handle resolution and the invocation contract.

use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use parking_lot::Mutex;

use crate::abi::{ENGINE_VTABLE_SYMBOL, EngineVTable, check_abi};
use crate::error::BridgeError;
use crate::reply::ReplyBuffer;

/// Request → response contract for the prediction engine.
///
/// One implementation per engine transport; callers (the tick pipeline, the
/// CLI) program against this trait so a stub engine can stand in for tests.
pub trait StandingsEngine {
    /// Send an encoded snapshot, receive the encoded response.
    ///
    /// Blocking and synchronous; expected to complete within one update
    /// tick. No internal retries — the next tick retries naturally.
    ///
    /// # Errors
    ///
    /// Any [`BridgeError`]; all are recoverable as "no new standings".
    fn invoke(&self, request: &str) -> Result<String, BridgeError>;
}

impl<T: StandingsEngine + ?Sized> StandingsEngine for &T {
    fn invoke(&self, request: &str) -> Result<String, BridgeError> {
        (**self).invoke(request)
    }
}

/// Loaded engine library plus its resolved vtable.
struct LoadedEngine {
    /// Keeps the library mapped for as long as the vtable is callable.
    _library: Library,
    vtable: EngineVTable,
}

/// Production engine implementation backed by a dynamically loaded shared
/// library.
///
/// The handle is resolved lazily on first invocation and reused afterwards;
/// a resolution failure leaves the slot empty so the next invocation retries
/// instead of caching the failure as permanent. The slot is mutex-guarded:
/// ticking is single-threaded today, but the cache must not become unsound
/// if that ever changes.
pub struct LibraryEngine {
    library_path: PathBuf,
    source_name: String,
    handle: Mutex<Option<LoadedEngine>>,
}

impl LibraryEngine {
    /// Create a bridge to the engine library at `library_path`.
    ///
    /// `source_name` is the request-source identifier passed to every
    /// `predict` call (a past-results filename on current engine builds).
    /// Nothing is loaded until the first [`StandingsEngine::invoke`].
    pub fn new(library_path: impl Into<PathBuf>, source_name: impl Into<String>) -> Self {
        Self {
            library_path: library_path.into(),
            source_name: source_name.into(),
            handle: Mutex::new(None),
        }
    }

    /// Path of the engine library this bridge resolves.
    pub fn library_path(&self) -> &Path {
        &self.library_path
    }

    fn load(&self) -> Result<LoadedEngine, BridgeError> {
        let library = unsafe { Library::new(&self.library_path) }.map_err(|e| {
            BridgeError::unavailable(format!(
                "failed to load {}: {e}",
                self.library_path.display()
            ))
        })?;

        let vtable = unsafe {
            let entry: Symbol<'_, extern "C" fn() -> EngineVTable> =
                library.get(ENGINE_VTABLE_SYMBOL).map_err(|e| {
                    BridgeError::unavailable(format!("missing vtable entry point: {e}"))
                })?;
            entry()
        };

        check_abi(vtable.abi_version)?;

        tracing::info!(
            path = %self.library_path.display(),
            abi_version = vtable.abi_version,
            "prediction engine loaded"
        );

        Ok(LoadedEngine {
            _library: library,
            vtable,
        })
    }
}

impl StandingsEngine for LibraryEngine {
    fn invoke(&self, request: &str) -> Result<String, BridgeError> {
        let mut slot = self.handle.lock();

        let engine = match slot.take() {
            Some(engine) => engine,
            None => self.load()?,
        };

        let result = invoke_vtable(&engine.vtable, &self.source_name, request);

        // The handle stays cached across call failures; only resolution
        // failures leave the slot empty.
        *slot = Some(engine);
        result
    }
}

/// Run one call through a resolved vtable.
///
/// The reply buffer is acquired before the status check so that every exit
/// path below releases it exactly once.
fn invoke_vtable(
    vtable: &EngineVTable,
    source: &str,
    request: &str,
) -> Result<String, BridgeError> {
    let reply = (vtable.predict)(
        source.as_ptr(),
        source.len(),
        request.as_ptr(),
        request.len(),
    );

    let status = reply.status;
    let buffer = ReplyBuffer::acquire(reply.data, vtable.release);

    if status != 0 {
        return Err(BridgeError::CallFailed { status });
    }

    let Some(buffer) = buffer else {
        return Err(BridgeError::EmptyResponse);
    };

    let text = buffer.to_text();
    if text.is_empty() {
        return Err(BridgeError::EmptyResponse);
    }

    Ok(text)
}
