//! Scoped ownership of the engine's reply buffer.

use std::ffi::CStr;
use std::os::raw::c_char;

/// Owns a reply buffer until dropped, then hands it back to the engine.
///
/// The contract across the library boundary is "caller releases exactly
/// once": releasing twice corrupts the engine's allocator, never releasing
/// leaks once per tick. Routing the release through `Drop` makes every exit
/// path — success, decode failure, early return — release exactly once.
///
/// A buffer must not outlive the library that allocated it; the bridge keeps
/// its buffers inside the span of one invocation while the engine handle is
/// held.
pub struct ReplyBuffer {
    data: *mut c_char,
    release: extern "C" fn(*mut c_char),
}

impl ReplyBuffer {
    /// Take ownership of a reply buffer; `None` when the engine returned
    /// null (nothing to release).
    pub(crate) fn acquire(
        data: *mut c_char,
        release: extern "C" fn(*mut c_char),
    ) -> Option<Self> {
        if data.is_null() {
            None
        } else {
            Some(Self { data, release })
        }
    }

    /// Copy the buffer out as owned text.
    ///
    /// The engine emits UTF-8; anything else is replaced rather than
    /// rejected so a misbehaving engine degrades to a decode error upstream
    /// instead of a crash here.
    pub fn to_text(&self) -> String {
        // SAFETY: `data` is non-null (checked in `acquire`) and points at a
        // NUL-terminated buffer owned by this wrapper until drop.
        let raw = unsafe { CStr::from_ptr(self.data) };
        raw.to_string_lossy().into_owned()
    }
}

impl Drop for ReplyBuffer {
    fn drop(&mut self) {
        (self.release)(self.data);
    }
}
