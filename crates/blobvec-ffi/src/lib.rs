//! C FFI bindings for blobvec.
//!
//! Exposes [`ByteVec`](blobvec::ByteVec) to C behind opaque `u64` handles.
//! Every entry point returns (or records) a [`BlobvecStatus`] code, and the
//! calling thread's most recent code stays readable through
//! [`blobvec_last_status`] so a caller can tell "index out of range" from
//! "allocation failed" after the fact, the way `errno` is used in C.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::os::raw::c_char;

/// Run an FFI body returning an `i32` status, converting panics into
/// [`BlobvecStatus::Panicked`] and recording the outcome as the thread's
/// last status.
macro_rules! ffi_guard {
    ($body:block) => {{
        let outcome =
            ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| -> i32 { $body }));
        let status = match outcome {
            Ok(code) => code,
            Err(payload) => {
                $crate::record_panic(payload.as_ref());
                $crate::status::BlobvecStatus::Panicked as i32
            }
        };
        $crate::set_last_status(status);
        status
    }};
}

/// Like `ffi_guard!` for entry points that return a value instead of a
/// status. The body records its own status; a panic records `Panicked` and
/// yields `$default`.
macro_rules! ffi_guard_or {
    ($default:expr, $body:block) => {{
        let outcome = ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| $body));
        match outcome {
            Ok(value) => value,
            Err(payload) => {
                $crate::record_panic(payload.as_ref());
                $crate::set_last_status($crate::status::BlobvecStatus::Panicked as i32);
                $default
            }
        }
    }};
}

pub(crate) mod handle;
pub mod status;
pub mod vector;

pub use status::BlobvecStatus;

thread_local! {
    pub(crate) static LAST_PANIC: RefCell<String> = const { RefCell::new(String::new()) };
    static LAST_STATUS: Cell<i32> = const { Cell::new(0) };
}

pub(crate) fn set_last_status(status: i32) {
    LAST_STATUS.with(|cell| cell.set(status));
}

pub(crate) fn record_panic(payload: &(dyn Any + Send)) {
    let msg = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };
    LAST_PANIC.with(|cell| *cell.borrow_mut() = msg);
}

/// Status code of the calling thread's most recent blobvec call.
///
/// `0` (`BLOBVEC_STATUS_OK`) before any call has been made.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn blobvec_last_status() -> i32 {
    LAST_STATUS.with(|cell| cell.get())
}

/// Copy the calling thread's last panic message into `buf`.
///
/// Returns the full message length in bytes (excluding the terminator),
/// which may exceed `cap`; call with a null `buf` to size a buffer. When
/// `buf` is non-null and `cap > 0`, at most `cap - 1` bytes are written
/// followed by a NUL terminator.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn blobvec_last_panic_message(buf: *mut c_char, cap: usize) -> i32 {
    LAST_PANIC.with(|cell| {
        let msg = cell.borrow();
        let bytes = msg.as_bytes();
        if !buf.is_null() && cap > 0 {
            let n = bytes.len().min(cap - 1);
            // SAFETY: caller guarantees `buf` points to `cap` writable bytes;
            // `n + 1 <= cap`.
            unsafe {
                std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf as *mut u8, n);
                *buf.add(n) = 0;
            }
        }
        i32::try_from(bytes.len()).unwrap_or(i32::MAX)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::BlobvecStatus;

    #[test]
    fn guard_records_status() {
        let status = ffi_guard!({ BlobvecStatus::OutOfRange as i32 });
        assert_eq!(status, BlobvecStatus::OutOfRange as i32);
        assert_eq!(blobvec_last_status(), BlobvecStatus::OutOfRange as i32);

        ffi_guard!({ BlobvecStatus::Ok as i32 });
        assert_eq!(blobvec_last_status(), 0);
    }

    #[test]
    fn guard_catches_panic_and_stores_message() {
        LAST_PANIC.with(|cell| cell.borrow_mut().clear());

        let status = ffi_guard!({
            panic!("deliberate test panic");
        });
        assert_eq!(status, BlobvecStatus::Panicked as i32);
        assert_eq!(blobvec_last_status(), -128);

        let len = blobvec_last_panic_message(std::ptr::null_mut(), 0);
        assert!(len > 0);
        let mut buf = vec![0u8; len as usize + 1];
        let len2 = blobvec_last_panic_message(buf.as_mut_ptr() as *mut c_char, buf.len());
        assert_eq!(len, len2);
        let msg = std::str::from_utf8(&buf[..len as usize]).unwrap();
        assert!(msg.contains("deliberate test panic"), "got: {msg:?}");
    }

    #[test]
    fn panic_message_truncates_to_buffer() {
        let _ = ffi_guard!({
            panic!("{}", "x".repeat(64));
        });
        let mut buf = [0xffu8; 8];
        let len = blobvec_last_panic_message(buf.as_mut_ptr() as *mut c_char, buf.len());
        assert_eq!(len, 64);
        assert_eq!(&buf[..7], b"xxxxxxx");
        assert_eq!(buf[7], 0);
    }

    #[test]
    fn guard_or_returns_default_on_panic() {
        let trigger = true;
        let value: usize = ffi_guard_or!(7, {
            if trigger {
                panic!("boom");
            }
            0
        });
        assert_eq!(value, 7);
        assert_eq!(blobvec_last_status(), BlobvecStatus::Panicked as i32);
    }
}
