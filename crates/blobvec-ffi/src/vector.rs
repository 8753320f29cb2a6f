//! Vector lifecycle and element FFI: create, free, read, write, insert,
//! delete, swap.
//!
//! Live vectors sit in a process-global handle table behind a `Mutex`,
//! locked for the duration of a single call. The mutex guards the table;
//! a single vector is still meant to be used from one thread at a time.

use std::sync::Mutex;

use blobvec::{ByteVec, VecConfig};

use crate::handle::HandleTable;
use crate::status::{code, BlobvecStatus};

static VECTORS: Mutex<HandleTable<ByteVec>> = Mutex::new(HandleTable::new());

/// Lock the table and run `f` against the vector behind `handle`.
fn with_vec<R>(
    handle: u64,
    f: impl FnOnce(&mut ByteVec) -> Result<R, BlobvecStatus>,
) -> Result<R, BlobvecStatus> {
    let mut table = VECTORS.lock().map_err(|_| BlobvecStatus::InternalError)?;
    f(table.get_mut(handle)?)
}

/// Borrow `len` bytes at `item` as the element being written.
///
/// # Safety
///
/// If non-null, `item` must point to at least `len` readable bytes that
/// stay valid and unaliased by writers for the returned lifetime.
#[allow(unsafe_code)]
unsafe fn item_bytes<'a>(item: *const u8, len: usize) -> Result<&'a [u8], BlobvecStatus> {
    if item.is_null() {
        return Err(BlobvecStatus::InvalidArgument);
    }
    // SAFETY: non-null, and the caller vouches for `len` readable bytes.
    Ok(unsafe { std::slice::from_raw_parts(item, len) })
}

#[allow(unsafe_code)]
fn register(element_size: usize, config: VecConfig, out: *mut u64) -> Result<(), BlobvecStatus> {
    if out.is_null() {
        return Err(BlobvecStatus::InvalidArgument);
    }
    let vec = ByteVec::with_config(element_size, config).map_err(|e| BlobvecStatus::from(&e))?;
    let handle = VECTORS
        .lock()
        .map_err(|_| BlobvecStatus::InternalError)?
        .insert(vec);
    // SAFETY: `out` checked non-null above; C caller guarantees alignment.
    unsafe { write_out(out, handle) };
    Ok(())
}

/// Write a result through an out-pointer.
///
/// # Safety
///
/// `out` must be non-null, aligned and valid for a write of `T`.
#[allow(unsafe_code)]
unsafe fn write_out<T>(out: *mut T, value: T) {
    // SAFETY: upheld by the caller.
    unsafe { *out = value };
}

// ── FFI functions ───────────────────────────────────────────────

/// Create a vector for elements of `element_size` bytes with 256 initial
/// slots. Writes the handle to `out`.
///
/// Returns `BLOBVEC_STATUS_INVALID_ARGUMENT` for a zero element size or a
/// null `out`, `BLOBVEC_STATUS_OUT_OF_MEMORY` if the buffer cannot be
/// allocated.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn blobvec_new(element_size: usize, out: *mut u64) -> i32 {
    ffi_guard!({ code(register(element_size, VecConfig::default(), out)) })
}

/// Create a vector with an explicit initial capacity and byte ceiling.
///
/// `max_bytes == 0` means no ceiling.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn blobvec_new_with_config(
    element_size: usize,
    initial_capacity: usize,
    max_bytes: usize,
    out: *mut u64,
) -> i32 {
    ffi_guard!({
        let mut config = VecConfig::new().with_initial_capacity(initial_capacity);
        if max_bytes > 0 {
            config = config.with_max_bytes(max_bytes);
        }
        code(register(element_size, config, out))
    })
}

/// Free a vector and its buffer. The handle is stale afterwards; freeing it
/// again returns `BLOBVEC_STATUS_INVALID_HANDLE`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn blobvec_free(handle: u64) -> i32 {
    ffi_guard!({
        let removed = VECTORS
            .lock()
            .map_err(|_| BlobvecStatus::InternalError)
            .and_then(|mut table| table.remove(handle));
        code(removed.map(drop))
    })
}

/// Number of elements, or 0 if the handle is invalid (check
/// [`blobvec_last_status`](crate::blobvec_last_status) to tell the two
/// apart).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn blobvec_length(handle: u64) -> usize {
    ffi_guard_or!(0, {
        let result = with_vec(handle, |v| Ok(v.len()));
        crate::set_last_status(code(result.map(drop)));
        result.unwrap_or(0)
    })
}

/// Write the number of elements to `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn blobvec_length_get(handle: u64, out: *mut usize) -> i32 {
    ffi_guard!({ code(read_property(handle, out, ByteVec::len)) })
}

/// Write the number of allocated slots to `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn blobvec_capacity_get(handle: u64, out: *mut usize) -> i32 {
    ffi_guard!({ code(read_property(handle, out, ByteVec::capacity)) })
}

/// Write the element size in bytes to `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn blobvec_element_size_get(handle: u64, out: *mut usize) -> i32 {
    ffi_guard!({ code(read_property(handle, out, ByteVec::element_size)) })
}

#[allow(unsafe_code)]
fn read_property(
    handle: u64,
    out: *mut usize,
    property: fn(&ByteVec) -> usize,
) -> Result<(), BlobvecStatus> {
    if out.is_null() {
        return Err(BlobvecStatus::InvalidArgument);
    }
    let value = with_vec(handle, |v| Ok(property(v)))?;
    // SAFETY: `out` checked non-null above; C caller guarantees alignment.
    unsafe { write_out(out, value) };
    Ok(())
}

/// Write a pointer to the element at `index` to `out`.
///
/// The pointer addresses the vector's own buffer: it is valid for
/// `element_size` bytes until the next mutating call on this vector or
/// until it is freed. No copy is made.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn blobvec_get(handle: u64, index: usize, out: *mut *const u8) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return BlobvecStatus::InvalidArgument as i32;
        }
        let ptr = match with_vec(handle, |v| {
            v.get(index)
                .map(<[u8]>::as_ptr)
                .map_err(|e| BlobvecStatus::from(&e))
        }) {
            Ok(p) => p,
            Err(status) => return status as i32,
        };
        // SAFETY: `out` checked non-null above.
        unsafe { write_out(out, ptr) };
        BlobvecStatus::Ok as i32
    })
}

/// Copy the element at `index` into a new heap buffer of `element_size`
/// bytes and write its address to `out`.
///
/// The caller owns the copy and must release it with [`blobvec_copy_free`].
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn blobvec_get_copy(handle: u64, index: usize, out: *mut *mut u8) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return BlobvecStatus::InvalidArgument as i32;
        }
        let copy = match with_vec(handle, |v| {
            v.get_copy(index).map_err(|e| BlobvecStatus::from(&e))
        }) {
            Ok(c) => c,
            Err(status) => return status as i32,
        };
        // SAFETY: `out` checked non-null above.
        unsafe { write_out(out, Box::into_raw(copy) as *mut u8) };
        BlobvecStatus::Ok as i32
    })
}

/// Release a buffer returned by [`blobvec_get_copy`]. `len` must be the
/// vector's element size. A null `ptr` is a no-op.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn blobvec_copy_free(ptr: *mut u8, len: usize) {
    if ptr.is_null() {
        return;
    }
    // SAFETY: `ptr` came from `Box::<[u8]>::into_raw` in `blobvec_get_copy`
    // with length `len`, and ownership is handed back exactly once.
    drop(unsafe { Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, len)) });
}

/// Overwrite the element at `index` with `element_size` bytes from `item`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn blobvec_set(handle: u64, index: usize, item: *const u8) -> i32 {
    ffi_guard!({
        code(with_vec(handle, |v| {
            // SAFETY: caller guarantees `item` addresses `element_size` bytes.
            let bytes = unsafe { item_bytes(item, v.element_size()) }?;
            v.set(index, bytes).map_err(|e| BlobvecStatus::from(&e))
        }))
    })
}

/// Insert a copy of `element_size` bytes from `item` at `index`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn blobvec_insert(handle: u64, index: usize, item: *const u8) -> i32 {
    ffi_guard!({
        code(with_vec(handle, |v| {
            // SAFETY: caller guarantees `item` addresses `element_size` bytes.
            let bytes = unsafe { item_bytes(item, v.element_size()) }?;
            v.insert(index, bytes).map_err(|e| BlobvecStatus::from(&e))
        }))
    })
}

/// Remove the element at `index`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn blobvec_delete(handle: u64, index: usize) -> i32 {
    ffi_guard!({
        code(with_vec(handle, |v| {
            v.delete(index).map_err(|e| BlobvecStatus::from(&e))
        }))
    })
}

/// Append a copy of `element_size` bytes from `item`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn blobvec_push_back(handle: u64, item: *const u8) -> i32 {
    ffi_guard!({
        code(with_vec(handle, |v| {
            // SAFETY: caller guarantees `item` addresses `element_size` bytes.
            let bytes = unsafe { item_bytes(item, v.element_size()) }?;
            v.push_back(bytes).map_err(|e| BlobvecStatus::from(&e))
        }))
    })
}

/// Remove the last element. `BLOBVEC_STATUS_OUT_OF_RANGE` when empty.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn blobvec_pop_back(handle: u64) -> i32 {
    ffi_guard!({
        code(with_vec(handle, |v| {
            v.pop_back().map_err(|e| BlobvecStatus::from(&e))
        }))
    })
}

/// Exchange the elements at `index1` and `index2`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn blobvec_swap(handle: u64, index1: usize, index2: usize) -> i32 {
    ffi_guard!({
        code(with_vec(handle, |v| {
            v.swap(index1, index2).map_err(|e| BlobvecStatus::from(&e))
        }))
    })
}
