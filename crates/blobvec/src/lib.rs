//! Type-erased growable contiguous vector.
//!
//! Stores fixed-size elements as opaque byte blocks in one exclusively owned
//! buffer. Elements are inserted, read, overwritten, removed and swapped by
//! bitwise copy; the vector never constructs or drops them.
//!
//! # Architecture
//!
//! ```text
//! ByteVec (runtime element size, byte-slice API)
//! ├── RawBuffer (Vec<u8> of capacity × element_size, fallible realloc)
//! └── VecConfig (initial capacity, optional byte ceiling)
//!
//! TypedVec<T: Copy> (element-typed API, same growth schedule)
//!
//! policy: growth decision + index checks shared by both
//! ```
//!
//! # Growth
//!
//! Capacity starts at 256 slots ([`VecConfig::DEFAULT_INITIAL_CAPACITY`])
//! and doubles as soon as an insertion would make the buffer full. A failed
//! growth step reports [`VecError::OutOfMemory`] and leaves the vector
//! exactly as it was.
//!
//! # Bounds
//!
//! Reads and writes are checked against the logical length. Slots between
//! length and capacity are allocated but never addressable.
//!
//! ```rust
//! use blobvec::ByteVec;
//!
//! let mut v = ByteVec::new(4).unwrap();
//! for x in [1i32, 2, 3] {
//!     v.push_back(&x.to_ne_bytes()).unwrap();
//! }
//! v.delete(1).unwrap();
//! v.insert(1, &9i32.to_ne_bytes()).unwrap();
//! v.swap(0, 2).unwrap();
//! assert_eq!(v.get(0).unwrap(), &3i32.to_ne_bytes());
//! assert_eq!(v.len(), 3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod byte_vec;
pub mod config;
pub mod error;
mod policy;
mod raw;
pub mod typed;

// Public re-exports for the primary API surface.
pub use byte_vec::ByteVec;
pub use config::VecConfig;
pub use error::VecError;
pub use typed::TypedVec;
