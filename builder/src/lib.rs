//! Schema-typed Protocol Buffers encoding for pbemit.
//!
//! [`Builder`] exposes one method per `.proto` field type and maps each onto
//! the wire primitives from the `wire` crate. Element types for repeated and
//! packed fields are range-checked at compile time: an `int32` field accepts
//! `i8`, `i16`, `i32`, `u8` and `u16` elements, and nothing wider.
//!
//! # Design Principles
//!
//! - **Schema types, not wire types** - `sint32` means ZigZag, `sfixed64` means
//!   8 little-endian bytes; callers never pick a wire type.
//! - **Lossless widening only** - See [`FitsIn`].
//! - **Enums are 32-bit** - Values outside `i32` are rejected before anything
//!   is written; [`checked_enum_value`] validates untrusted input up front.
//!
//! # Example
//!
//! ```
//! use builder::Builder;
//!
//! let mut builder = Builder::new(Vec::new());
//! builder.emit_int32(1, 150);
//! builder.emit_string(2, "testing");
//! builder.emit_sint32_packed(4, &[3i32, 270, 86942]);
//!
//! let out = builder.into_inner();
//! assert_eq!(out[..3], [0x08, 0x96, 0x01]);
//! ```

#![warn(missing_docs)]

mod enum_value;
mod fits;
mod typed;

pub use enum_value::{checked_enum_value, EnumValue};
pub use fits::FitsIn;
pub use typed::Builder;

pub use wire::{ByteSink, FieldNumber, IntoFieldNumber, IoSink, LenCounter, WireError, WireResult};
