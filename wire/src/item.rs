//! Element types accepted by packed fields.
//!
//! Each trait is implemented only for native types whose range fits the
//! target wire width, so passing an incompatible collection fails to compile
//! instead of failing mid-stream. The traits are sealed: the set of accepted
//! types is closed.

mod sealed {
    pub trait Sealed {}
}

use sealed::Sealed;

/// Element of a packed `VARINT` field (`int32`, `int64`, `uint32`, `uint64`,
/// `bool`, enums).
///
/// Integers up to 64 bits are accepted; wider types are not:
///
/// ```compile_fail
/// let mut emitter = wire::Emitter::new(Vec::new());
/// emitter.emit_varint_packed(1, &[1u128]);
/// ```
pub trait VarIntItem: Copy + Sealed {
    /// Value carried on the wire; signed values are sign-extended.
    fn to_varint(self) -> u64;
}

/// Element of a packed ZigZag field (`sint32`, `sint64`).
pub trait SignedVarIntItem: Copy + Sealed {
    /// Widens to 64 bits before ZigZag mapping.
    fn to_signed(self) -> i64;
}

/// Element of a packed `I32` field (`fixed32`, `sfixed32`, `float`).
///
/// 64-bit types are rejected:
///
/// ```compile_fail
/// let mut emitter = wire::Emitter::new(Vec::new());
/// emitter.emit_i32_packed(1, &[1u64, 2]);
/// ```
///
/// ```compile_fail
/// let mut emitter = wire::Emitter::new(Vec::new());
/// emitter.emit_i32_packed(1, &[1.0f64]);
/// ```
pub trait Fixed32Item: Copy + Sealed {
    /// The 32-bit pattern written little-endian.
    fn to_fixed32(self) -> u32;
}

/// Element of a packed `I64` field (`fixed64`, `sfixed64`, `double`).
///
/// Only `f64` is accepted among floating-point types:
///
/// ```compile_fail
/// let mut emitter = wire::Emitter::new(Vec::new());
/// emitter.emit_i64_packed(1, &[1.0f32]);
/// ```
pub trait Fixed64Item: Copy + Sealed {
    /// The 64-bit pattern written little-endian.
    fn to_fixed64(self) -> u64;
}

macro_rules! impl_sealed {
    ($($ty:ty),*) => {
        $(impl Sealed for $ty {})*
    };
}

impl_sealed!(bool, u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

macro_rules! impl_unsigned_items {
    ($($ty:ty),*) => {
        $(
            impl VarIntItem for $ty {
                fn to_varint(self) -> u64 {
                    u64::from(self)
                }
            }

            impl Fixed64Item for $ty {
                fn to_fixed64(self) -> u64 {
                    u64::from(self)
                }
            }
        )*
    };
}

macro_rules! impl_signed_items {
    ($($ty:ty),*) => {
        $(
            impl VarIntItem for $ty {
                #[allow(clippy::cast_sign_loss)]
                fn to_varint(self) -> u64 {
                    i64::from(self) as u64
                }
            }

            impl SignedVarIntItem for $ty {
                fn to_signed(self) -> i64 {
                    i64::from(self)
                }
            }

            impl Fixed64Item for $ty {
                #[allow(clippy::cast_sign_loss)]
                fn to_fixed64(self) -> u64 {
                    i64::from(self) as u64
                }
            }
        )*
    };
}

impl_unsigned_items!(u8, u16, u32, u64);
impl_signed_items!(i8, i16, i32, i64);

impl VarIntItem for bool {
    fn to_varint(self) -> u64 {
        u64::from(self)
    }
}

macro_rules! impl_fixed32_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Fixed32Item for $ty {
                fn to_fixed32(self) -> u32 {
                    u32::from(self)
                }
            }
        )*
    };
}

macro_rules! impl_fixed32_signed {
    ($($ty:ty),*) => {
        $(
            impl Fixed32Item for $ty {
                #[allow(clippy::cast_sign_loss)]
                fn to_fixed32(self) -> u32 {
                    i32::from(self) as u32
                }
            }
        )*
    };
}

impl_fixed32_unsigned!(u8, u16, u32);
impl_fixed32_signed!(i8, i16, i32);

impl Fixed32Item for f32 {
    fn to_fixed32(self) -> u32 {
        self.to_bits()
    }
}

impl Fixed64Item for f64 {
    fn to_fixed64(self) -> u64 {
        self.to_bits()
    }
}
