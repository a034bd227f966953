//! Static range checks between native integer types and protobuf widths.

mod sealed {
    pub trait Sealed {}
}

/// `Self`'s whole value range is contained in `Target`'s.
///
/// Implemented only for lossless pairs, so a repeated or packed call with an
/// element type that doesn't fit the schema type fails to compile:
///
/// ```compile_fail
/// let mut builder = builder::Builder::new(Vec::new());
/// builder.emit_int32_packed(1, &[1i64, 2]);
/// ```
///
/// ```compile_fail
/// let mut builder = builder::Builder::new(Vec::new());
/// builder.emit_fixed32_packed(1, &[1u64]);
/// ```
///
/// ```compile_fail
/// let mut builder = builder::Builder::new(Vec::new());
/// builder.emit_uint32_repeated(1, [-1i32]);
/// ```
pub trait FitsIn<Target>: Copy + sealed::Sealed {
    /// Converts without loss.
    fn widen(self) -> Target;
}

macro_rules! impl_sealed {
    ($($ty:ty),*) => {
        $(impl sealed::Sealed for $ty {})*
    };
}

impl_sealed!(u8, u16, u32, u64, i8, i16, i32, i64);

impl<T: sealed::Sealed> sealed::Sealed for &T {}

macro_rules! impl_fits_in {
    ($target:ty: $($source:ty),*) => {
        $(
            impl FitsIn<$target> for $source {
                fn widen(self) -> $target {
                    <$target>::from(self)
                }
            }
        )*
    };
}

impl_fits_in!(i32: i8, i16, i32, u8, u16);
impl_fits_in!(i64: i8, i16, i32, i64, u8, u16, u32);
impl_fits_in!(u32: u8, u16, u32);
impl_fits_in!(u64: u8, u16, u32, u64);

impl<Target, T: FitsIn<Target>> FitsIn<Target> for &T {
    fn widen(self) -> Target {
        (*self).widen()
    }
}
