use std::fmt::{Debug, Display};
use std::hash::Hash;

/// An unsigned integer type that can serve as a search index.
///
/// Implemented for all primitive unsigned integers. The search only needs
/// a handful of operations, all of which must be free of silent overflow.
pub trait Index: Copy + Ord + Hash + Debug + Display + Send + Sync + 'static {
    /// The bit width `W` of the type.
    const BITS: u32;
    /// The index zero.
    const ZERO: Self;
    /// The index one.
    const ONE: Self;
    /// The largest representable index, `2^W - 1`.
    const MAX: Self;

    /// Doubles the index, returning `None` on overflow.
    fn checked_double(self) -> Option<Self>;

    /// The midpoint `lo + (hi - lo) / 2`, rounded down. Requires `lo <= hi`.
    fn midpoint_to(self, hi: Self) -> Self;
}

macro_rules! impl_index {
    ($($ty:ty),* $(,)?) => {$(
        impl Index for $ty {
            const BITS: u32 = <$ty>::BITS;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            // Spelled as `(2^(W-1) - 1) * 2 + 1` so that `2^W` never appears.
            const MAX: Self = (((1 as $ty) << (<$ty>::BITS - 1)) - 1) * 2 + 1;

            #[inline]
            fn checked_double(self) -> Option<Self> {
                self.checked_mul(2)
            }

            #[inline]
            fn midpoint_to(self, hi: Self) -> Self {
                self + (hi - self) / 2
            }
        }
    )*};
}

impl_index!(u8, u16, u32, u64, u128, usize);

/// `ceil(log2(n))` for `n >= 1`.
pub(crate) fn ceil_log2(n: u32) -> u32 {
    debug_assert!(n >= 1);
    u32::BITS - (n - 1).leading_zeros()
}
