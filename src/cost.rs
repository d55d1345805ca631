use std::fmt::Debug;

use num_traits::{PrimInt, Unsigned};

/// A primitive integer that can be used as an assignment cost.
///
/// The solver only ever works on unsigned values. Every cost type names the
/// unsigned type of the same width it is mapped onto, and [`Cost::to_unsigned`]
/// performs that mapping once, when the working matrix is loaded. The mapping
/// must be strictly order-preserving: the optimal assignment only depends on
/// how costs compare, so it is unaffected by the shift.
pub trait Cost: Copy {
    type Unsigned: PrimInt + Unsigned + Debug;

    fn to_unsigned(self) -> Self::Unsigned;
}

macro_rules! impl_unsigned_cost {
    ($($t:ty),*) => {
        $(
            impl Cost for $t {
                type Unsigned = $t;

                #[inline]
                fn to_unsigned(self) -> $t {
                    self
                }
            }
        )*
    };
}

// shifts by |MIN|, so MIN lands on zero and MAX on the unsigned maximum
macro_rules! impl_signed_cost {
    ($($t:ty => $u:ty),*) => {
        $(
            impl Cost for $t {
                type Unsigned = $u;

                #[inline]
                fn to_unsigned(self) -> $u {
                    (self as $u).wrapping_sub(<$t>::MIN as $u)
                }
            }
        )*
    };
}

impl_unsigned_cost!(u8, u16, u32, u64, u128, usize);
impl_signed_cost!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128, isize => usize);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unsigned_is_identity() {
        assert_eq!(0u8.to_unsigned(), 0);
        assert_eq!(u32::MAX.to_unsigned(), u32::MAX);
        assert_eq!(17usize.to_unsigned(), 17);
    }

    #[test]
    fn signed_extremes() {
        assert_eq!(i8::MIN.to_unsigned(), 0u8);
        assert_eq!((-1i8).to_unsigned(), 127u8);
        assert_eq!(0i8.to_unsigned(), 128u8);
        assert_eq!(i8::MAX.to_unsigned(), u8::MAX);
        assert_eq!(i64::MIN.to_unsigned(), 0u64);
        assert_eq!(i64::MAX.to_unsigned(), u64::MAX);
    }

    #[test]
    fn signed_preserves_order() {
        let values: Vec<i16> = (-300..300).step_by(7).collect();
        for pair in values.windows(2) {
            assert!(pair[0].to_unsigned() < pair[1].to_unsigned());
        }
    }

    #[test]
    fn signed_preserves_differences() {
        assert_eq!(
            5i32.to_unsigned() - (-5i32).to_unsigned(),
            10u32,
        );
    }
}
