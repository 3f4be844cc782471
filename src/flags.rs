//! Bitmask newtypes for per-draw configuration.

/// Declares a `Copy` newtype over `u32` with named bit constants, `|`, `|=`
/// and `contains` queries.
macro_rules! bit_flags {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$flag_meta:meta])*
                const $flag:ident = $value:expr;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        $vis struct $name(u32);

        impl $name {
            $(
                $(#[$flag_meta])*
                pub const $flag: Self = Self($value);
            )*

            pub const fn empty() -> Self {
                Self(0)
            }

            pub const fn from_bits(bits: u32) -> Self {
                Self(bits)
            }

            pub const fn bits(self) -> u32 {
                self.0
            }

            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            /// True when every bit of `other` is set in `self`.
            #[inline]
            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            /// True when `self` and `other` share at least one bit.
            #[inline]
            pub const fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }
    };
}

pub(crate) use bit_flags;

#[cfg(test)]
mod tests {
    bit_flags! {
        struct Sample {
            const A = 1 << 1;
            const B = 1 << 2;
        }
    }

    #[test]
    fn combine_and_query() {
        let mut flags = Sample::A;
        assert!(flags.contains(Sample::A));
        assert!(!flags.contains(Sample::B));
        flags |= Sample::B;
        assert!(flags.contains(Sample::A | Sample::B));
        assert_eq!(flags.bits(), 0b110);
        assert!(Sample::empty().is_empty());
        assert!(!Sample::empty().intersects(Sample::A));
        assert_eq!(Sample::from_bits(2), Sample::A);
    }
}
