/// Newtype over `f64` with a unit suffix and a fixed display precision.
macro_rules! quantity {
    ($name:ident, via: f64, suffix: $suffix:literal, precision: $precision:literal) => {
        #[repr(transparent)]
        #[must_use]
        #[derive(
            Clone,
            Copy,
            Default,
            ::derive_more::Add,
            ::derive_more::AddAssign,
            ::derive_more::Sub,
            ::derive_more::SubAssign,
            ::derive_more::Neg,
            ::derive_more::Sum,
            ::derive_more::FromStr,
            ::derive_more::From,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        pub struct $name(pub f64);

        impl $name {
            pub const ZERO: Self = Self(0.0);

            pub const fn abs(self) -> Self {
                Self(self.0.abs())
            }

            #[must_use]
            pub const fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            /// Replace `NaN` and infinities with zero.
            pub const fn finite_or_zero(self) -> Self {
                if self.0.is_finite() { self } else { Self::ZERO }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{:.*} {}", $precision, self.0, $suffix)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{:.*}{}", $precision, self.0, $suffix)
            }
        }

        scalar_ops!($name);
        total_order!($name);
    };
}

/// Scaling by a plain factor, and the ratio of two values of the same unit.
macro_rules! scalar_ops {
    ($name:ty) => {
        impl ::std::ops::Mul<f64> for $name {
            type Output = Self;

            fn mul(self, factor: f64) -> Self {
                Self(self.0 * factor)
            }
        }

        impl ::std::ops::Div<f64> for $name {
            type Output = Self;

            fn div(self, divisor: f64) -> Self {
                Self(self.0 / divisor)
            }
        }

        impl ::std::ops::Div for $name {
            type Output = f64;

            fn div(self, other: Self) -> f64 {
                self.0 / other.0
            }
        }
    };
}

/// `NaN` sorts above everything and equals itself, so quantities can key maps and `max()`.
macro_rules! total_order {
    ($name:ty) => {
        impl $name {
            const fn ordered(self) -> ::ordered_float::OrderedFloat<f64> {
                ::ordered_float::OrderedFloat(self.0)
            }
        }

        impl ::std::cmp::Ord for $name {
            fn cmp(&self, other: &Self) -> ::std::cmp::Ordering {
                self.ordered().cmp(&other.ordered())
            }
        }

        impl ::std::cmp::PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<::std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl ::std::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.ordered() == other.ordered()
            }
        }

        impl ::std::cmp::Eq for $name {}
    };
}
