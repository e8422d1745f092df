//! Tiered assertion macros. Simple asserts are always on; moderate and
//! extreme asserts are enabled in tests and with the `debug-checks` feature.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub(crate) const CALABASH_ASSERT_LEVEL_DEFINITION: u8 = CALABASH_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub(crate) const CALABASH_ASSERT_LEVEL_DEFINITION: u8 = CALABASH_ASSERT_EXTREME;

pub(crate) const CALABASH_ASSERT_SIMPLE: u8 = 1;
pub(crate) const CALABASH_ASSERT_MODERATE: u8 = 2;
pub(crate) const CALABASH_ASSERT_EXTREME: u8 = 3;

macro_rules! calabash_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::CALABASH_ASSERT_LEVEL_DEFINITION
            >= $crate::asserts::CALABASH_ASSERT_SIMPLE
        {
            assert!($($arg)*);
        }
    };
}

macro_rules! calabash_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::CALABASH_ASSERT_LEVEL_DEFINITION
            >= $crate::asserts::CALABASH_ASSERT_SIMPLE
        {
            assert_eq!($($arg)*);
        }
    };
}

macro_rules! calabash_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::CALABASH_ASSERT_LEVEL_DEFINITION
            >= $crate::asserts::CALABASH_ASSERT_MODERATE
        {
            assert!($($arg)*);
        }
    };
}

macro_rules! calabash_assert_extreme {
    ($($arg:tt)*) => {
        if $crate::asserts::CALABASH_ASSERT_LEVEL_DEFINITION
            >= $crate::asserts::CALABASH_ASSERT_EXTREME
        {
            assert!($($arg)*);
        }
    };
}

pub(crate) use calabash_assert_eq_simple;
pub(crate) use calabash_assert_extreme;
pub(crate) use calabash_assert_moderate;
pub(crate) use calabash_assert_simple;
