//! # Library-Internal Utilities

/// Computes the number of digits needed to represent a number in a given base
#[cfg_attr(feature = "internals", visibility::make(pub))]
#[must_use]
pub(crate) fn digits(mut number: usize, mut basis: u8) -> u32 {
    debug_assert_ne!(basis, 0);
    if number == 0 {
        return 1;
    }
    if basis == 1 {
        return std::cmp::max(u32::try_from(number).unwrap_or(u32::MAX), 1);
    }
    let mut digits = 0;
    if (basis & (basis - 1)) == 0 {
        // Base is a power of 2. Optimized version using shift operations.
        let mut pow: u8 = 0;
        basis >>= 1;
        while basis > 0 {
            pow += 1;
            basis >>= 1;
        }
        while number > 0 {
            digits += 1;
            number >>= pow;
        }
    } else {
        while number > 0 {
            digits += 1;
            number /= basis as usize;
        }
    }
    digits
}

/// The number of bits needed to give each of `n` objects a distinct code, i.e.,
/// `ceil(log2(n))`. Zero for `n <= 1`.
#[cfg_attr(feature = "internals", visibility::make(pub))]
#[must_use]
pub(crate) fn n_code_bits(n: usize) -> u32 {
    if n <= 1 {
        return 0;
    }
    digits(n - 1, 2)
}

/// Integer division rounding up
#[cfg_attr(feature = "internals", visibility::make(pub))]
#[must_use]
pub(crate) fn ceil_div(num: usize, denom: usize) -> usize {
    debug_assert_ne!(denom, 0);
    num / denom + usize::from(num % denom != 0)
}

/// Integer square root rounding up, i.e., the smallest `r` with `r * r >= n`
#[cfg_attr(feature = "internals", visibility::make(pub))]
#[must_use]
pub(crate) fn ceil_sqrt(n: usize) -> usize {
    if n <= 1 {
        return n;
    }
    // Newton iteration for the floor of the square root
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    if x * x == n {
        x
    } else {
        x + 1
    }
}

/// Gray code of a number
#[inline]
#[cfg_attr(feature = "internals", visibility::make(pub))]
#[must_use]
pub(crate) fn gray_code(i: usize) -> usize {
    i ^ (i >> 1)
}
