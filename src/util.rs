/// Numeric helpers.
///
/// Lossless conversions between `i64` and `f64`, number formatting for set
/// literals and a primality test for the predefined set of primes. Use these
/// helpers instead of bare `as` casts so that out-of-range values surface as
/// errors or `None` rather than silently rounding.
pub mod num;
