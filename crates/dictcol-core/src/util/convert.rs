//! Safe type conversion macros.

/// Converts a `usize` dictionary position into a `u32` code.
///
/// Panics if the value exceeds `u32::MAX`: a dictionary that large is outside
/// what the encoded column format can address.
///
/// # Examples
///
/// ```
/// use dictcol_core::checked_u32;
///
/// let position: usize = 100;
/// let code = checked_u32!(position, "dictionary code");
/// assert_eq!(code, 100u32);
/// ```
#[macro_export]
macro_rules! checked_u32 {
    ($value:expr, $context:expr) => {{
        let v: usize = $value;
        match u32::try_from(v) {
            Ok(code) => code,
            Err(_) => panic!("{} {} exceeds u32::MAX", $context, v),
        }
    }};
}

pub use checked_u32;
