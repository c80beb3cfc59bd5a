//! Panic payload formatting.

use std::any::Any;

/// Extract a panic payload into a human-readable message.
///
/// Common primitive payloads are rendered with `Display`; anything else yields
/// an opaque description.
///
/// # Examples
/// ```
/// use suitegen::panic_message;
///
/// let err = std::panic::catch_unwind(|| panic!("boom")).expect_err("expected panic");
/// assert_eq!(panic_message(err.as_ref()), "boom");
/// ```
#[must_use]
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    macro_rules! try_downcast {
        ($($ty:ty),* $(,)?) => {
            $(
                if let Some(value) = payload.downcast_ref::<$ty>() {
                    return value.to_string();
                }
            )*
        };
    }

    try_downcast!(&str, String, i32, u32, i64, u64, isize, usize);
    "opaque panic payload".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_string_and_numeric_payloads() {
        let text: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(text.as_ref()), "owned");
        let number: Box<dyn Any + Send> = Box::new(7_u32);
        assert_eq!(panic_message(number.as_ref()), "7");
        let other: Box<dyn Any + Send> = Box::new(vec![1_u8]);
        assert_eq!(panic_message(other.as_ref()), "opaque panic payload");
    }
}
