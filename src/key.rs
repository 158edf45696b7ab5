//! Key coercion for configuration entries.
//!
//! Every entry point of [`ConfigNode`](crate::ConfigNode) funnels its key
//! through [`ToKey`], so integers, characters and strings address the same
//! slot whenever their string forms agree. The coercion is lossy on purpose:
//! `1`, `1u8` and `"1"` all collapse to the key `"1"`.

/// Conversion of a key-like value into the string form used for storage.
pub trait ToKey {
    /// Produce the stored string form of this key.
    fn to_key(&self) -> String;
}

impl ToKey for str {
    fn to_key(&self) -> String {
        self.to_owned()
    }
}

impl ToKey for String {
    fn to_key(&self) -> String {
        self.clone()
    }
}

impl ToKey for char {
    fn to_key(&self) -> String {
        self.to_string()
    }
}

impl ToKey for bool {
    fn to_key(&self) -> String {
        self.to_string()
    }
}

impl<T: ToKey + ?Sized> ToKey for &T {
    fn to_key(&self) -> String {
        (**self).to_key()
    }
}

macro_rules! int_keys {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToKey for $ty {
                fn to_key(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

int_keys!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Whether `key` is a list-style positional key.
///
/// A list index is a non-empty run of ASCII digits. Signs, whitespace and
/// decimal points disqualify a key, leading zeros do not.
pub fn is_list_index(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}
