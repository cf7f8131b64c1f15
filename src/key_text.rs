//! Textual key view and the djb2 bucket hash.
//!
//! `AssocMap` hashes keys by their character sequence only. Any key type
//! that wants to live in the map exposes that sequence through `KeyText`.
//! The same contract as `Hash` + `Borrow` applies: if `K: Borrow<Q>`, then
//! `k.key_text()` and `k.borrow().key_text()` must be equal, otherwise a
//! borrowed query lands in the wrong bucket.

use std::borrow::Cow;
use std::rc::Rc;

/// Seed of the djb2 hash.
pub const DJB2_SEED: u64 = 5381;

/// Character-sequence view of a key, used only for hashing.
pub trait KeyText {
    fn key_text(&self) -> &str;
}

impl KeyText for str {
    #[inline]
    fn key_text(&self) -> &str {
        self
    }
}

impl KeyText for String {
    #[inline]
    fn key_text(&self) -> &str {
        self.as_str()
    }
}

impl<T: KeyText + ?Sized> KeyText for &T {
    #[inline]
    fn key_text(&self) -> &str {
        (**self).key_text()
    }
}

impl<T: KeyText + ?Sized> KeyText for Box<T> {
    #[inline]
    fn key_text(&self) -> &str {
        (**self).key_text()
    }
}

impl<T: KeyText + ?Sized> KeyText for Rc<T> {
    #[inline]
    fn key_text(&self) -> &str {
        (**self).key_text()
    }
}

impl KeyText for Cow<'_, str> {
    #[inline]
    fn key_text(&self) -> &str {
        self
    }
}

/// djb2 over the UTF-8 bytes of `text`: `h = h * 33 + b`, wrapping.
#[inline]
pub fn djb2(text: &str) -> u64 {
    text.bytes().fold(DJB2_SEED, |h, b| {
        (h << 5).wrapping_add(h).wrapping_add(u64::from(b))
    })
}

/// Hash of a key through its textual view.
#[inline]
pub fn hash_key<Q: KeyText + ?Sized>(key: &Q) -> u64 {
    djb2(key.key_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_hashes_to_seed() {
        assert_eq!(djb2(""), DJB2_SEED);
    }

    /// Reference values computed by hand from `h = h * 33 + c`.
    #[test]
    fn matches_reference_values() {
        assert_eq!(djb2("a"), 5381 * 33 + 97);
        assert_eq!(djb2("ab"), (5381 * 33 + 97) * 33 + 98);
    }

    #[test]
    fn long_keys_wrap_without_panicking() {
        let long = "z".repeat(4096);
        let h1 = djb2(&long);
        let h2 = djb2(&long);
        assert_eq!(h1, h2);
    }

    #[test]
    fn owned_and_borrowed_views_agree() {
        let owned = String::from("bucket");
        let boxed: Box<str> = "bucket".into();
        let shared: Rc<str> = Rc::from("bucket");
        let cow: Cow<'_, str> = Cow::Borrowed("bucket");
        let expected = hash_key("bucket");
        assert_eq!(hash_key(&owned), expected);
        assert_eq!(hash_key(&boxed), expected);
        assert_eq!(hash_key(&shared), expected);
        assert_eq!(hash_key(&cow), expected);
    }
}
