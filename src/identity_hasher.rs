//! A hasher which just proxies for the integer it's given. Handy for keys that
//! are already well-distributed hashes, and for tests which want to know
//! exactly which bucket a key lands in.
//!
//! It is meant for integer keys. Anything else still hashes, but only the
//! first eight bytes it writes count, so long keys with a shared prefix all
//! collide.

use std::hash::{BuildHasher, Hasher};

/// Proxies integers for themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    /// Folds arbitrary bytes in little-endian, so a lone `u64` written as
    /// bytes comes out as itself. Anything longer than eight bytes keeps only
    /// the first eight.
    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes.iter().rev() {
            self.0 = (self.0 << 8) | *byte as u64;
        }
    }

    // folds rather than replaces: `str` ends its hash with a lone 0xff byte
    fn write_u8(&mut self, i: u8) {
        self.0 = (self.0 << 8) | i as u64;
    }

    fn write_u16(&mut self, i: u16) {
        self.0 = i as u64;
    }

    fn write_u32(&mut self, i: u32) {
        self.0 = i as u64;
    }

    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }

    fn write_usize(&mut self, i: usize) {
        self.0 = i as u64;
    }

    fn write_i8(&mut self, i: i8) {
        self.0 = i as u64;
    }

    fn write_i16(&mut self, i: i16) {
        self.0 = i as u64;
    }

    fn write_i32(&mut self, i: i32) {
        self.0 = i as u64;
    }

    fn write_i64(&mut self, i: i64) {
        self.0 = i as u64;
    }

    fn write_isize(&mut self, i: isize) {
        self.0 = i as u64;
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// Builds new IdentityHashers on demand.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildIdentityHasher;

impl BuildHasher for BuildIdentityHasher {
    type Hasher = IdentityHasher;

    fn build_hasher(&self) -> Self::Hasher {
        IdentityHasher(0)
    }
}

#[cfg(test)]
mod tests {
    use std::hash::{BuildHasher, Hash, Hasher};

    use super::{BuildIdentityHasher, IdentityHasher};

    #[test]
    fn test_hasher() {
        let mut h0 = IdentityHasher(0);
        h0.write_u64(0xc8c8c8c8);
        assert_eq!(0xc8c8c8c8, h0.finish());

        let mut h1 = IdentityHasher(0);
        h1.write_u64(0xc8c8c8c8c8c8c8c8);
        assert_eq!(0xc8c8c8c8c8c8c8c8, h1.finish());

        let mut h2 = IdentityHasher(0);
        h2.write(&0x0102_0304_0506_0708u64.to_le_bytes());
        assert_eq!(0x0102_0304_0506_0708, h2.finish());
    }

    #[test]
    fn long_writes_keep_the_first_eight_bytes() {
        let mut h = IdentityHasher(0);
        h.write(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(0x0807_0605_0403_0201, h.finish());
    }

    #[test]
    fn short_strings_hash_apart() {
        let hash = |s: &str| {
            let mut h = BuildIdentityHasher.build_hasher();
            s.hash(&mut h);
            h.finish()
        };

        assert_eq!(0x6261ff, hash("ab"));
        assert_ne!(hash("red"), hash("green"));
        assert_ne!(hash(""), hash("a"));

        let mut h = BuildIdentityHasher.build_hasher();
        200u8.hash(&mut h);
        assert_eq!(200, h.finish());
    }

    #[test]
    fn hashing_through_the_builder() {
        let mut h = BuildIdentityHasher.build_hasher();
        17u32.hash(&mut h);
        assert_eq!(17, h.finish());
    }
}
