//! A hasher which just proxies for the integer it's given. Useful for keys
//! which are already well distributed numbers (ids, pre-hashed values), where
//! hashing them again makes little sense.
//!
//! Small, sequential integers are a poor fit: the table keys part of its
//! probing off the high bits of the hash, and those are all zero.

use std::hash::{BuildHasher, Hasher};

/// Proxies integers for themselves. Anything else gets its bytes folded
/// into the state.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityHasher(u64);

impl IdentityHasher {
    fn mix(&mut self, word: u64, bits: u32) {
        // rotating first keeps a single write from a fresh hasher exact
        self.0 = self.0.rotate_left(bits) ^ word;
    }
}

impl Hasher for IdentityHasher {
    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.mix(u64::from(*byte), 8);
        }
    }

    fn write_u8(&mut self, i: u8) {
        self.mix(u64::from(i), 8);
    }

    fn write_u16(&mut self, i: u16) {
        self.mix(u64::from(i), 16);
    }

    fn write_u32(&mut self, i: u32) {
        self.mix(u64::from(i), 32);
    }

    fn write_u64(&mut self, i: u64) {
        self.mix(i, 64);
    }

    fn write_usize(&mut self, i: usize) {
        self.mix(i as u64, usize::BITS);
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
