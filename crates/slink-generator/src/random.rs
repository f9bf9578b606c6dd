use crate::Generator;
use rand::RngCore;
use slink_core::LinkId;

pub const DEFAULT_ID_BYTES: usize = 6;
/// Upper bound on bytes per id. 32 bytes encode to at most 44 base58
/// characters, inside the 64-character id limit.
pub const MAX_ID_BYTES: usize = 32;

/// Generates non-sequential ids by base58-encoding random bytes.
///
/// Six bytes give a 48-bit space and ids of at most 9 characters. Draws
/// can still collide; the link service detects that on insert and retries.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    bytes: usize,
}

impl RandomGenerator {
    /// Creates a generator drawing `bytes` random bytes per id, clamped to
    /// `1..=MAX_ID_BYTES`.
    pub fn new(bytes: usize) -> Self {
        Self {
            bytes: bytes.clamp(1, MAX_ID_BYTES),
        }
    }

    pub fn bytes(&self) -> usize {
        self.bytes
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_BYTES)
    }
}

impl Generator for RandomGenerator {
    type Output = LinkId;

    fn generate(&self) -> LinkId {
        let mut buf = vec![0u8; self.bytes];
        rand::thread_rng().fill_bytes(&mut buf);
        // base58 output is always alphanumeric
        LinkId::new_unchecked(bs58::encode(buf).into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_valid_and_short() {
        let generator = RandomGenerator::default();

        for _ in 0..100 {
            let id = generator.generate();
            assert!(LinkId::new(id.as_str()).is_ok(), "{id}");
            assert!(!id.as_str().is_empty() && id.as_str().len() <= 9, "{id}");
        }
    }

    #[test]
    fn ids_do_not_repeat_in_practice() {
        let generator = RandomGenerator::default();
        let ids: HashSet<_> = (0..1000).map(|_| generator.generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn zero_bytes_is_clamped() {
        let generator = RandomGenerator::new(0);
        assert_eq!(generator.bytes(), 1);
        assert!(!generator.generate().as_str().is_empty());
    }

    #[test]
    fn oversized_request_is_clamped_to_a_valid_id() {
        let generator = RandomGenerator::new(64);
        assert_eq!(generator.bytes(), MAX_ID_BYTES);

        for _ in 0..100 {
            let id = generator.generate();
            assert!(LinkId::new(id.as_str()).is_ok(), "{id}");
        }
    }

    #[test]
    fn largest_size_produces_valid_ids() {
        let generator = RandomGenerator::new(MAX_ID_BYTES);

        for _ in 0..100 {
            let id = generator.generate();
            assert!(id.as_str().len() <= 44, "{id}");
            assert!(LinkId::new(id.as_str()).is_ok(), "{id}");
        }
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
