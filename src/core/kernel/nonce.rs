use crate::core::errors::ExchangeError;
use std::sync::atomic::{AtomicU64, Ordering};

/// Largest nonce the exchange accepts (`1..=2^31 - 2`)
pub const MAX_NONCE: u64 = 2_147_483_646;

/// Number of leading API-key characters mixed into the seed
const KEY_SEED_CHARS: usize = 5;

/// Strictly increasing nonce source for signed requests.
///
/// Issuance is a single atomic step, so concurrent callers sharing one
/// generator never observe the same value. Two generators seeded from the
/// same key are independent and can collide; keep one per API key.
#[derive(Debug)]
pub struct NonceGenerator {
    current: AtomicU64,
}

impl NonceGenerator {
    /// Seed from the API key and the current wall-clock time
    pub fn from_api_key(api_key: &str) -> Self {
        let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();
        Self::from_api_key_at(api_key, now)
    }

    /// Seed from the API key and an explicit unix time in seconds
    pub fn from_api_key_at(api_key: &str, unix_seconds: u64) -> Self {
        Self::with_seed(key_seed(api_key).saturating_add(unix_seconds))
    }

    /// Start from an explicit seed; the first issued nonce is `seed + 1`
    pub const fn with_seed(seed: u64) -> Self {
        Self {
            current: AtomicU64::new(seed),
        }
    }

    /// Issue the next nonce.
    ///
    /// Fails without advancing once the next value would exceed [`MAX_NONCE`].
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> Result<u64, ExchangeError> {
        self.current
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                if n < MAX_NONCE {
                    Some(n + 1)
                } else {
                    None
                }
            })
            .map(|previous| previous + 1)
            .map_err(|last| ExchangeError::NonceExhausted { last })
    }

    /// Most recently issued value (or the seed before the first issue)
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }
}

/// Value of the hexadecimal digits leading the first five key characters.
///
/// Parsing stops at the first non-hex character; a key without a hex
/// prefix contributes zero.
fn key_seed(api_key: &str) -> u64 {
    api_key
        .chars()
        .take(KEY_SEED_CHARS)
        .map_while(|c| c.to_digit(16))
        .fold(0, |acc, digit| acc * 16 + u64::from(digit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_seed_from_key_prefix_and_time() {
        let generator = NonceGenerator::from_api_key_at("A1B2C3D4E5", 1_600_000_000);
        assert_eq!(generator.current(), 0xA1B2C + 1_600_000_000);
        assert_eq!(generator.next().unwrap(), 0xA1B2C + 1_600_000_001);
    }

    #[test]
    fn test_key_seed_stops_at_non_hex() {
        assert_eq!(key_seed("12zzz"), 0x12);
        assert_eq!(key_seed("mockApiKey"), 0);
        assert_eq!(key_seed("fffff"), 0xFFFFF);
        assert_eq!(key_seed(""), 0);
    }

    #[test]
    fn test_strictly_increasing() {
        let generator = NonceGenerator::from_api_key("deadbeef");
        let mut previous = generator.current();
        for _ in 0..1000 {
            let nonce = generator.next().unwrap();
            assert_eq!(nonce, previous + 1);
            previous = nonce;
        }
    }

    #[test]
    fn test_exhaustion_is_reported_not_wrapped() {
        let generator = NonceGenerator::with_seed(MAX_NONCE - 1);
        assert_eq!(generator.next().unwrap(), MAX_NONCE);

        let err = generator.next().unwrap_err();
        assert!(matches!(err, ExchangeError::NonceExhausted { last } if last == MAX_NONCE));
        assert_eq!(generator.current(), MAX_NONCE);
    }

    #[test]
    fn test_concurrent_issuance_never_repeats() {
        let generator = Arc::new(NonceGenerator::with_seed(1_000));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let generator = Arc::clone(&generator);
                std::thread::spawn(move || {
                    (0..500)
                        .map(|_| generator.next().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for nonce in handle.join().unwrap() {
                assert!(seen.insert(nonce), "nonce {} issued twice", nonce);
            }
        }
        assert_eq!(seen.len(), 4000);
        assert_eq!(generator.current(), 5_000);
    }
}
