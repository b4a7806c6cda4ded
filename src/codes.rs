//! Short code generation
//!
//! Random fixed-length codes over the 62-symbol alphanumeric alphabet. The
//! randomness comes from a cryptographically secure generator so codes of
//! other accounts can not be guessed.

use rand::Rng;

/// The alphabet codes are drawn from
const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Default code length, 62^7 possible codes
pub const DEFAULT_LENGTH: usize = 7;

/// Generate a random code of the given length
///
/// Every character is drawn independently and uniformly from [`ALPHABET`]
pub fn generate(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let index = rng.random_range(0..ALPHABET.len());
            char::from(ALPHABET[index])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_length() {
        assert_eq!(generate(DEFAULT_LENGTH).len(), 7);
        assert_eq!(generate(12).len(), 12);
        assert_eq!(generate(0).len(), 0);
    }

    #[test]
    fn test_generate_alphabet() {
        let code = generate(256);

        assert!(code.bytes().all(|byte| ALPHABET.contains(&byte)));
    }

    #[test]
    fn test_generate_is_not_constant() {
        // 1 in 62^32 false negative, good enough
        assert_ne!(generate(32), generate(32));
    }
}
