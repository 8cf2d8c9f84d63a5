//! Secret generation.

use groundwork_types::{bail, Result};
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

/// Generate a cryptographically random alphanumeric secret.
///
/// Returns exactly `length` characters, each drawn independently and
/// uniformly from the 62-character alphabet (lowercase, uppercase, digits).
/// The randomness source is the operating system CSPRNG; a statistically
/// seeded generator is not acceptable here.
///
/// # Errors
///
/// Fails with `InvalidArgument` when `length` is zero.
pub fn generate_secret(length: usize) -> Result<String> {
    if length == 0 {
        bail!(InvalidArgument, "secret length must be greater than 0");
    }

    Ok(OsRng
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundwork_types::GroundworkError;
    use proptest::prelude::*;

    #[test]
    fn test_exact_length() {
        assert_eq!(generate_secret(16).unwrap().len(), 16);
        assert_eq!(generate_secret(32).unwrap().len(), 32);
        assert_eq!(generate_secret(1).unwrap().len(), 1);
    }

    #[test]
    fn test_zero_length_is_invalid() {
        let err = generate_secret(0).unwrap_err();
        assert!(matches!(err, GroundworkError::InvalidArgument(_)));
    }

    #[test]
    fn test_alphabet_is_alphanumeric_only() {
        let secret = generate_secret(512).unwrap();
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_repeated_calls_differ() {
        // Statistical sanity: two 32-char draws colliding is ~2^-190.
        let a = generate_secret(32).unwrap();
        let b = generate_secret(32).unwrap();
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn generated_secrets_match_policy(length in 1usize..256) {
            let secret = generate_secret(length).unwrap();
            prop_assert_eq!(secret.len(), length);
            prop_assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }
}
