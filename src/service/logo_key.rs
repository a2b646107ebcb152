//! Logical key derivation for uploaded logos.

use rand::Rng;

/// Upper bound (exclusive) for the random key disambiguator
const DISAMBIGUATOR_SPAN: u32 = 90_000;

/// Collapse each whitespace run in a company name to a single `-` so the
/// name can be embedded in an object key.
pub fn sanitize_name(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    let mut in_gap = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_gap {
                sanitized.push('-');
                in_gap = true;
            }
        } else {
            sanitized.push(ch);
            in_gap = false;
        }
    }
    sanitized
}

/// Derive the logical object key for a company logo.
///
/// Key layout is `logo-{disambiguator}-{sanitized name}`. Uniqueness is
/// probabilistic only: two concurrent creations for the same name collide
/// when they draw the same disambiguator.
pub fn derive_logo_key(name: &str, disambiguator: u32) -> String {
    format!("logo-{}-{}", disambiguator, sanitize_name(name))
}

/// Derive a logo key with a freshly drawn disambiguator
pub fn generate_logo_key(name: &str) -> String {
    let disambiguator = rand::rng().random_range(0..DISAMBIGUATOR_SPAN);
    derive_logo_key(name, disambiguator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_collapses_whitespace_runs() {
        assert_eq!(sanitize_name("Acme Corp"), "Acme-Corp");
        assert_eq!(sanitize_name("Acme  Corp"), "Acme-Corp");
        assert_eq!(sanitize_name("Acme \t\n Corp"), "Acme-Corp");
        assert_eq!(sanitize_name("Acme"), "Acme");
    }

    #[test]
    fn test_sanitize_keeps_edge_runs_as_filler() {
        assert_eq!(sanitize_name("  Acme"), "-Acme");
        assert_eq!(sanitize_name("Acme  "), "Acme-");
    }

    #[test]
    fn test_derive_is_reproducible() {
        assert_eq!(derive_logo_key("Acme  Corp", 12345), "logo-12345-Acme-Corp");
        assert_eq!(
            derive_logo_key("Acme  Corp", 12345),
            derive_logo_key("Acme  Corp", 12345)
        );
        assert_eq!(derive_logo_key("Acme Corp", 0), "logo-0-Acme-Corp");
    }

    #[test]
    fn test_generated_key_shape() {
        for _ in 0..100 {
            let key = generate_logo_key("Acme Corp");
            let middle = key
                .strip_prefix("logo-")
                .and_then(|rest| rest.strip_suffix("-Acme-Corp"))
                .unwrap();
            assert!(!middle.is_empty());
            assert!(middle.chars().all(|c| c.is_ascii_digit()));
            assert!(middle.parse::<u32>().unwrap() < DISAMBIGUATOR_SPAN);
        }
    }
}
