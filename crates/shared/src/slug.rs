//! URL slug generation for public wedding pages.

use rand::Rng;

const SUFFIX_LEN: usize = 6;
const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a unique slug for a wedding couple.
///
/// Lowercases the couple name, strips everything but alphanumerics, spaces
/// and hyphens, collapses whitespace runs into single hyphens, and appends a
/// random 6-character suffix so two "Smith & Jones" weddings never collide.
pub fn generate_wedding_slug(couple_name: &str) -> String {
    let mut base = String::with_capacity(couple_name.len());
    let mut last_hyphen = true; // suppress a leading hyphen

    for c in couple_name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            base.push(c);
            last_hyphen = false;
        } else if (c.is_whitespace() || c == '-') && !last_hyphen {
            base.push('-');
            last_hyphen = true;
        }
    }
    let base = base.trim_matches('-');

    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..SUFFIX_CHARSET.len());
            SUFFIX_CHARSET[idx] as char
        })
        .collect();

    if base.is_empty() {
        format!("wedding-{}", suffix)
    } else {
        format!("{}-{}", base, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_basic_format() {
        let slug = generate_wedding_slug("Sarah & James");
        // "sarah" + "-" + "james" + "-" + 6 char suffix
        assert!(slug.starts_with("sarah-james-"), "got: {}", slug);
        assert_eq!(slug.len(), "sarah-james-".len() + SUFFIX_LEN);
    }

    #[test]
    fn test_slug_strips_special_characters() {
        let slug = generate_wedding_slug("O'Brien + Smith!");
        assert!(slug.starts_with("obrien-smith-"), "got: {}", slug);
    }

    #[test]
    fn test_slug_collapses_whitespace() {
        let slug = generate_wedding_slug("Ana   —   Luis");
        assert!(slug.starts_with("ana-luis-"), "got: {}", slug);
    }

    #[test]
    fn test_slug_empty_name_falls_back() {
        let slug = generate_wedding_slug("!!!");
        assert!(slug.starts_with("wedding-"), "got: {}", slug);
    }

    #[test]
    fn test_slug_uniqueness() {
        let a = generate_wedding_slug("Sarah & James");
        let b = generate_wedding_slug("Sarah & James");
        assert_ne!(a, b);
    }
}
