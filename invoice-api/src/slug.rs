//! Company code derivation.
//!
//! A company's primary key is never supplied by the client. It is derived
//! once, at creation time, from the display name.

/// Turns a display name into a company code: lowercased, with every space
/// replaced by a hyphen.
///
/// No other normalization happens, so two names differing only in case map
/// to the same code and the second insert fails on the primary key.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("New Company"), "new-company");
        assert_eq!(slugify("International Business Machines"), "international-business-machines");
    }

    #[test]
    fn test_slugify_keeps_everything_else() {
        assert_eq!(slugify("apple"), "apple");
        assert_eq!(slugify("Acme, Inc."), "acme,-inc.");
        // Each space becomes its own hyphen
        assert_eq!(slugify("Two  Spaces"), "two--spaces");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_is_case_insensitive_on_input() {
        assert_eq!(slugify("Test Company"), slugify("TEST COMPANY"));
    }
}
