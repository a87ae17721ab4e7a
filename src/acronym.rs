//! Acronym builder.
//!
//! # Examples
//!
//! ```
//! use foldersort::acronym::make_acronym;
//!
//! let acronym = make_acronym(
//!     "light amplification by the simulated emission of radiation",
//!     &["by", "the", "of"],
//! );
//! assert_eq!(acronym, "LASER");
//! ```

/// Builds an acronym from the first letter of every word in `sentence`.
///
/// Words are split on whitespace. A word is skipped when it is exactly equal
/// (case-sensitive) to one of `excluded_words`. The collected letters are
/// uppercased.
pub fn make_acronym<S: AsRef<str>>(sentence: &str, excluded_words: &[S]) -> String {
    sentence
        .split_whitespace()
        .filter(|word| !excluded_words.iter().any(|ex| ex.as_ref() == *word))
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_laser() {
        let acronym = make_acronym(
            "light amplification by the simulated emission of radiation",
            &["by", "the", "of"],
        );
        assert_eq!(acronym, "LASER");
    }

    #[test]
    fn test_no_exclusions() {
        let none: &[&str] = &[];
        assert_eq!(make_acronym("portable network graphics", none), "PNG");
    }

    #[test]
    fn test_extra_whitespace_is_ignored() {
        let none: &[&str] = &[];
        assert_eq!(make_acronym("  as   soon\tas\npossible ", none), "ASAP");
    }

    #[test]
    fn test_exclusion_is_case_sensitive() {
        assert_eq!(make_acronym("The Best Of", &["the", "of"]), "TBO");
    }

    #[test]
    fn test_empty_sentence() {
        assert_eq!(make_acronym("", &["a"]), "");
        assert_eq!(make_acronym("of the", &["of", "the"]), "");
    }

    #[test]
    fn test_owned_exclusions() {
        let excluded = vec!["and".to_string()];
        assert_eq!(make_acronym("rock and roll", &excluded), "RR");
    }
}
