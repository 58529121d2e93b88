//! Fuzzy contact-name matching using strsim.
//!
//! Lets `--contact "jon doe"` pick "John Doe" out of the address book.
//!
//! CHANGELOG:
//! - 01/14/2026 - Score display names, strategy enum, word-order strategy reworked (Claude)
//! - 01/10/2026 - Initial stub (Claude)

use strsim::{jaro_winkler, normalized_levenshtein, sorensen_dice};

/// Minimum score for a fuzzy match to count (0.0 - 1.0).
pub const DEFAULT_THRESHOLD: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    JaroWinkler,
    SorensenDice,
    Levenshtein,
    TokenSort,
}

/// Best score found across strategies.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatch {
    pub score: f64,
    pub strategy: Strategy,
}

/// Score `query` against `target` and keep the best strategy.
///
/// Comparison is case-insensitive. TokenSort sorts words first so
/// "Doe John" still lines up with "John Doe".
pub fn multi_match(query: &str, target: &str) -> FuzzyMatch {
    let query = query.to_lowercase();
    let target = target.to_lowercase();

    [
        (Strategy::JaroWinkler, jaro_winkler(&query, &target)),
        (Strategy::SorensenDice, sorensen_dice(&query, &target)),
        (Strategy::Levenshtein, normalized_levenshtein(&query, &target)),
        (Strategy::TokenSort, jaro_winkler(&sorted_tokens(&query), &sorted_tokens(&target))),
    ]
    .into_iter()
    .fold(
        FuzzyMatch {
            score: 0.0,
            strategy: Strategy::JaroWinkler,
        },
        |best, (strategy, score)| {
            if score > best.score {
                FuzzyMatch { score, strategy }
            } else {
                best
            }
        },
    )
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let result = multi_match("John Doe", "John Doe");
        assert!(result.score > 0.99);
    }

    #[test]
    fn test_case_insensitive() {
        let result = multi_match("john doe", "John Doe");
        assert!(result.score > 0.99);
    }

    #[test]
    fn test_word_order() {
        let result = multi_match("Doe John", "John Doe");
        assert!(result.score > 0.99, "Score was {}", result.score);
        assert_eq!(result.strategy, Strategy::TokenSort);
    }

    #[test]
    fn test_typo_clears_threshold() {
        let result = multi_match("Jon Doe", "John Doe");
        assert!(result.score >= DEFAULT_THRESHOLD, "Score was {}", result.score);
    }

    #[test]
    fn test_unrelated_names_below_threshold() {
        let result = multi_match("Zed", "Margaret Hamilton");
        assert!(result.score < DEFAULT_THRESHOLD, "Score was {}", result.score);
    }
}
