//! "Did you mean?" suggestions for undefined-identifier warnings.

use strsim::jaro_winkler;

/// Return up to `max_suggestions` names from `candidates` whose similarity to
/// `target` exceeds `threshold`, most similar first.
pub fn find_similar_names(
    target: &str,
    candidates: &[String],
    threshold: f64,
    max_suggestions: usize,
) -> Vec<String> {
    let mut scored: Vec<(String, f64)> = candidates
        .iter()
        .map(|candidate| (candidate.clone(), jaro_winkler(target, candidate)))
        .filter(|(_, score)| *score > threshold)
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().take(max_suggestions).map(|(name, _)| name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_close_misspelling() {
        let candidates = vec!["console".to_string(), "math".to_string()];
        let found = find_similar_names("consol", &candidates, 0.7, 3);
        assert_eq!(found.first().map(String::as_str), Some("console"));
    }

    #[test]
    fn no_suggestion_below_threshold() {
        let candidates = vec!["zzz".to_string()];
        let found = find_similar_names("abc", &candidates, 0.7, 3);
        assert!(found.is_empty());
    }
}
