//! Fuzzy company search
//!
//! Ranks company names against a free-text query: exact substring matches
//! win outright, everything else is scored with Jaro-Winkler similarity.
//! Scores below [`MATCH_THRESHOLD`] are not considered matches at all.

/// Minimum Jaro-Winkler score for a non-substring match
pub const MATCH_THRESHOLD: f64 = 0.6;

/// A scored match from [`rank`]
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// Index into the candidate slice passed to [`rank`]
    pub index: usize,
    pub score: f64,
}

/// Score a single candidate against the query
///
/// Both sides are lowercased and whitespace-trimmed. A substring hit scores
/// 1.0; otherwise the Jaro-Winkler similarity of the full strings, boosted
/// by the best per-word similarity so that "disney" still ranks
/// "The Walt Disney Company" highly.
pub fn score(query: &str, candidate: &str) -> f64 {
    let query = query.trim().to_lowercase();
    let candidate = candidate.trim().to_lowercase();
    if query.is_empty() || candidate.is_empty() {
        return 0.0;
    }

    if candidate.contains(&query) {
        return 1.0;
    }

    let whole = strsim::jaro_winkler(&query, &candidate);
    let best_word = candidate
        .split_whitespace()
        .map(|w| strsim::jaro_winkler(&query, w))
        .fold(0.0_f64, f64::max);

    whole.max(best_word)
}

/// Rank candidates by score, best first, dropping non-matches
///
/// Ties break on candidate index so the ordering is stable.
pub fn rank(query: &str, candidates: &[&str]) -> Vec<Match> {
    let mut matches: Vec<Match> = candidates
        .iter()
        .enumerate()
        .map(|(index, c)| Match {
            index,
            score: score(query, c),
        })
        .filter(|m| m.score >= MATCH_THRESHOLD)
        .collect();

    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.index.cmp(&b.index))
    });

    matches
}

/// Resolve a query to the single best-matching candidate, if any
pub fn best_match(query: &str, candidates: &[&str]) -> Option<Match> {
    rank(query, candidates).into_iter().next()
}
