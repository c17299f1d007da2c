//! Name normalization for grouping
//!
//! Company and position names arrive in whatever casing and spacing LinkedIn
//! exported them with. Grouping keys are lowercased, whitespace-collapsed
//! forms; self-employed/unknown company variants collapse into a single
//! sentinel group.

/// Group name used for people without a meaningful company
pub const OTHER_COMPANY: &str = "Other_Unknown";

/// Company name variants that mean "no real company"
const UNKNOWN_MARKERS: [&str; 5] = ["self", "freelance", "independent", "unknown", "n/a"];

/// Normalize a company name into its grouping key
///
/// Empty names and self-employed/unknown variants all map to
/// [`OTHER_COMPANY`]; everything else is lowercased with runs of whitespace
/// collapsed to single spaces.
pub fn norm_company(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return OTHER_COMPANY.to_string();
    }

    let lower = trimmed.to_lowercase();
    if UNKNOWN_MARKERS.iter().any(|m| lower.contains(m)) {
        return OTHER_COMPANY.to_string();
    }

    collapse_whitespace(&lower)
}

/// Normalize a position name (lowercase, collapsed whitespace)
pub fn norm_position(position: &str) -> String {
    collapse_whitespace(&position.trim().to_lowercase())
}

/// Split a raw position string into individual positions
///
/// LinkedIn users cram several roles into one field ("CTO / Founder",
/// "Designer & Developer"). Any of `/ ; | & ,` triggers a split; otherwise
/// the string is returned whole. Empty fragments are dropped.
pub fn split_positions(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    if !raw.contains(['/', ';', '|', '&', ',']) {
        return vec![raw.to_string()];
    }

    raw.split(['/', ';', '|', '&', ','])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_company_basic() {
        assert_eq!(norm_company("Disney"), "disney");
        assert_eq!(norm_company("  ACME   Corp  "), "acme corp");
    }

    #[test]
    fn test_norm_company_empty() {
        assert_eq!(norm_company(""), OTHER_COMPANY);
        assert_eq!(norm_company("   "), OTHER_COMPANY);
    }

    #[test]
    fn test_norm_company_unknown_variants() {
        assert_eq!(norm_company("Self-employed"), OTHER_COMPANY);
        assert_eq!(norm_company("Freelance"), OTHER_COMPANY);
        assert_eq!(norm_company("Independent Consultant"), OTHER_COMPANY);
        assert_eq!(norm_company("N/A"), OTHER_COMPANY);
    }

    #[test]
    fn test_norm_company_case_insensitive_grouping() {
        assert_eq!(norm_company("DISNEY"), norm_company("disney"));
    }

    #[test]
    fn test_norm_position() {
        assert_eq!(norm_position("  Senior   Engineer "), "senior engineer");
        assert_eq!(norm_position(""), "");
    }

    #[test]
    fn test_split_positions_single() {
        assert_eq!(split_positions("CTO"), vec!["CTO"]);
    }

    #[test]
    fn test_split_positions_separators() {
        assert_eq!(split_positions("CTO / Founder"), vec!["CTO", "Founder"]);
        assert_eq!(
            split_positions("Designer & Developer"),
            vec!["Designer", "Developer"]
        );
        assert_eq!(split_positions("A; B | C"), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_split_positions_empty_fragments() {
        assert_eq!(split_positions("CTO //"), vec!["CTO"]);
        assert!(split_positions("").is_empty());
        assert!(split_positions(" , ").is_empty());
    }
}
