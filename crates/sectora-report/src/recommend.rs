/// Upper bound on recommended industries kept from one response.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Pull industry names out of a free-text recommendation response.
///
/// Each line is stripped of bullet markers (`-`, `•`, spaces) at both ends. A
/// line qualifies when it contains `:` and at least one alphabetic character;
/// the name is the trimmed text before the first `:`. Names keep encounter
/// order, are not deduplicated, and are capped at [`MAX_RECOMMENDATIONS`].
pub fn extract_recommendations(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.trim_matches(|c| matches!(c, '-' | '•' | ' ')).trim())
        .filter(|line| line.contains(':') && line.chars().any(char::is_alphabetic))
        .filter_map(|line| line.split(':').next())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .take(MAX_RECOMMENDATIONS)
        .map(str::to_string)
        .collect()
}
