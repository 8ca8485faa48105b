//! Typo suggestions for selection keys.
//!
//! Used by the diagnostics tooling to turn "selection 'sirn_a' names no
//! catalog profile" into an actionable message.

/// Find candidates similar to the query using Levenshtein distance.
///
/// Comparison is case-insensitive; at most three suggestions come back,
/// closest first, preserving the candidates' original casing.
pub fn find_similar<'a, I>(query: &str, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    const DISTANCE_THRESHOLD: usize = 3;

    let query = query.to_lowercase();
    let mut matches: Vec<(String, usize)> = candidates
        .into_iter()
        .map(|candidate| {
            let distance = levenshtein_distance(&query, &candidate.to_lowercase());
            (candidate.to_string(), distance)
        })
        .filter(|(_, distance)| *distance <= DISTANCE_THRESHOLD)
        .collect();

    matches.sort_by_key(|(_, distance)| *distance);
    matches.into_iter().take(3).map(|(id, _)| id).collect()
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let chars1: Vec<char> = s1.chars().collect();
    let chars2: Vec<char> = s2.chars().collect();
    let len1 = chars1.len();
    let len2 = chars2.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for (i, row) in matrix.iter_mut().enumerate().take(len1 + 1) {
        row[0] = i;
    }
    for (j, val) in matrix[0].iter_mut().enumerate().take(len2 + 1) {
        *val = j;
    }

    for i in 1..=len1 {
        for j in 1..=len2 {
            let cost = if chars1[i - 1] == chars2[j - 1] { 0 } else { 1 };
            matrix[i][j] = std::cmp::min(
                std::cmp::min(matrix[i - 1][j] + 1, matrix[i][j - 1] + 1),
                matrix[i - 1][j - 1] + cost,
            );
        }
    }

    matrix[len1][len2]
}
