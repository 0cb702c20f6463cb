/// "Did you mean?" suggestions for unknown controllers and actions.
use std::cmp::min;

/// Levenshtein distance between two strings, compared case-insensitively.
pub(crate) fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.to_lowercase().chars().collect();
    let b_chars: Vec<char> = b.to_lowercase().chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev_row: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_chars.len() + 1];

    for i in 1..=a_chars.len() {
        curr_row[0] = i;
        for j in 1..=b_chars.len() {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr_row[j] = min(
                min(curr_row[j - 1] + 1, prev_row[j] + 1),
                prev_row[j - 1] + cost,
            );
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_chars.len()]
}

/// Candidates close to `target`, closest first.
///
/// A candidate qualifies when it is within a third of the target's length in
/// edit distance, or when it contains the target.
pub(crate) fn alternatives<'a, I>(target: &str, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let threshold = target.chars().count() / 3;
    let needle = target.to_lowercase();

    let mut matches: Vec<(usize, &str)> = candidates
        .into_iter()
        .filter(|candidate| *candidate != target)
        .filter_map(|candidate| {
            let distance = levenshtein_distance(target, candidate);
            let contains = !needle.is_empty() && candidate.to_lowercase().contains(&needle);
            (distance <= threshold || contains).then_some((distance, candidate))
        })
        .collect();

    matches.sort();
    matches.dedup();
    matches.into_iter().map(|(_, c)| c.to_string()).collect()
}
