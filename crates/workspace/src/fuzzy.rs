//! Fuzzy subsequence ranking for the buffer switcher filter.

/// Characters after which a match counts as a word start.
const SEPARATORS: &[char] = &['/', '\\', '.', '_', '-', ' '];

/// Check if all query characters appear in order in the target (case-insensitive).
pub fn fuzzy_match(query: &str, target: &str) -> bool {
    fuzzy_score(query, target).is_some()
}

/// Score a fuzzy match -- lower is better. Returns None if no match.
/// Prefers matches at word boundaries and consecutive characters.
pub fn fuzzy_score(query: &str, target: &str) -> Option<u32> {
    if query.is_empty() {
        return Some(0);
    }

    let query_lower: Vec<char> = query.chars().flat_map(|c| c.to_lowercase()).collect();
    let target_chars: Vec<char> = target.chars().collect();

    let mut query_idx = 0;
    let mut score: u32 = 0;
    let mut last_match_pos: Option<usize> = None;

    for (target_idx, &target_char) in target_chars.iter().enumerate() {
        if query_idx == query_lower.len() {
            break;
        }
        if !target_char.to_lowercase().eq(std::iter::once(query_lower[query_idx])) {
            continue;
        }

        let at_word_start =
            target_idx == 0 || SEPARATORS.contains(&target_chars[target_idx - 1]);
        if !at_word_start {
            score += 1;
        }

        if let Some(last) = last_match_pos {
            if target_idx > last + 1 {
                score += (target_idx - last - 1) as u32;
            }
        }

        last_match_pos = Some(target_idx);
        query_idx += 1;
    }

    (query_idx == query_lower.len()).then_some(score)
}

/// Items matching `query`, best first. Ties keep their input order.
pub fn rank<'a, T>(items: &'a [T], query: &str, key: impl Fn(&T) -> &str) -> Vec<&'a T> {
    let mut scored: Vec<(&T, u32)> = items
        .iter()
        .filter_map(|item| fuzzy_score(query, key(item)).map(|score| (item, score)))
        .collect();

    scored.sort_by_key(|&(_, score)| score);
    scored.into_iter().map(|(item, _)| item).collect()
}
