//! Case-insensitive literal replacement
//!
//! Comparison folds each character with `char::to_lowercase`, so names with
//! accents or regex metacharacters match literally.

/// Replace every case-insensitive occurrence of `needle` in `haystack`
pub(super) fn replace_ignore_case(haystack: &str, needle: &str, replacement: &str) -> String {
    let folded: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if folded.is_empty() {
        return haystack.to_string();
    }

    let mut output = String::with_capacity(haystack.len());
    let mut cursor = 0;

    while cursor < haystack.len() {
        if let Some(end) = match_at(haystack, cursor, &folded) {
            output.push_str(replacement);
            cursor = end;
            continue;
        }

        // Cursor always sits on a char boundary
        if let Some(ch) = haystack[cursor..].chars().next() {
            output.push(ch);
            cursor += ch.len_utf8();
        }
    }

    output
}

/// End byte offset of a folded match starting at `start`
fn match_at(haystack: &str, start: usize, folded: &[char]) -> Option<usize> {
    let mut matched = 0;

    for (offset, ch) in haystack[start..].char_indices() {
        if matched == folded.len() {
            return Some(start + offset);
        }
        for lower in ch.to_lowercase() {
            if folded.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
    }

    (matched == folded.len()).then_some(haystack.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_all_occurrences() {
        assert_eq!(replace_ignore_case("abc ABC aBc", "abc", "x"), "x x x");
    }

    #[test]
    fn test_accented_characters() {
        assert_eq!(
            replace_ignore_case("JOÃO e joão", "João", "[ESTUDANTE]"),
            "[ESTUDANTE] e [ESTUDANTE]"
        );
    }

    #[test]
    fn test_needle_at_end_of_text() {
        assert_eq!(replace_ignore_case("aluno Caio", "caio", "X"), "aluno X");
    }

    #[test]
    fn test_no_match_leaves_text_intact() {
        assert_eq!(replace_ignore_case("sem nomes aqui", "Beatriz", "X"), "sem nomes aqui");
    }

    #[test]
    fn test_metacharacters_are_literal() {
        assert_eq!(replace_ignore_case("a.b a*b", "a.b", "X"), "X a*b");
        assert_eq!(replace_ignore_case("(x)+[y]", "(X)+[Y]", "Z"), "Z");
    }

    #[test]
    fn test_empty_needle() {
        assert_eq!(replace_ignore_case("texto", "", "X"), "texto");
    }
}
