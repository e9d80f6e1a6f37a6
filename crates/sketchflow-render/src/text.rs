//! Greedy label wrapping.

/// Labels longer than this are wrapped.
pub const WRAP_THRESHOLD: usize = 20;
/// Target line length once wrapping kicks in.
pub const MAX_CHARS_PER_LINE: usize = 18;

/// Splits a label into display lines: short labels stay on one line, longer
/// ones get a greedy word wrap with long tokens hard-split at the limit.
pub fn wrap_label(text: &str) -> Vec<String> {
    if text.chars().count() <= WRAP_THRESHOLD {
        return vec![text.to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    let mut push_current = |lines: &mut Vec<String>, current: &mut String, len: &mut usize| {
        if !current.is_empty() {
            lines.push(std::mem::take(current));
            *len = 0;
        }
    };

    for word in text.split_whitespace() {
        let mut word_chars: Vec<char> = word.chars().collect();
        // Tokens longer than a full line are chopped rather than overflowing.
        while word_chars.len() > MAX_CHARS_PER_LINE {
            push_current(&mut lines, &mut current, &mut current_len);
            let head: String = word_chars[..MAX_CHARS_PER_LINE].iter().collect();
            lines.push(head);
            word_chars.drain(..MAX_CHARS_PER_LINE);
        }
        if word_chars.is_empty() {
            continue;
        }
        let word: String = word_chars.into_iter().collect();
        let word_len = word.chars().count();
        let needed = if current_len == 0 { word_len } else { current_len + 1 + word_len };
        if needed > MAX_CHARS_PER_LINE {
            push_current(&mut lines, &mut current, &mut current_len);
            current_len = word_len;
            current = word;
        } else {
            if current_len > 0 {
                current.push(' ');
            }
            current.push_str(&word);
            current_len = needed;
        }
    }
    push_current(&mut lines, &mut current, &mut current_len);

    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_labels_stay_on_one_line() {
        assert_eq!(wrap_label("Start"), vec!["Start"]);
        assert_eq!(wrap_label("exactly twenty chars"), vec!["exactly twenty chars"]);
    }

    #[test]
    fn long_labels_wrap_greedily() {
        assert_eq!(
            wrap_label("validate the incoming payload"),
            vec!["validate the", "incoming payload"]
        );
    }

    #[test]
    fn oversized_tokens_are_hard_split() {
        let lines = wrap_label("somethingremarkablyunbroken word");
        assert_eq!(lines[0], "somethingremarkabl");
        assert!(lines.iter().all(|l| l.chars().count() <= MAX_CHARS_PER_LINE));
    }
}
