use crate::interview::models::QUESTIONS_PER_INTERVIEW;

pub const MAX_SCORE: u32 = 100;

/// Extracts a 0–100 score from free-form scoring output.
///
/// Takes the first run of ASCII digits. No digits yields 0. Values above 100,
/// including digit runs too long for `u32`, are clamped to 100.
pub fn extract_score(raw: &str) -> u32 {
    let digits: String = raw
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<u32>().unwrap_or(MAX_SCORE).min(MAX_SCORE)
}

/// Splits a question-generation completion into at most five clean questions.
///
/// Each line is trimmed and stripped of leading bullet or numbering markers;
/// empty lines are dropped.
pub fn normalize_questions(raw: &str) -> Vec<String> {
    raw.lines()
        .map(strip_list_marker)
        .filter(|q| !q.is_empty())
        .take(QUESTIONS_PER_INTERVIEW)
        .map(String::from)
        .collect()
}

// A "-", "*" or "1." style marker only counts when whitespace (or nothing) follows it,
// so "-1", "*args" and "3.14" stay intact.
fn strip_list_marker(line: &str) -> &str {
    let line = line.trim().trim_start_matches(['•', '·']).trim_start();

    let marker_len = if line.starts_with(['-', '*']) {
        1
    } else {
        let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
        if (1..=2).contains(&digits) && line[digits..].starts_with(['.', ')', ':']) {
            digits + 1
        } else {
            0
        }
    };

    if marker_len > 0 {
        let rest = &line[marker_len..];
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return rest.trim();
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_with_denominator() {
        assert_eq!(extract_score("Score: 87/100"), 87);
    }

    #[test]
    fn test_score_without_digits_is_zero() {
        assert_eq!(extract_score("no numeric content"), 0);
        assert_eq!(extract_score(""), 0);
    }

    #[test]
    fn test_score_surrounded_by_whitespace() {
        assert_eq!(extract_score("  42  "), 42);
    }

    #[test]
    fn test_score_clamped_to_hundred() {
        assert_eq!(extract_score("250"), 100);
        assert_eq!(extract_score("99999999999999999999"), 100);
    }

    #[test]
    fn test_score_uses_first_digit_run_only() {
        assert_eq!(extract_score("I'd give this 65, maybe 70"), 65);
    }

    #[test]
    fn test_normalize_strips_bullets_and_numbers() {
        let raw = "• What is a list comprehension?\n\n2. Explain the GIL.\n- How do decorators work?\n3) What is PEP 8?";
        let qs = normalize_questions(raw);
        assert_eq!(
            qs,
            vec![
                "What is a list comprehension?",
                "Explain the GIL.",
                "How do decorators work?",
                "What is PEP 8?",
            ]
        );
    }

    #[test]
    fn test_normalize_keeps_at_most_five() {
        let raw = (1..=8)
            .map(|i| format!("Question {i}?"))
            .collect::<Vec<_>>()
            .join("\n");
        let qs = normalize_questions(&raw);
        assert_eq!(qs.len(), 5);
        assert_eq!(qs[4], "Question 5?");
    }

    #[test]
    fn test_normalize_output_is_trimmed_and_nonempty() {
        let raw = "   \n  •   \n\t Why use async?  \n * \n";
        let qs = normalize_questions(raw);
        assert_eq!(qs, vec!["Why use async?"]);
        assert!(qs.iter().all(|q| !q.is_empty() && q.trim() == q));
    }

    #[test]
    fn test_normalize_leaves_years_in_question_text() {
        let qs = normalize_questions("2024 brought Python 3.13; what changed?");
        assert_eq!(qs, vec!["2024 brought Python 3.13; what changed?"]);
    }

    #[test]
    fn test_normalize_keeps_leading_symbols_that_are_not_markers() {
        let raw = "3.14 is an approximation of pi; how would you round it?\n\
                   *args and **kwargs: when would you use them?\n\
                   -1 as a list index returns what?";
        assert_eq!(
            normalize_questions(raw),
            vec![
                "3.14 is an approximation of pi; how would you round it?",
                "*args and **kwargs: when would you use them?",
                "-1 as a list index returns what?",
            ]
        );
    }

    #[test]
    fn test_normalize_strips_marker_before_symbolic_text() {
        let qs = normalize_questions("1. -1 as an index?\n* *args usage?\n2) 3.14 rounded?");
        assert_eq!(qs, vec!["-1 as an index?", "*args usage?", "3.14 rounded?"]);
    }
}
