// Interview LLM prompt templates.
// All prompts for the interview module are defined here.

pub const QUESTION_PROMPT_TEMPLATE: &str = "\
You are a supportive and encouraging technical interviewer conducting an interview with a candidate who has {experience} years of experience in {tech_stack}.

Given that the candidate is early in their career:
1. Focus on fundamental concepts and principles
2. Ask about their self-learning journey and projects
3. Gauge their understanding of core concepts
4. Assess their problem-solving approach
5. Keep questions beginner-friendly but meaningful

Generate 5 technical questions based on their tech stack. The question should:
- Be clear and specific
- Focus on foundational understanding
- Include a brief context or scenario
- Encourage explanation of thought process
- Be professionally formatted and concise

Only return the questions, each on a new line.";

pub const FEEDBACK_PROMPT_TEMPLATE: &str = "\
You are a supportive technical interviewer providing feedback to an early-career candidate.
Question: {question}
Answer: {answer}

Provide constructive feedback that:
1. Acknowledges the candidate's effort
2. Points out correct concepts they've mentioned
3. Identifies areas for improvement
4. Offers a gentle suggestion for further learning
5. Maintains an encouraging tone

Keep the feedback concise and positive while being honest.";

pub const SCORING_PROMPT_TEMPLATE: &str = "\
You are an objective technical interviewer.
Question:
{question}

Candidate's Answer:
{answer}

On a scale from 0 to 100, how correct and complete is this answer?
Only output the integer score (0-100).";

pub fn question_prompt(experience: &str, tech_stack: &str) -> String {
    fill_template(
        QUESTION_PROMPT_TEMPLATE,
        &[("experience", experience), ("tech_stack", tech_stack)],
    )
}

pub fn feedback_prompt(question: &str, answer: &str) -> String {
    fill_template(
        FEEDBACK_PROMPT_TEMPLATE,
        &[("question", question), ("answer", answer)],
    )
}

pub fn scoring_prompt(question: &str, answer: &str) -> String {
    fill_template(
        SCORING_PROMPT_TEMPLATE,
        &[("question", question), ("answer", answer)],
    )
}

/// Replaces `{name}` placeholders in one pass. Substituted values are never rescanned,
/// and unknown placeholders are left as written.
fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substitution = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (close, *value))
        });
        match substitution {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_prompt_fills_variables() {
        let p = question_prompt("1", "Python, Django");
        assert!(p.contains("who has 1 years of experience in Python, Django"));
        assert!(!p.contains("{experience}"));
        assert!(!p.contains("{tech_stack}"));
    }

    #[test]
    fn test_scoring_prompt_fills_question_and_answer() {
        let p = scoring_prompt("What is a closure?", "A function capturing its environment");
        assert!(p.contains("What is a closure?"));
        assert!(p.contains("A function capturing its environment"));
        assert!(p.contains("0 to 100"));
    }

    #[test]
    fn test_answer_placeholder_text_is_not_reinterpreted() {
        let p = feedback_prompt("Q?", "I would write {question} here");
        assert!(p.contains("Answer: I would write {question} here"));
    }

    #[test]
    fn test_question_placeholder_text_is_not_reinterpreted() {
        let p = feedback_prompt("Explain the {answer} field", "SECRET");
        assert!(p.contains("Question: Explain the {answer} field"));
        assert!(p.contains("Answer: SECRET"));
        assert_eq!(p.matches("SECRET").count(), 1);
    }

    #[test]
    fn test_profile_values_are_substituted_once() {
        let p = question_prompt("{tech_stack}", "Rust");
        assert!(p.contains("who has {tech_stack} years of experience in Rust"));
    }

    #[test]
    fn test_fill_template_keeps_unknown_and_unclosed_braces() {
        assert_eq!(
            fill_template("{a} {b} {a", &[("a", "x")]),
            "x {b} {a"
        );
    }
}
