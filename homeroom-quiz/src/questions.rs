/// The static question set and the scoring function
///
/// Questions live in the binary and never change while the process runs.
/// Templates render the prompt and options only; the correct answer stays on
/// the server and is consulted exclusively by [`score`].

use std::collections::HashMap;

/// A multiple-choice question
///
/// The `answer` field is private so nothing outside this module can leak it
/// into a response.
#[derive(Debug)]
pub struct Question {
    /// Stable question id; form field names are this id stringified
    pub id: u32,

    /// Question text
    pub prompt: &'static str,

    /// Choices, in display order
    pub options: &'static [&'static str],

    /// The single correct option, matched by exact string equality
    answer: &'static str,
}

/// The question set, in display order
static QUESTIONS: &[Question] = &[
    Question {
        id: 1,
        prompt: "What is 2 + 2?",
        options: &["3", "4", "5"],
        answer: "4",
    },
    Question {
        id: 2,
        prompt: "What is the capital of Poland?",
        options: &["Krakow", "Warsaw", "Gdansk"],
        answer: "Warsaw",
    },
    Question {
        id: 3,
        prompt: "Which planet is closest to the Sun?",
        options: &["Venus", "Mercury", "Mars"],
        answer: "Mercury",
    },
    Question {
        id: 4,
        prompt: "How many sides does a hexagon have?",
        options: &["5", "6", "8"],
        answer: "6",
    },
    Question {
        id: 5,
        prompt: "Which element has the chemical symbol Au?",
        options: &["Silver", "Copper", "Gold"],
        answer: "Gold",
    },
];

/// Returns the ordered question set
pub fn all() -> &'static [Question] {
    QUESTIONS
}

/// Number of questions in the set
pub fn total() -> usize {
    QUESTIONS.len()
}

/// Scores a submitted answer set
///
/// Form keys are stringified question ids, values the chosen option text.
/// A question counts if and only if the submitted value equals its answer
/// exactly, with no trimming or case folding. Unanswered questions and unknown
/// keys contribute nothing, so the result is always in 0..=total().
pub fn score(answers: &HashMap<String, String>) -> u32 {
    QUESTIONS
        .iter()
        .filter(|question| {
            answers
                .get(&question.id.to_string())
                .is_some_and(|submitted| submitted == question.answer)
        })
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The full correct answer set, keyed the way the form submits it
    fn all_correct() -> HashMap<String, String> {
        QUESTIONS
            .iter()
            .map(|q| (q.id.to_string(), q.answer.to_string()))
            .collect()
    }

    #[test]
    fn test_all_correct_scores_total() {
        assert_eq!(score(&all_correct()), total() as u32);
    }

    #[test]
    fn test_empty_submission_scores_zero() {
        assert_eq!(score(&HashMap::new()), 0);
    }

    #[test]
    fn test_partial_submission_scores_exact_match_count() {
        let mut answers = all_correct();
        answers.remove("1");
        answers.insert("2".to_string(), "Krakow".to_string());

        // One answer missing, one wrong
        assert_eq!(score(&answers), total() as u32 - 2);
    }

    #[test]
    fn test_unknown_question_ids_ignored() {
        let mut answers = all_correct();
        answers.insert("999".to_string(), "4".to_string());
        answers.insert("not-an-id".to_string(), "Warsaw".to_string());

        assert_eq!(score(&answers), total() as u32);
    }

    #[test]
    fn test_matching_is_exact_per_question() {
        // A correct option for one question is wrong for another
        let answers = HashMap::from([("1".to_string(), "Warsaw".to_string())]);
        assert_eq!(score(&answers), 0);

        // No normalization: case matters
        let answers = HashMap::from([("2".to_string(), "warsaw".to_string())]);
        assert_eq!(score(&answers), 0);
    }

    #[test]
    fn test_question_ids_unique() {
        let mut ids: Vec<u32> = QUESTIONS.iter().map(|q| q.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), QUESTIONS.len());
    }

    #[test]
    fn test_every_answer_is_one_of_its_options() {
        for question in QUESTIONS {
            assert!(
                question.options.contains(&question.answer),
                "Question {} has an answer outside its options",
                question.id
            );
        }
    }
}
