use serde::{Deserialize, Serialize};

/// Number of questions asked in one interview.
pub const QUESTIONS_PER_INTERVIEW: usize = 5;

/// Candidate details captured by the profile form.
///
/// Field names match the persisted `candidate_info` layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Years of experience as typed by the candidate ("1", "2.5", "fresher").
    #[serde(default)]
    pub experience: String,
    /// Desired position.
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tech_stack: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Welcome,
    ProfileCapture,
    Questioning,
    Complete,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Welcome => "welcome",
            Stage::ProfileCapture => "profile_capture",
            Stage::Questioning => "questioning",
            Stage::Complete => "complete",
        };
        f.write_str(s)
    }
}

/// One candidate's interview attempt.
///
/// `responses`, `feedbacks` and `scores` run parallel to `questions` and always
/// have exactly `current_question_index` elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewSession {
    pub profile: Option<CandidateProfile>,
    pub questions: Vec<String>,
    pub responses: Vec<String>,
    pub feedbacks: Vec<String>,
    pub scores: Vec<u32>,
    pub stage: Stage,
    pub current_question_index: usize,
    pub persisted: bool,
}

impl InterviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The question awaiting an answer, if the session is mid-interview.
    pub fn current_question(&self) -> Option<&str> {
        if self.stage != Stage::Questioning {
            return None;
        }
        self.questions
            .get(self.current_question_index)
            .map(String::as_str)
    }

    /// True once every available question (capped at five) has an answer.
    pub fn questions_exhausted(&self) -> bool {
        self.current_question_index >= QUESTIONS_PER_INTERVIEW
            || self.current_question_index >= self.questions.len()
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.current_question_index)
    }

    /// Checks the parallel-vector and bound invariants.
    pub fn invariants_hold(&self) -> bool {
        let idx = self.current_question_index;
        self.responses.len() == idx
            && self.feedbacks.len() == idx
            && self.scores.len() == idx
            && idx <= self.questions.len()
            && self.questions.len() <= QUESTIONS_PER_INTERVIEW
    }
}

/// Progress signal shown alongside each question.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub fraction: f32,
}

impl Progress {
    pub fn new(completed: usize) -> Self {
        Self {
            completed,
            total: QUESTIONS_PER_INTERVIEW,
            fraction: completed as f32 / QUESTIONS_PER_INTERVIEW as f32,
        }
    }
}
