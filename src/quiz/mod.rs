pub mod bank;
pub mod engine;
pub mod mascot;
pub mod result;
pub mod shuffle;

pub use engine::{OptionState, QuizPhase, QuizSession, QuizTimer, SessionId};
pub use mascot::{Emotion, Mascot};
pub use result::{evaluate, Narrative, ResultOutcome, PASS_MARK};

/// One entry of the question bank, exactly as it is stored on disk.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_index: usize,
    #[serde(default)]
    pub explanation: String,
    #[serde(rename = "celebrationSticker", default)]
    pub celebration_asset: Option<String>,
    #[serde(rename = "questionPose", default)]
    pub pose_preset: Option<String>,
}

/// A question with its options reordered for one quiz session.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ShuffledQuestion {
    pub question: Question,
    pub shuffled_options: Vec<String>,
    pub shuffled_correct_index: usize,
}

impl ShuffledQuestion {
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.shuffled_correct_index
    }

    pub fn option_count(&self) -> usize {
        self.shuffled_options.len()
    }
}
