use crate::quiz::{Emotion, Mascot};

/// Correct answers needed for the strong result.
pub const PASS_MARK: u32 = 10;

const CLOSING_MESSAGE: &str = "Happy Birthday, Beautiful! May your special day be filled with endless joy, and all the love your heart can hold! You're absolutely wonderful just the way you are!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Narrative {
    Strong,
    Encouraging,
}

impl Narrative {
    pub fn headline(self) -> &'static str {
        match self {
            Narrative::Strong => "You're like a self-awareness goddess!",
            Narrative::Encouraging => {
                "you're discovering your own constellation, one star at a time ✨"
            }
        }
    }

    pub fn emotion(self) -> Emotion {
        match self {
            Narrative::Strong => Emotion::Victory,
            Narrative::Encouraging => Emotion::GameOver,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ResultOutcome {
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
    pub narrative: Narrative,
    pub mascot: Mascot,
    pub headline: &'static str,
    pub message: &'static str,
}

impl ResultOutcome {
    pub fn mascot_asset(&self) -> String {
        self.mascot.asset_path()
    }
}

pub fn evaluate(score: u32, total: u32) -> ResultOutcome {
    let narrative = if score >= PASS_MARK {
        Narrative::Strong
    } else {
        Narrative::Encouraging
    };

    ResultOutcome {
        score,
        total,
        percentage: percentage(score, total),
        narrative,
        mascot: Mascot::new(narrative.emotion()),
        headline: narrative.headline(),
        message: CLOSING_MESSAGE,
    }
}

// round(100 * score / total), halves round up
fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let score = u64::from(score.min(total));
    let total = u64::from(total);
    ((200 * score + total) / (2 * total)) as u32
}
