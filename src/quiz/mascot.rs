const STICKER_DIR: &str = "/img/chibi-stcikers";
const POSE_DIR: &str = "/img/questions-poses";

pub const DEFAULT_STICKER: &str = "talking-peace-sign.png";
pub const DEFAULT_CELEBRATION: &str = "celebrating-excited.png";

/// The mood the chibi mascot is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Emotion {
    #[default]
    Neutral,
    Happy,
    Sad,
    Celebration,
    Question,
    Wrong1,
    Wrong2,
    Wrong3,
    LastChance,
    GameOver,
    Victory,
}

impl Emotion {
    /// Sticker shown for this emotion when nothing overrides it.
    pub fn sticker(self) -> &'static str {
        match self {
            Emotion::Neutral | Emotion::Question => DEFAULT_STICKER,
            Emotion::Happy => "starry-eyed-excited-with-wide-smile.png",
            Emotion::Sad | Emotion::LastChance => "worried-sad.png",
            Emotion::Celebration | Emotion::Victory => DEFAULT_CELEBRATION,
            Emotion::Wrong1 => "worried-expression.png",
            Emotion::Wrong2 => "puppy-eyes.png",
            Emotion::Wrong3 | Emotion::GameOver => "angry-crying.png",
        }
    }

    /// Cue for the n-th wrong answer of a session (1-based).
    pub fn for_wrong_streak(streak: u32) -> Self {
        match streak {
            0 | 1 => Emotion::Wrong1,
            2 => Emotion::Wrong2,
            _ => Emotion::Wrong3,
        }
    }
}

/// An emotion plus an optional explicit sticker.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Mascot {
    pub emotion: Emotion,
    pub custom: Option<String>,
}

impl Mascot {
    pub fn new(emotion: Emotion) -> Self {
        Self {
            emotion,
            custom: None,
        }
    }

    pub fn with_custom(emotion: Emotion, custom: Option<&str>) -> Self {
        Self {
            emotion,
            custom: custom.map(str::to_string),
        }
    }

    /// Resolves the image to display. Never fails: a blank override falls
    /// back to the emotion's own sticker.
    pub fn asset_path(&self) -> String {
        match self.custom.as_deref().map(str::trim) {
            Some(custom) if !custom.is_empty() => {
                if is_numbered_pose(custom) {
                    format!("{}/{}", POSE_DIR, custom)
                } else {
                    format!("{}/{}", STICKER_DIR, custom)
                }
            }
            _ => format!("{}/{}", STICKER_DIR, self.emotion.sticker()),
        }
    }
}

// Question poses are named like "36.png"
fn is_numbered_pose(name: &str) -> bool {
    match name.strip_suffix(".png") {
        Some(stem) => !stem.is_empty() && stem.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emotions_resolve_to_their_sticker() {
        assert_eq!(
            Mascot::new(Emotion::Wrong2).asset_path(),
            "/img/chibi-stcikers/puppy-eyes.png"
        );
        assert_eq!(
            Mascot::new(Emotion::Victory).asset_path(),
            "/img/chibi-stcikers/celebrating-excited.png"
        );
    }

    #[test]
    fn numbered_overrides_are_question_poses() {
        let mascot = Mascot::with_custom(Emotion::Question, Some("36.png"));
        assert_eq!(mascot.asset_path(), "/img/questions-poses/36.png");

        let mascot = Mascot::with_custom(Emotion::Celebration, Some("heart-hands.png"));
        assert_eq!(mascot.asset_path(), "/img/chibi-stcikers/heart-hands.png");

        assert!(!is_numbered_pose(".png"));
        assert!(!is_numbered_pose("36.jpg"));
    }

    #[test]
    fn blank_override_falls_back() {
        let mascot = Mascot::with_custom(Emotion::LastChance, Some("  "));
        assert_eq!(mascot.asset_path(), "/img/chibi-stcikers/worried-sad.png");
    }

    #[test]
    fn wrong_streak_cues() {
        assert_eq!(Emotion::for_wrong_streak(1), Emotion::Wrong1);
        assert_eq!(Emotion::for_wrong_streak(2), Emotion::Wrong2);
        assert_eq!(Emotion::for_wrong_streak(3), Emotion::Wrong3);
        assert_eq!(Emotion::for_wrong_streak(7), Emotion::Wrong3);
    }
}
