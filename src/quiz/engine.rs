use std::time::Duration;

use log::{debug, info, warn};
use rand::Rng;

use crate::config::Config;
use crate::quiz::mascot::{DEFAULT_CELEBRATION, DEFAULT_STICKER};
use crate::quiz::shuffle::shuffle_all;
use crate::quiz::{Emotion, Mascot, Question, ShuffledQuestion};
use crate::timer::{Scheduler, TimerHandle};

pub const STARTING_LIVES: u32 = 3;

pub type SessionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum QuizPhase {
    AwaitingAnswer,
    ShowingFeedback,
    LastChanceWarning,
    Completed,
}

/// How an answer button should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum OptionState {
    /// No answer chosen yet, the option is clickable.
    Idle,
    Success,
    Failure,
    Neutral,
}

/// Timer events a quiz session schedules. Each carries the id of the
/// session that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizTimer {
    FeedbackDwell { session: SessionId },
    LastChance { session: SessionId },
}

impl QuizTimer {
    pub fn session(&self) -> SessionId {
        match *self {
            QuizTimer::FeedbackDwell { session } | QuizTimer::LastChance { session } => session,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub score: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizTimings {
    pub feedback_dwell: Duration,
    pub last_chance: Duration,
}

impl From<&Config> for QuizTimings {
    fn from(config: &Config) -> Self {
        Self {
            feedback_dwell: config.feedback_dwell,
            last_chance: config.last_chance,
        }
    }
}

impl Default for QuizTimings {
    fn default() -> Self {
        QuizTimings::from(&Config::default())
    }
}

/// One play-through of the question list.
///
/// The session is only mutated by [`QuizSession::submit_answer`] and by the
/// timer events that call schedules. It owns the handle of its single pending
/// timer so a host can cancel it when the session is thrown away.
#[derive(Debug)]
pub struct QuizSession {
    id: SessionId,
    questions: Vec<ShuffledQuestion>,
    current: usize,
    score: u32,
    lives: u32,
    wrong_streak: u32,
    phase: QuizPhase,
    mascot: Mascot,
    selected: Option<usize>,
    last_chance_shown: bool,
    warning_due: bool,
    pending: Option<TimerHandle>,
    timings: QuizTimings,
}

impl QuizSession {
    pub fn new<R: Rng + ?Sized>(
        id: SessionId,
        questions: &[Question],
        timings: QuizTimings,
        rng: &mut R,
    ) -> Self {
        let questions = shuffle_all(questions, rng);
        let mut session = Self {
            id,
            questions,
            current: 0,
            score: 0,
            lives: STARTING_LIVES,
            wrong_streak: 0,
            phase: QuizPhase::AwaitingAnswer,
            mascot: Mascot::default(),
            selected: None,
            last_chance_shown: false,
            warning_due: false,
            pending: None,
            timings,
        };
        if session.questions.is_empty() {
            session.phase = QuizPhase::Completed;
        } else {
            session.pose_for_current();
        }
        info!(
            "Quiz session {} started with {} questions",
            id,
            session.questions.len()
        );
        session
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn wrong_streak(&self) -> u32 {
        self.wrong_streak
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.questions.len() as u32
    }

    pub fn questions(&self) -> &[ShuffledQuestion] {
        &self.questions
    }

    pub fn current_question(&self) -> Option<&ShuffledQuestion> {
        self.questions.get(self.current)
    }

    pub fn mascot(&self) -> &Mascot {
        &self.mascot
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.pending
    }

    pub fn option_states(&self) -> Vec<OptionState> {
        let Some(question) = self.current_question() else {
            return Vec::new();
        };
        (0..question.option_count())
            .map(|index| match self.selected {
                None => OptionState::Idle,
                Some(_) if question.is_correct(index) => OptionState::Success,
                Some(selected) if selected == index => OptionState::Failure,
                Some(_) => OptionState::Neutral,
            })
            .collect()
    }

    /// Accepts one answer for the current question.
    ///
    /// Returns whether the answer was correct, or `None` if it was ignored
    /// (wrong phase or an index the question doesn't have).
    pub fn submit_answer<E: From<QuizTimer>>(
        &mut self,
        selected: usize,
        timers: &mut Scheduler<E>,
    ) -> Option<bool> {
        if self.phase != QuizPhase::AwaitingAnswer {
            debug!(
                "Session {}: answer {} ignored in {:?}",
                self.id, selected, self.phase
            );
            return None;
        }
        let question = self.current_question()?;
        if selected >= question.option_count() {
            warn!(
                "Session {}: option {} does not exist on question {}",
                self.id,
                selected,
                question.question.id
            );
            return None;
        }

        let correct = question.is_correct(selected);
        let celebration = question.question.celebration_asset.clone();

        if correct {
            self.score += 1;
            self.mascot = Mascot::with_custom(
                Emotion::Celebration,
                Some(celebration.as_deref().unwrap_or(DEFAULT_CELEBRATION)),
            );
        } else {
            self.lives = self.lives.saturating_sub(1);
            self.wrong_streak += 1;
            self.mascot = Mascot::new(Emotion::for_wrong_streak(self.wrong_streak));

            if self.lives == 1 && !self.last_chance_shown {
                self.last_chance_shown = true;
                self.warning_due = true;
                // the banner and its sticker show up together
                self.mascot = Mascot::new(Emotion::LastChance);
            }
        }
        self.selected = Some(selected);
        self.phase = QuizPhase::ShowingFeedback;

        info!(
            "Session {}: question {} answered {} (score {}, lives {})",
            self.id,
            self.current + 1,
            if correct { "correctly" } else { "wrong" },
            self.score,
            self.lives
        );

        // state is committed, only now hand the dwell to the scheduler
        self.pending = Some(timers.schedule(
            self.timings.feedback_dwell,
            QuizTimer::FeedbackDwell { session: self.id }.into(),
        ));
        Some(correct)
    }

    /// Handles a timer this session scheduled. Returns the final tally when
    /// the session completes, which happens at most once.
    pub fn on_timer<E: From<QuizTimer>>(
        &mut self,
        timer: QuizTimer,
        timers: &mut Scheduler<E>,
    ) -> Option<Completion> {
        if timer.session() != self.id {
            debug!("Session {}: dropping stale timer {:?}", self.id, timer);
            return None;
        }

        match (timer, self.phase) {
            (QuizTimer::FeedbackDwell { .. }, QuizPhase::ShowingFeedback) => {
                self.pending = None;
                if self.warning_due {
                    self.warning_due = false;
                    self.phase = QuizPhase::LastChanceWarning;
                    info!("Session {}: last chance!", self.id);
                    self.pending = Some(timers.schedule(
                        self.timings.last_chance,
                        QuizTimer::LastChance { session: self.id }.into(),
                    ));
                    return None;
                }
                self.advance_or_finish()
            }
            (QuizTimer::LastChance { .. }, QuizPhase::LastChanceWarning) => {
                self.pending = None;
                self.advance_or_finish()
            }
            (timer, phase) => {
                debug!(
                    "Session {}: timer {:?} does not apply in {:?}",
                    self.id, timer, phase
                );
                None
            }
        }
    }

    /// Removes this session's pending timer from the scheduler.
    pub fn cancel_timers<E>(&mut self, timers: &mut Scheduler<E>) {
        if let Some(handle) = self.pending.take() {
            if timers.cancel(handle) {
                debug!("Session {}: cancelled pending timer", self.id);
            }
        }
    }

    fn advance_or_finish(&mut self) -> Option<Completion> {
        let has_next = self.current + 1 < self.questions.len();
        if has_next && self.lives > 0 {
            self.current += 1;
            self.selected = None;
            self.phase = QuizPhase::AwaitingAnswer;
            self.pose_for_current();
            debug!(
                "Session {}: moving on to question {}",
                self.id,
                self.current + 1
            );
            None
        } else {
            self.finish()
        }
    }

    /// The only way into `Completed`.
    fn finish(&mut self) -> Option<Completion> {
        if self.phase == QuizPhase::Completed {
            return None;
        }
        self.phase = QuizPhase::Completed;
        let completion = Completion {
            score: self.score,
            total: self.total(),
        };
        info!(
            "Session {} completed: {}/{} with {} lives left",
            self.id, completion.score, completion.total, self.lives
        );
        Some(completion)
    }

    fn pose_for_current(&mut self) {
        let pose = self
            .current_question()
            .and_then(|q| q.question.pose_preset.clone());
        self.mascot = Mascot::with_custom(
            Emotion::Question,
            Some(pose.as_deref().unwrap_or(DEFAULT_STICKER)),
        );
    }
}
