use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::effects::Effects;
use crate::quiz::bank::QuestionBank;
use crate::quiz::engine::{Completion, QuizTimings};
use crate::quiz::{
    evaluate, Emotion, OptionState, QuizPhase, QuizSession, QuizTimer, ResultOutcome, SessionId,
};
use crate::timer::{Scheduler, TimerHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Page {
    Intro,
    Quiz,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTimer {
    Quiz(QuizTimer),
    ConfettiStop,
    ConfettiClear,
}

impl From<QuizTimer> for SessionTimer {
    fn from(timer: QuizTimer) -> Self {
        SessionTimer::Quiz(timer)
    }
}

/// Callbacks into the shell hosting the quiz.
pub trait SessionObserver {
    fn on_start(&mut self) {}
    fn on_complete(&mut self, _score: u32, _total: u32) {}
    fn on_restart(&mut self) {}
}

impl SessionObserver for () {}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct QuestionView {
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<(String, OptionState)>,
    pub lives: u32,
    pub score: u32,
    pub emotion: Emotion,
    pub mascot_asset: String,
}

/// What the shell should currently draw.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum Snapshot {
    Intro,
    Question(QuestionView),
    LastChance { mascot_asset: String },
    Result(ResultOutcome),
}

/// Top level of the app: intro, quiz and result pages, the timers that
/// move between them and the decorative effects.
pub struct SessionController<O: SessionObserver = ()> {
    config: Config,
    bank: QuestionBank,
    page: Page,
    quiz: Option<QuizSession>,
    result: Option<ResultOutcome>,
    timers: Scheduler<SessionTimer>,
    confetti_timers: Vec<TimerHandle>,
    effects: Effects,
    rng: StdRng,
    last_session: SessionId,
    observer: O,
}

impl<O: SessionObserver> SessionController<O> {
    pub fn new(config: Config, bank: QuestionBank, observer: O) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let effects = Effects::new(&config, &mut rng);
        Self {
            config,
            bank,
            page: Page::Intro,
            quiz: None,
            result: None,
            timers: Scheduler::new(),
            confetti_timers: Vec::new(),
            effects,
            rng,
            last_session: 0,
            observer,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn quiz(&self) -> Option<&QuizSession> {
        self.quiz.as_ref()
    }

    pub fn result(&self) -> Option<&ResultOutcome> {
        self.result.as_ref()
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Intro -> Quiz with a freshly shuffled session.
    pub fn start_quiz(&mut self) -> bool {
        if self.page != Page::Intro {
            debug!("start ignored on {:?}", self.page);
            return false;
        }
        self.last_session += 1;
        let session = QuizSession::new(
            self.last_session,
            self.bank.questions(),
            QuizTimings::from(&self.config),
            &mut self.rng,
        );
        self.quiz = Some(session);
        self.result = None;
        self.page = Page::Quiz;
        self.effects.page_changed();
        self.effects.reveal_question();
        info!("Quiz started");
        self.observer.on_start();
        true
    }

    pub fn submit_answer(&mut self, selected: usize) -> Option<bool> {
        if self.page != Page::Quiz {
            debug!("answer ignored on {:?}", self.page);
            return None;
        }
        self.quiz.as_mut()?.submit_answer(selected, &mut self.timers)
    }

    /// Back to the intro, dropping the session and everything it scheduled.
    pub fn restart(&mut self) -> bool {
        if self.page == Page::Intro {
            return false;
        }
        if let Some(mut quiz) = self.quiz.take() {
            quiz.cancel_timers(&mut self.timers);
        }
        for handle in self.confetti_timers.drain(..) {
            self.timers.cancel(handle);
        }
        self.effects.clear_confetti();
        self.result = None;
        self.page = Page::Intro;
        self.effects.page_changed();
        info!("Restarted");
        self.observer.on_restart();
        true
    }

    /// Moves the clock forward, firing due timers in order. The effects are
    /// ticked up to each deadline before its timer fires, so anything a timer
    /// spawns only ages from that moment on.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timers.now() + elapsed;
        let mut ticked = self.timers.now();
        while let Some(timer) = self.timers.pop_due(until) {
            let now = self.timers.now();
            self.effects.tick(now - ticked);
            ticked = now;
            self.dispatch(timer);
        }
        self.timers.settle(until);
        self.effects.tick(until - ticked);
    }

    pub fn snapshot(&self) -> Snapshot {
        match self.page {
            Page::Intro => Snapshot::Intro,
            Page::Result => match &self.result {
                Some(result) => Snapshot::Result(result.clone()),
                None => Snapshot::Intro,
            },
            Page::Quiz => {
                let Some(quiz) = &self.quiz else {
                    return Snapshot::Intro;
                };
                if quiz.phase() == QuizPhase::LastChanceWarning {
                    return Snapshot::LastChance {
                        mascot_asset: quiz.mascot().asset_path(),
                    };
                }
                let Some(question) = quiz.current_question() else {
                    return Snapshot::Intro;
                };
                let options = question
                    .shuffled_options
                    .iter()
                    .cloned()
                    .zip(quiz.option_states())
                    .collect();
                Snapshot::Question(QuestionView {
                    number: quiz.current_index() + 1,
                    total: quiz.questions().len(),
                    prompt: question.question.prompt.clone(),
                    options,
                    lives: quiz.lives(),
                    score: quiz.score(),
                    emotion: quiz.mascot().emotion,
                    mascot_asset: quiz.mascot().asset_path(),
                })
            }
        }
    }

    fn dispatch(&mut self, timer: SessionTimer) {
        debug!("timer {:?} at {:?}", timer, self.timers.now());
        match timer {
            SessionTimer::Quiz(timer) => {
                let Some(quiz) = self.quiz.as_mut() else {
                    debug!("no quiz running for {:?}", timer);
                    return;
                };
                let before = quiz.current_index();
                let completion = quiz.on_timer(timer, &mut self.timers);
                let moved_on = quiz.current_index() != before;

                if let Some(completion) = completion {
                    self.on_quiz_complete(completion);
                } else if moved_on {
                    self.effects.reveal_question();
                }
            }
            SessionTimer::ConfettiStop => {
                self.effects.stop_confetti_stream();
            }
            SessionTimer::ConfettiClear => {
                self.effects.clear_confetti();
                self.confetti_timers.clear();
            }
        }
    }

    fn on_quiz_complete(&mut self, completion: Completion) {
        let outcome = evaluate(completion.score, completion.total);
        info!("Result: {}% ({:?})", outcome.percentage, outcome.narrative);
        self.result = Some(outcome);
        self.page = Page::Result;
        self.effects.page_changed();
        self.effects.celebrate();

        let stop = self.timers.schedule(self.config.confetti, SessionTimer::ConfettiStop);
        let clear = self.timers.schedule(
            self.config.confetti + self.config.confetti_linger,
            SessionTimer::ConfettiClear,
        );
        self.confetti_timers = vec![stop, clear];

        self.observer.on_complete(completion.score, completion.total);
    }
}
