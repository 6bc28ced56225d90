//! A small kawaii personality quiz: intro, twelve questions with three lives,
//! and a result page, decorated with confetti, petals and sparkles.
//!
//! The core is synchronous and runs on one thread. A host advances it with
//! [`SessionController::advance`] and feeds it answers; every delay is a
//! timer on the controller's logical clock.

pub mod config;
pub mod effects;
pub mod error;
pub mod quiz;
pub mod session;
pub mod timer;

pub use config::Config;
pub use error::{BankError, ConfigError};
pub use quiz::bank::QuestionBank;
pub use session::{Page, SessionController, SessionObserver, Snapshot};
