use thiserror::Error;

/// Problems with the embedded question bank. All of them are caught at startup.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("unable to parse the question bank: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("the question bank is empty")]
    Empty,

    #[error("question {id} has {count} option(s), at least 2 are required")]
    TooFewOptions { id: u32, count: usize },

    #[error("question {id} marks option {index} as correct but only has {count} options")]
    CorrectIndexOutOfRange { id: u32, index: usize, count: usize },

    #[error("question {id} lists the option {text:?} more than once")]
    DuplicateOption { id: u32, text: String },

    #[error("question id {id} is used more than once")]
    DuplicateId { id: u32 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
