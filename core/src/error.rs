use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid transition in {action}: {reason}")]
    InvalidTransition { action: &'static str, reason: String },

    #[error("Event {id} not found in the catalog")]
    UnknownEvent { id: u32 },

    #[error("Question {id} not found in the quiz bank")]
    UnknownQuestion { id: u32 },

    #[error("Option index {index} out of range for event {event_id}")]
    UnknownOption { event_id: u32, index: usize },

    #[error("Engine not hydrated — call hydrate() first")]
    NotReady,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
