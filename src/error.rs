use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The buffer ended before `field`, which starts at `offset`, could be read.
    #[error("pool state truncated at offset {offset} ({field}): need {needed} bytes, got {available}")]
    Truncated {
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The struct and the schema table disagree; not caused by account contents.
    #[error("pool state layout mismatch: {0}")]
    Layout(String),
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("invalid pool address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("invalid update frequency: {0}")]
    InvalidUpdateFrequency(String),

    #[error("failed to get account info: {0}")]
    Fetch(String),

    #[error("account {0} not found")]
    AccountNotFound(Pubkey),

    #[error("failed to deserialize pool state: {0}")]
    Decode(#[from] DecodeError),
}

impl FeedError {
    /// Configuration errors are fatal; everything else may succeed on the next tick.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FeedError::Fetch(_)
                | FeedError::AccountNotFound(_)
                | FeedError::Decode(DecodeError::Truncated { .. })
        )
    }
}
