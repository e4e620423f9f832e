use peano_wire::{NumeralId, WireError};

/// Errors that can occur while running a protocol.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A rendezvous partner went away.
    #[error("wire error: {0}")]
    Wire(#[from] WireError),

    /// The OS refused to start a process thread.
    #[error("failed to spawn process {name}: {source}")]
    Spawn {
        name: String,
        source: std::io::Error,
    },

    /// A process ended without reporting a result.
    #[error("process {name} panicked")]
    Panicked { name: String },

    /// The minuend ran out before the subtrahend.
    #[error("numeral {numeral} exhausted before the subtrahend")]
    Underflow { numeral: NumeralId },

    /// The difference races stopped in a state no valid input produces.
    #[error("difference races unbalanced: {0}")]
    Unbalanced(String),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
