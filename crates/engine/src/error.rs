//! Error types for host runtime operations

/// Error type for calls into the host runtime
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    /// No host runtime has been installed yet
    #[error("Host runtime not installed")]
    NotInstalled,

    /// A host runtime was already installed for this process
    #[error("Host runtime already installed")]
    AlreadyInstalled,

    /// The host has no native with this name
    #[error("Unknown native: {0}")]
    UnknownNative(String),

    /// The host native raised an error
    #[error("Native {name} failed: {reason}")]
    NativeFailed { name: String, reason: String },

    /// A string could not be passed to the host (interior NUL)
    #[error("Invalid string for host: {0}")]
    InvalidString(String),

    /// The host refused the call
    #[error("Host rejected {operation} for '{name}'")]
    Rejected {
        operation: &'static str,
        name: String,
    },

    /// The host does not provide this operation
    #[error("Host does not support {0}")]
    Unsupported(&'static str),
}
