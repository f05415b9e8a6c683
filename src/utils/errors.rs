use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BxError {
    // File and I/O errors
    #[error("File read error: {0}")]
    FileReadError(String),
    #[error("File write error: {0}")]
    FileWriteError(String),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    // Input-boundary errors (front-end interchange documents)
    #[error("Malformed input at {location}: {message}")]
    InputError { location: String, message: String },
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // Lowering errors
    #[error("Internal error: unbound variable '{name}' during lowering")]
    UnboundVariable { name: String },

    // TAC consistency errors
    #[error("Internal error: no emission routine for opcode '{opcode}'")]
    UnknownOpcode { opcode: String },
    #[error("Internal error: malformed '{opcode}' instruction: {message}")]
    MalformedInstruction { opcode: String, message: String },
    #[error("Internal error: temporary {temp} used before definition in {procedure}")]
    UndefinedTemporary { temp: String, procedure: String },
    #[error("Internal error: temporaries of {procedure} are not dense: {message}")]
    SparseTemporaries { procedure: String, message: String },

    // Backend selection
    #[error("Unknown target '{name}' (available: {available})")]
    UnknownTarget { name: String, available: String },

    // Compilation pipeline errors
    #[error("Compilation error in {stage}: {message}")]
    CompilationError { stage: String, message: String },
}

impl BxError {
    /// Create an input error for a JSON document location
    pub fn input_error(location: impl Into<String>, message: impl Into<String>) -> Self {
        BxError::InputError {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create an error for an instruction whose operands do not fit its opcode
    pub fn malformed(opcode: impl Into<String>, message: impl Into<String>) -> Self {
        BxError::MalformedInstruction {
            opcode: opcode.into(),
            message: message.into(),
        }
    }

    /// Create a compilation error for a specific stage
    pub fn compilation_error(stage: impl Into<String>, message: impl Into<String>) -> Self {
        BxError::CompilationError {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Contract violations between components. These are never expected in a
    /// correctly wired pipeline and are never recovered from.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            BxError::UnboundVariable { .. }
                | BxError::UnknownOpcode { .. }
                | BxError::MalformedInstruction { .. }
                | BxError::UndefinedTemporary { .. }
                | BxError::SparseTemporaries { .. }
                | BxError::UnknownTarget { .. }
        )
    }
}

// Type alias for Result with BxError
pub type BxResult<T> = Result<T, BxError>;
