//! Error types for probe design and export

/// Everything that can go wrong between reading the form and writing a file.
#[derive(Debug, thiserror::Error)]
pub enum DesignError {
    #[error("Invalid numerical value for {field}: '{value}'")]
    Validation { field: &'static str, value: String },
    #[error("Probe length must be greater than zero")]
    ZeroProbeLength,
    #[error("Overlap ({overlap}) must be smaller than the probe length ({probe_length})")]
    InvalidOverlap { overlap: usize, probe_length: usize },
    #[error("Invalid melting temperature conditions: {0}")]
    InvalidConditions(String),
    #[error("Please enter a DNA sequence.")]
    EmptyInput,
    #[error("No probes generated.")]
    EmptyResult,
    #[error("Invalid FASTA input: {0}")]
    Fasta(String),
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize: {0}")]
    Json(#[from] serde_json::Error),
}

impl DesignError {
    /// True for errors caused by bad numeric parameters or conditions.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::ZeroProbeLength
                | Self::InvalidOverlap { .. }
                | Self::InvalidConditions(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DesignError>;
