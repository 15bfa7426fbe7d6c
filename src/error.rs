use thiserror::Error;

/// Error produced by an injected collaborator (pair potential or geometry).
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum McError {
    #[error("Particle index {index} out of range for {len} particles")]
    ParticleIndexOutOfRange { index: usize, len: usize },

    #[error("Pair potential failed at r^2 = {r2}")]
    Potential {
        r2: f64,
        #[source]
        source: CollaboratorError,
    },

    #[error("Minimum-image distance failed between particles {i} and {j}")]
    Geometry {
        i: usize,
        j: usize,
        #[source]
        source: CollaboratorError,
    },

    #[error("Inverse temperature must be positive and finite, got {beta}")]
    InvalidBeta { beta: f64 },

    #[error("Cannot compute acceptance rate from zero trials")]
    ZeroTrials,

    #[error("Invalid configuration: {0}")]
    Config(String),
}
