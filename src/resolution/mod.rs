//! Resolution failures and the describers that explain them.

pub mod describer;
pub mod failure;
pub mod registry;

pub use describer::ResolutionFailureDescriber;
pub use failure::{
    Candidate, ResolutionFailure, ResolutionFailureKind, ResolutionStage, TransformCandidate,
};
pub use registry::FailureDescriberRegistry;
