//! Resolution failure types.
//!
//! A failure records what was requested and what was available when variant
//! or artifact selection could not produce a result. Describers turn these
//! into diagnostics; see [`crate::resolution::registry`].

use std::fmt;

use crate::attributes::AttributeSet;

/// Discriminant of a [`ResolutionFailure`], used as the registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResolutionFailureKind {
    AmbiguousVariants,
    NoCompatibleVariants,
    NoCompatibleArtifact,
    IncompatibleMultipleNodes,
    AmbiguousArtifactTransforms,
    ConfigurationNotCompatible,
    ConfigurationDoesNotExist,
    NoVariantsWithMatchingCapabilities,
    UnknownArtifactSelection,
}

impl ResolutionFailureKind {
    pub const ALL: [ResolutionFailureKind; 9] = [
        ResolutionFailureKind::AmbiguousVariants,
        ResolutionFailureKind::NoCompatibleVariants,
        ResolutionFailureKind::NoCompatibleArtifact,
        ResolutionFailureKind::IncompatibleMultipleNodes,
        ResolutionFailureKind::AmbiguousArtifactTransforms,
        ResolutionFailureKind::ConfigurationNotCompatible,
        ResolutionFailureKind::ConfigurationDoesNotExist,
        ResolutionFailureKind::NoVariantsWithMatchingCapabilities,
        ResolutionFailureKind::UnknownArtifactSelection,
    ];
}

impl fmt::Display for ResolutionFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolutionFailureKind::AmbiguousVariants => "ambiguous variants",
            ResolutionFailureKind::NoCompatibleVariants => "no compatible variants",
            ResolutionFailureKind::NoCompatibleArtifact => "no compatible artifact",
            ResolutionFailureKind::IncompatibleMultipleNodes => "incompatible multiple nodes",
            ResolutionFailureKind::AmbiguousArtifactTransforms => "ambiguous artifact transforms",
            ResolutionFailureKind::ConfigurationNotCompatible => "configuration not compatible",
            ResolutionFailureKind::ConfigurationDoesNotExist => "configuration does not exist",
            ResolutionFailureKind::NoVariantsWithMatchingCapabilities => {
                "no variants with matching capabilities"
            }
            ResolutionFailureKind::UnknownArtifactSelection => "unknown artifact selection",
        };
        f.write_str(name)
    }
}

/// Where in resolution a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStage {
    /// Choosing a variant of a component in the dependency graph
    GraphVariantSelection,
    /// Choosing an artifact set of an already selected variant
    ArtifactSelection,
}

/// A variant that was considered during selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub attributes: AttributeSet,
    pub capabilities: Vec<String>,
}

impl Candidate {
    pub fn new(name: impl Into<String>, attributes: AttributeSet) -> Self {
        Candidate {
            name: name.into(),
            attributes,
            capabilities: Vec::new(),
        }
    }

    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.push(capability.into());
        self
    }
}

/// A chain of artifact transforms able to produce the requested attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformCandidate {
    /// Variant the chain starts from
    pub source_variant: String,
    /// Transform steps, in application order
    pub steps: Vec<String>,
    /// Attributes of the produced artifacts
    pub result: AttributeSet,
}

/// A terminal failure of variant or artifact selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionFailure {
    /// More than one candidate matched the request equally well.
    AmbiguousVariants {
        stage: ResolutionStage,
        target: String,
        requested: AttributeSet,
        candidates: Vec<Candidate>,
    },
    /// No variant of the component matched the request.
    NoCompatibleVariants {
        target: String,
        requested: AttributeSet,
        candidates: Vec<Candidate>,
    },
    /// The selected variant has no artifact set matching the request.
    NoCompatibleArtifact {
        target: String,
        requested: AttributeSet,
        candidates: Vec<Candidate>,
    },
    /// Several variants of one component were selected but conflict.
    IncompatibleMultipleNodes {
        target: String,
        selected: Vec<Candidate>,
    },
    /// Several transform chains could produce the requested artifacts.
    AmbiguousArtifactTransforms {
        target: String,
        requested: AttributeSet,
        transforms: Vec<TransformCandidate>,
    },
    /// A configuration was selected by name but does not match the request.
    ConfigurationNotCompatible {
        target: String,
        configuration: String,
        requested: AttributeSet,
        configuration_attributes: AttributeSet,
    },
    /// A configuration was selected by name but does not exist.
    ConfigurationDoesNotExist {
        target: String,
        configuration: String,
    },
    /// No variant provides the requested capabilities.
    NoVariantsWithMatchingCapabilities {
        target: String,
        requested_capabilities: Vec<String>,
        candidates: Vec<Candidate>,
    },
    /// Artifact selection failed for a reason outside variant matching.
    UnknownArtifactSelection {
        target: String,
        artifact: String,
        reason: String,
    },
}

impl ResolutionFailure {
    pub fn kind(&self) -> ResolutionFailureKind {
        match self {
            ResolutionFailure::AmbiguousVariants { .. } => ResolutionFailureKind::AmbiguousVariants,
            ResolutionFailure::NoCompatibleVariants { .. } => {
                ResolutionFailureKind::NoCompatibleVariants
            }
            ResolutionFailure::NoCompatibleArtifact { .. } => {
                ResolutionFailureKind::NoCompatibleArtifact
            }
            ResolutionFailure::IncompatibleMultipleNodes { .. } => {
                ResolutionFailureKind::IncompatibleMultipleNodes
            }
            ResolutionFailure::AmbiguousArtifactTransforms { .. } => {
                ResolutionFailureKind::AmbiguousArtifactTransforms
            }
            ResolutionFailure::ConfigurationNotCompatible { .. } => {
                ResolutionFailureKind::ConfigurationNotCompatible
            }
            ResolutionFailure::ConfigurationDoesNotExist { .. } => {
                ResolutionFailureKind::ConfigurationDoesNotExist
            }
            ResolutionFailure::NoVariantsWithMatchingCapabilities { .. } => {
                ResolutionFailureKind::NoVariantsWithMatchingCapabilities
            }
            ResolutionFailure::UnknownArtifactSelection { .. } => {
                ResolutionFailureKind::UnknownArtifactSelection
            }
        }
    }

    /// The component (or configuration owner) being resolved.
    pub fn target(&self) -> &str {
        match self {
            ResolutionFailure::AmbiguousVariants { target, .. }
            | ResolutionFailure::NoCompatibleVariants { target, .. }
            | ResolutionFailure::NoCompatibleArtifact { target, .. }
            | ResolutionFailure::IncompatibleMultipleNodes { target, .. }
            | ResolutionFailure::AmbiguousArtifactTransforms { target, .. }
            | ResolutionFailure::ConfigurationNotCompatible { target, .. }
            | ResolutionFailure::ConfigurationDoesNotExist { target, .. }
            | ResolutionFailure::NoVariantsWithMatchingCapabilities { target, .. }
            | ResolutionFailure::UnknownArtifactSelection { target, .. } => target.as_str(),
        }
    }

    /// The stage a failure happened in. Only ambiguity is reported from both
    /// stages; the rest belong to one.
    pub fn stage(&self) -> ResolutionStage {
        match self {
            ResolutionFailure::AmbiguousVariants { stage, .. } => *stage,
            ResolutionFailure::NoCompatibleArtifact { .. }
            | ResolutionFailure::AmbiguousArtifactTransforms { .. }
            | ResolutionFailure::UnknownArtifactSelection { .. } => {
                ResolutionStage::ArtifactSelection
            }
            ResolutionFailure::NoCompatibleVariants { .. }
            | ResolutionFailure::IncompatibleMultipleNodes { .. }
            | ResolutionFailure::ConfigurationNotCompatible { .. }
            | ResolutionFailure::ConfigurationDoesNotExist { .. }
            | ResolutionFailure::NoVariantsWithMatchingCapabilities { .. } => {
                ResolutionStage::GraphVariantSelection
            }
        }
    }

    /// A one-line summary, used when no describer applies.
    pub fn summary(&self) -> String {
        format!("resolution of `{}` failed: {}", self.target(), self.kind())
    }
}
