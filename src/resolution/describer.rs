//! Describers turning resolution failures into diagnostics.
//!
//! Several describers may handle the same failure kind at different levels
//! of specificity. Callers ask each one in registration order whether it can
//! describe a failure and use the first that can.

use crate::attributes::AttributeSet;
use crate::resolution::failure::{Candidate, ResolutionFailure, ResolutionStage};
use crate::util::config::DEFAULT_MAX_CANDIDATES;
use crate::util::diagnostic::Diagnostic;

/// Explains resolution failures to users.
pub trait ResolutionFailureDescriber: Send + Sync {
    /// Short identifier for logging.
    fn name(&self) -> &'static str;

    /// Whether this describer can explain `failure`.
    fn can_describe(&self, failure: &ResolutionFailure) -> bool;

    /// Describe `failure`. Only meaningful when [`can_describe`] returned
    /// true; otherwise a generic summary is produced.
    ///
    /// [`can_describe`]: ResolutionFailureDescriber::can_describe
    fn describe(&self, failure: &ResolutionFailure) -> Diagnostic;
}

fn generic(failure: &ResolutionFailure) -> Diagnostic {
    Diagnostic::error(failure.summary())
}

/// Render at most `max` candidates, noting how many were left out.
fn candidate_lines(
    candidates: &[Candidate],
    max: usize,
    render: impl Fn(&Candidate) -> String,
) -> Vec<String> {
    let mut lines: Vec<String> = candidates.iter().take(max).map(render).collect();
    if candidates.len() > max {
        lines.push(format!("... and {} more", candidates.len() - max));
    }
    lines
}

fn with_lines(diag: Diagnostic, lines: Vec<String>) -> Diagnostic {
    lines
        .into_iter()
        .fold(diag, |diag, line| diag.with_context(line))
}

/// Requested attributes the offered set declares with a different value.
fn mismatches(requested: &AttributeSet, offered: &AttributeSet) -> Vec<String> {
    requested
        .entries()
        .filter_map(|(key, wanted)| {
            let (_, found) = offered.find_entry(&key.name())?;
            (found != wanted).then(|| {
                format!("`{}` is `{}` but `{}` was requested", key, found, wanted)
            })
        })
        .collect()
}

/// Offered attributes the consumer did not ask about.
fn unrequested(requested: &AttributeSet, offered: &AttributeSet) -> Vec<String> {
    offered
        .entries()
        .filter(|(key, _)| !requested.contains_name(&key.name()))
        .map(|(key, value)| format!("{}={}", key, value))
        .collect()
}

fn render_ambiguous(requested: &AttributeSet, candidate: &Candidate) -> String {
    let extra = unrequested(requested, &candidate.attributes);
    if extra.is_empty() {
        format!("`{}` {}", candidate.name, candidate.attributes)
    } else {
        format!(
            "`{}` {} (not requested: {})",
            candidate.name,
            candidate.attributes,
            extra.join(", ")
        )
    }
}

fn render_incompatible(requested: &AttributeSet, candidate: &Candidate) -> String {
    let reasons = mismatches(requested, &candidate.attributes);
    if reasons.is_empty() {
        format!("`{}` {}", candidate.name, candidate.attributes)
    } else {
        format!("`{}` is incompatible: {}", candidate.name, reasons.join("; "))
    }
}

/// The first attribute, in candidate order, that the consumer did not
/// request although every candidate declares it with at least two distinct
/// values between them.
pub fn distinguishing_attribute(
    requested: &AttributeSet,
    candidates: &[Candidate],
) -> Option<String> {
    if candidates.len() < 2 {
        return None;
    }

    candidates
        .iter()
        .flat_map(|c| c.attributes.keys())
        .map(|key| key.name())
        .filter(|name| !requested.contains_name(name))
        .find(|name| {
            let values: Option<Vec<_>> = candidates
                .iter()
                .map(|c| c.attributes.find_entry(name).map(|(_, v)| v))
                .collect();
            values.is_some_and(|values| values.iter().any(|v| *v != values[0]))
        })
        .map(|name| name.to_string())
}

// =============================================================================
// Graph variant selection
// =============================================================================

/// Ambiguity that a single missing attribute in the request would resolve.
#[derive(Debug, Clone)]
pub struct MissingAttributeAmbiguityDescriber {
    max_candidates: usize,
}

impl MissingAttributeAmbiguityDescriber {
    pub fn new(max_candidates: usize) -> Self {
        MissingAttributeAmbiguityDescriber { max_candidates }
    }
}

impl Default for MissingAttributeAmbiguityDescriber {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CANDIDATES)
    }
}

impl ResolutionFailureDescriber for MissingAttributeAmbiguityDescriber {
    fn name(&self) -> &'static str {
        "missing-attribute-ambiguity"
    }

    fn can_describe(&self, failure: &ResolutionFailure) -> bool {
        match failure {
            ResolutionFailure::AmbiguousVariants {
                stage: ResolutionStage::GraphVariantSelection,
                requested,
                candidates,
                ..
            } => distinguishing_attribute(requested, candidates).is_some(),
            _ => false,
        }
    }

    fn describe(&self, failure: &ResolutionFailure) -> Diagnostic {
        let ResolutionFailure::AmbiguousVariants {
            target,
            requested,
            candidates,
            ..
        } = failure
        else {
            return generic(failure);
        };
        let Some(attribute) = distinguishing_attribute(requested, candidates) else {
            return generic(failure);
        };

        let diag = Diagnostic::error(format!(
            "cannot choose between the available variants of `{}`",
            target
        ))
        .with_context(format!(
            "the consumer did not request a value for `{}`, which differs between the candidates",
            attribute
        ));

        let lines = candidate_lines(candidates, self.max_candidates, |c| {
            match c.attributes.find_entry(&attribute) {
                Some((_, value)) => format!("`{}` declares `{}` = `{}`", c.name, attribute, value),
                None => format!("`{}`", c.name),
            }
        });

        let example = candidates[0]
            .attributes
            .find_entry(&attribute)
            .map(|(_, v)| v.to_string())
            .unwrap_or_default();

        with_lines(diag, lines).with_suggestion(format!(
            "Add `{}` to the requested attributes, e.g. `{}` = `{}`",
            attribute, attribute, example
        ))
    }
}

/// Several graph variants match the request equally well.
#[derive(Debug, Clone)]
pub struct AmbiguousGraphVariantsDescriber {
    max_candidates: usize,
}

impl AmbiguousGraphVariantsDescriber {
    pub fn new(max_candidates: usize) -> Self {
        AmbiguousGraphVariantsDescriber { max_candidates }
    }
}

impl Default for AmbiguousGraphVariantsDescriber {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CANDIDATES)
    }
}

impl ResolutionFailureDescriber for AmbiguousGraphVariantsDescriber {
    fn name(&self) -> &'static str {
        "ambiguous-graph-variants"
    }

    fn can_describe(&self, failure: &ResolutionFailure) -> bool {
        matches!(
            failure,
            ResolutionFailure::AmbiguousVariants {
                stage: ResolutionStage::GraphVariantSelection,
                ..
            }
        )
    }

    fn describe(&self, failure: &ResolutionFailure) -> Diagnostic {
        let ResolutionFailure::AmbiguousVariants {
            target,
            requested,
            candidates,
            ..
        } = failure
        else {
            return generic(failure);
        };

        let diag = Diagnostic::error(format!(
            "cannot choose between the following variants of `{}` for {}",
            target, requested
        ));
        let lines = candidate_lines(candidates, self.max_candidates, |c| {
            render_ambiguous(requested, c)
        });

        with_lines(diag, lines)
            .with_suggestion("Request additional attributes so that only one variant matches")
    }
}

/// No graph variant matches the request.
#[derive(Debug, Clone)]
pub struct IncompatibleGraphVariantsDescriber {
    max_candidates: usize,
}

impl IncompatibleGraphVariantsDescriber {
    pub fn new(max_candidates: usize) -> Self {
        IncompatibleGraphVariantsDescriber { max_candidates }
    }
}

impl Default for IncompatibleGraphVariantsDescriber {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CANDIDATES)
    }
}

impl ResolutionFailureDescriber for IncompatibleGraphVariantsDescriber {
    fn name(&self) -> &'static str {
        "incompatible-graph-variants"
    }

    fn can_describe(&self, failure: &ResolutionFailure) -> bool {
        matches!(failure, ResolutionFailure::NoCompatibleVariants { .. })
    }

    fn describe(&self, failure: &ResolutionFailure) -> Diagnostic {
        let ResolutionFailure::NoCompatibleVariants {
            target,
            requested,
            candidates,
        } = failure
        else {
            return generic(failure);
        };

        let diag = Diagnostic::error(format!(
            "no matching variant of `{}` was found for {}",
            target, requested
        ));
        let diag = if candidates.is_empty() {
            diag.with_context(format!("`{}` declares no variants", target))
        } else {
            let lines = candidate_lines(candidates, self.max_candidates, |c| {
                render_incompatible(requested, c)
            });
            with_lines(diag, lines)
        };

        diag.with_suggestion(format!(
            "Check the requested attributes against the variants published by `{}`",
            target
        ))
    }
}

/// Variants of one component were selected together but disagree.
#[derive(Debug, Clone, Default)]
pub struct InvalidMultipleVariantsDescriber;

impl ResolutionFailureDescriber for InvalidMultipleVariantsDescriber {
    fn name(&self) -> &'static str {
        "invalid-multiple-variants"
    }

    fn can_describe(&self, failure: &ResolutionFailure) -> bool {
        matches!(failure, ResolutionFailure::IncompatibleMultipleNodes { .. })
    }

    fn describe(&self, failure: &ResolutionFailure) -> Diagnostic {
        let ResolutionFailure::IncompatibleMultipleNodes { target, selected } = failure else {
            return generic(failure);
        };

        let mut diag = Diagnostic::error(format!(
            "multiple incompatible variants of `{}` were selected",
            target
        ));
        for node in selected {
            diag = diag.with_context(format!("`{}` {}", node.name, node.attributes));
        }

        let Some(first) = selected.first() else {
            return diag;
        };
        for (key, value) in first.attributes.entries() {
            let differs = selected[1..].iter().any(|other| {
                other
                    .attributes
                    .find_entry(&key.name())
                    .is_some_and(|(_, v)| v != value)
            });
            if differs {
                diag = diag.with_context(format!("they disagree on `{}`", key));
            }
        }

        diag.with_suggestion(format!(
            "Align the attributes requested by every dependency on `{}`",
            target
        ))
    }
}

/// A configuration selected by name whose attributes do not match.
#[derive(Debug, Clone, Default)]
pub struct IncompatibleRequestedConfigurationDescriber;

impl ResolutionFailureDescriber for IncompatibleRequestedConfigurationDescriber {
    fn name(&self) -> &'static str {
        "incompatible-requested-configuration"
    }

    fn can_describe(&self, failure: &ResolutionFailure) -> bool {
        matches!(failure, ResolutionFailure::ConfigurationNotCompatible { .. })
    }

    fn describe(&self, failure: &ResolutionFailure) -> Diagnostic {
        let ResolutionFailure::ConfigurationNotCompatible {
            target,
            configuration,
            requested,
            configuration_attributes,
        } = failure
        else {
            return generic(failure);
        };

        let diag = Diagnostic::error(format!(
            "configuration `{}` of `{}` does not match the requested attributes",
            configuration, target
        ));

        with_lines(diag, mismatches(requested, configuration_attributes)).with_suggestion(
            "Remove the explicit configuration and let attribute matching pick a variant",
        )
    }
}

/// A configuration selected by name that does not exist.
#[derive(Debug, Clone, Default)]
pub struct RequestedConfigurationNotFoundDescriber;

impl ResolutionFailureDescriber for RequestedConfigurationNotFoundDescriber {
    fn name(&self) -> &'static str {
        "requested-configuration-not-found"
    }

    fn can_describe(&self, failure: &ResolutionFailure) -> bool {
        matches!(failure, ResolutionFailure::ConfigurationDoesNotExist { .. })
    }

    fn describe(&self, failure: &ResolutionFailure) -> Diagnostic {
        let ResolutionFailure::ConfigurationDoesNotExist {
            target,
            configuration,
        } = failure
        else {
            return generic(failure);
        };

        Diagnostic::error(format!(
            "`{}` has no configuration named `{}`",
            target, configuration
        ))
        .with_suggestion("Check the spelling of the configuration name")
        .with_suggestion("Select a variant by attributes instead of by configuration name")
    }
}

/// No variant provides the requested capabilities.
#[derive(Debug, Clone)]
pub struct NoMatchingCapabilitiesDescriber {
    max_candidates: usize,
}

impl NoMatchingCapabilitiesDescriber {
    pub fn new(max_candidates: usize) -> Self {
        NoMatchingCapabilitiesDescriber { max_candidates }
    }
}

impl Default for NoMatchingCapabilitiesDescriber {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CANDIDATES)
    }
}

impl ResolutionFailureDescriber for NoMatchingCapabilitiesDescriber {
    fn name(&self) -> &'static str {
        "no-matching-capabilities"
    }

    fn can_describe(&self, failure: &ResolutionFailure) -> bool {
        matches!(failure, ResolutionFailure::NoVariantsWithMatchingCapabilities { .. })
    }

    fn describe(&self, failure: &ResolutionFailure) -> Diagnostic {
        let ResolutionFailure::NoVariantsWithMatchingCapabilities {
            target,
            requested_capabilities,
            candidates,
        } = failure
        else {
            return generic(failure);
        };

        let diag = Diagnostic::error(format!(
            "no variant of `{}` provides the requested capabilities: {}",
            target,
            requested_capabilities.join(", ")
        ));
        let lines = candidate_lines(candidates, self.max_candidates, |c| {
            if c.capabilities.is_empty() {
                format!("`{}` provides no capabilities", c.name)
            } else {
                format!("`{}` provides {}", c.name, c.capabilities.join(", "))
            }
        });

        with_lines(diag, lines)
    }
}

// =============================================================================
// Artifact selection
// =============================================================================

/// Several artifact sets of the selected variant match the request.
#[derive(Debug, Clone)]
pub struct AmbiguousArtifactVariantsDescriber {
    max_candidates: usize,
}

impl AmbiguousArtifactVariantsDescriber {
    pub fn new(max_candidates: usize) -> Self {
        AmbiguousArtifactVariantsDescriber { max_candidates }
    }
}

impl Default for AmbiguousArtifactVariantsDescriber {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CANDIDATES)
    }
}

impl ResolutionFailureDescriber for AmbiguousArtifactVariantsDescriber {
    fn name(&self) -> &'static str {
        "ambiguous-artifact-variants"
    }

    fn can_describe(&self, failure: &ResolutionFailure) -> bool {
        matches!(
            failure,
            ResolutionFailure::AmbiguousVariants {
                stage: ResolutionStage::ArtifactSelection,
                ..
            }
        )
    }

    fn describe(&self, failure: &ResolutionFailure) -> Diagnostic {
        let ResolutionFailure::AmbiguousVariants {
            target,
            requested,
            candidates,
            ..
        } = failure
        else {
            return generic(failure);
        };

        let diag = Diagnostic::error(format!(
            "more than one artifact set of `{}` matches {}",
            target, requested
        ));
        let lines = candidate_lines(candidates, self.max_candidates, |c| {
            render_ambiguous(requested, c)
        });

        with_lines(diag, lines).with_suggestion("Request more specific artifact attributes")
    }
}

/// No artifact set of the selected variant matches the request.
#[derive(Debug, Clone)]
pub struct IncompatibleArtifactVariantsDescriber {
    max_candidates: usize,
}

impl IncompatibleArtifactVariantsDescriber {
    pub fn new(max_candidates: usize) -> Self {
        IncompatibleArtifactVariantsDescriber { max_candidates }
    }
}

impl Default for IncompatibleArtifactVariantsDescriber {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CANDIDATES)
    }
}

impl ResolutionFailureDescriber for IncompatibleArtifactVariantsDescriber {
    fn name(&self) -> &'static str {
        "incompatible-artifact-variants"
    }

    fn can_describe(&self, failure: &ResolutionFailure) -> bool {
        matches!(failure, ResolutionFailure::NoCompatibleArtifact { .. })
    }

    fn describe(&self, failure: &ResolutionFailure) -> Diagnostic {
        let ResolutionFailure::NoCompatibleArtifact {
            target,
            requested,
            candidates,
        } = failure
        else {
            return generic(failure);
        };

        let diag = Diagnostic::error(format!(
            "no artifact set of `{}` matches {}",
            target, requested
        ));
        let lines = candidate_lines(candidates, self.max_candidates, |c| {
            render_incompatible(requested, c)
        });

        with_lines(diag, lines)
            .with_suggestion("Register an artifact transform producing the requested attributes")
    }
}

/// Several transform chains can produce the requested artifacts.
#[derive(Debug, Clone)]
pub struct AmbiguousArtifactTransformDescriber {
    max_candidates: usize,
}

impl AmbiguousArtifactTransformDescriber {
    pub fn new(max_candidates: usize) -> Self {
        AmbiguousArtifactTransformDescriber { max_candidates }
    }
}

impl Default for AmbiguousArtifactTransformDescriber {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CANDIDATES)
    }
}

impl ResolutionFailureDescriber for AmbiguousArtifactTransformDescriber {
    fn name(&self) -> &'static str {
        "ambiguous-artifact-transform"
    }

    fn can_describe(&self, failure: &ResolutionFailure) -> bool {
        matches!(failure, ResolutionFailure::AmbiguousArtifactTransforms { .. })
    }

    fn describe(&self, failure: &ResolutionFailure) -> Diagnostic {
        let ResolutionFailure::AmbiguousArtifactTransforms {
            target,
            requested,
            transforms,
        } = failure
        else {
            return generic(failure);
        };

        let mut diag = Diagnostic::error(format!(
            "found {} transform chains producing {} for `{}`",
            transforms.len(),
            requested,
            target
        ));
        for chain in transforms.iter().take(self.max_candidates) {
            diag = diag.with_context(format!(
                "from `{}`: {} producing {}",
                chain.source_variant,
                chain.steps.join(" -> "),
                chain.result
            ));
        }
        if transforms.len() > self.max_candidates {
            diag = diag.with_context(format!(
                "... and {} more",
                transforms.len() - self.max_candidates
            ));
        }

        diag.with_suggestion("Remove one of the transforms or request more specific attributes")
    }
}

/// Artifact selection failed outside of attribute matching.
#[derive(Debug, Clone, Default)]
pub struct UnknownArtifactSelectionDescriber;

impl ResolutionFailureDescriber for UnknownArtifactSelectionDescriber {
    fn name(&self) -> &'static str {
        "unknown-artifact-selection"
    }

    fn can_describe(&self, failure: &ResolutionFailure) -> bool {
        matches!(failure, ResolutionFailure::UnknownArtifactSelection { .. })
    }

    fn describe(&self, failure: &ResolutionFailure) -> Diagnostic {
        let ResolutionFailure::UnknownArtifactSelection {
            target,
            artifact,
            reason,
        } = failure
        else {
            return generic(failure);
        };

        Diagnostic::error(format!(
            "could not select artifact `{}` of `{}`",
            artifact, target
        ))
        .with_context(reason.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Attribute, AttributesFactory};

    fn usage() -> Attribute {
        Attribute::string("describer-test.usage")
    }

    fn category() -> Attribute {
        Attribute::string("describer-test.category")
    }

    fn ambiguous(factory: &AttributesFactory, stage: ResolutionStage) -> ResolutionFailure {
        let requested = factory.of(usage(), "java-api".into());
        let api = factory.concat_value(&requested, category(), "library".into());
        let platform = factory.concat_value(&requested, category(), "platform".into());

        ResolutionFailure::AmbiguousVariants {
            stage,
            target: "com.example:lib:1.0".to_string(),
            requested,
            candidates: vec![
                Candidate::new("apiElements", api),
                Candidate::new("platformApi", platform),
            ],
        }
    }

    #[test]
    fn test_distinguishing_attribute() {
        let factory = AttributesFactory::new();
        let ResolutionFailure::AmbiguousVariants {
            requested,
            candidates,
            ..
        } = ambiguous(&factory, ResolutionStage::GraphVariantSelection)
        else {
            unreachable!()
        };

        assert_eq!(
            distinguishing_attribute(&requested, &candidates).as_deref(),
            Some("describer-test.category")
        );
        // Once requested, it no longer distinguishes anything.
        let requested = factory.concat_value(&requested, category(), "library".into());
        assert_eq!(distinguishing_attribute(&requested, &candidates), None);
    }

    #[test]
    fn test_attribute_missing_from_one_candidate_does_not_distinguish() {
        let factory = AttributesFactory::new();
        let candidates = vec![
            Candidate::new("a", factory.of(category(), "library".into())),
            Candidate::new("b", factory.of(usage(), "java-api".into())),
        ];
        assert_eq!(distinguishing_attribute(&factory.root(), &candidates), None);
    }

    #[test]
    fn test_missing_attribute_describer() {
        let factory = AttributesFactory::new();
        let failure = ambiguous(&factory, ResolutionStage::GraphVariantSelection);
        let describer = MissingAttributeAmbiguityDescriber::default();

        assert!(describer.can_describe(&failure));
        let output = describer.describe(&failure).format(false);
        assert!(output.contains("did not request a value for `describer-test.category`"));
        assert!(output.contains("`platformApi` declares `describer-test.category` = `platform`"));
        assert!(output.contains("e.g. `describer-test.category` = `library`"));
    }

    #[test]
    fn test_stage_selects_graph_or_artifact_describer() {
        let factory = AttributesFactory::new();
        let graph = ambiguous(&factory, ResolutionStage::GraphVariantSelection);
        let artifact = ambiguous(&factory, ResolutionStage::ArtifactSelection);

        assert!(AmbiguousGraphVariantsDescriber::default().can_describe(&graph));
        assert!(!AmbiguousGraphVariantsDescriber::default().can_describe(&artifact));
        assert!(AmbiguousArtifactVariantsDescriber::default().can_describe(&artifact));
        assert!(!AmbiguousArtifactVariantsDescriber::default().can_describe(&graph));
        assert!(!MissingAttributeAmbiguityDescriber::default().can_describe(&artifact));
    }

    #[test]
    fn test_incompatible_variants_lists_mismatches() {
        let factory = AttributesFactory::new();
        let requested = factory.of(usage(), "java-runtime".into());
        let failure = ResolutionFailure::NoCompatibleVariants {
            target: "lib".to_string(),
            requested,
            candidates: vec![Candidate::new("apiElements", factory.of(usage(), "java-api".into()))],
        };

        let output = IncompatibleGraphVariantsDescriber::default()
            .describe(&failure)
            .format(false);
        assert!(output.contains(
            "`apiElements` is incompatible: `describer-test.usage` is `java-api` but `java-runtime` was requested"
        ));
    }

    #[test]
    fn test_incompatible_variants_without_candidates() {
        let factory = AttributesFactory::new();
        let failure = ResolutionFailure::NoCompatibleVariants {
            target: "lib".to_string(),
            requested: factory.of(usage(), "java-runtime".into()),
            candidates: Vec::new(),
        };

        let diag = IncompatibleGraphVariantsDescriber::default().describe(&failure);
        assert_eq!(diag.context, vec!["`lib` declares no variants".to_string()]);
    }

    #[test]
    fn test_candidate_listing_is_truncated() {
        let factory = AttributesFactory::new();
        let candidates: Vec<_> = (0..5)
            .map(|i| {
                Candidate::new(format!("v{}", i), factory.of(category(), format!("c{}", i).into()))
            })
            .collect();
        let failure = ResolutionFailure::AmbiguousVariants {
            stage: ResolutionStage::ArtifactSelection,
            target: "lib".to_string(),
            requested: factory.root(),
            candidates,
        };

        let diag = AmbiguousArtifactVariantsDescriber::new(2).describe(&failure);
        assert_eq!(diag.context.len(), 3);
        assert_eq!(diag.context[2], "... and 3 more");
    }

    #[test]
    fn test_invalid_multiple_variants_names_conflict() {
        let factory = AttributesFactory::new();
        let failure = ResolutionFailure::IncompatibleMultipleNodes {
            target: "lib".to_string(),
            selected: vec![
                Candidate::new("api", factory.of(category(), "library".into())),
                Candidate::new("platform", factory.of(category(), "platform".into())),
            ],
        };

        let diag = InvalidMultipleVariantsDescriber.describe(&failure);
        assert!(diag
            .context
            .contains(&"they disagree on `describer-test.category`".to_string()));
    }

    #[test]
    fn test_mismatched_failure_gets_generic_summary() {
        let failure = ResolutionFailure::ConfigurationDoesNotExist {
            target: "lib".to_string(),
            configuration: "missing".to_string(),
        };

        let describer = UnknownArtifactSelectionDescriber;
        assert!(!describer.can_describe(&failure));
        assert_eq!(describer.describe(&failure).message, failure.summary());
    }

    #[test]
    fn test_capabilities_listing() {
        let factory = AttributesFactory::new();
        let failure = ResolutionFailure::NoVariantsWithMatchingCapabilities {
            target: "lib".to_string(),
            requested_capabilities: vec!["com.example:lib-test-fixtures".to_string()],
            candidates: vec![
                Candidate::new("apiElements", factory.root()).with_capability("com.example:lib"),
                Candidate::new("bare", factory.root()),
            ],
        };

        let diag = NoMatchingCapabilitiesDescriber::default().describe(&failure);
        assert_eq!(diag.context[0], "`apiElements` provides com.example:lib");
        assert_eq!(diag.context[1], "`bare` provides no capabilities");
    }
}
