//! Ordered registry of failure describers.
//!
//! Describers are registered per [`ResolutionFailureKind`] during setup and
//! returned in registration order. Order is the only thing separating a
//! specific describer from a generic one for the same kind, so it is never
//! changed after registration.

use std::collections::HashMap;
use std::sync::Arc;

use crate::resolution::describer::{
    AmbiguousArtifactTransformDescriber, AmbiguousArtifactVariantsDescriber,
    AmbiguousGraphVariantsDescriber, IncompatibleArtifactVariantsDescriber,
    IncompatibleGraphVariantsDescriber, IncompatibleRequestedConfigurationDescriber,
    InvalidMultipleVariantsDescriber, MissingAttributeAmbiguityDescriber,
    NoMatchingCapabilitiesDescriber, RequestedConfigurationNotFoundDescriber,
    ResolutionFailureDescriber, UnknownArtifactSelectionDescriber,
};
use crate::resolution::failure::{ResolutionFailure, ResolutionFailureKind};
use crate::util::config::DiagnosticsConfig;
use crate::util::diagnostic::Diagnostic;

/// Maps failure kinds to the describers that can explain them.
///
/// Built once, then shared read-only between resolution threads.
#[derive(Default)]
pub struct FailureDescriberRegistry {
    describers: HashMap<ResolutionFailureKind, Vec<Arc<dyn ResolutionFailureDescriber>>>,
    color: bool,
}

impl FailureDescriberRegistry {
    /// A registry with no describers.
    pub fn empty() -> Self {
        FailureDescriberRegistry {
            describers: HashMap::new(),
            color: false,
        }
    }

    /// A registry holding the built-in describers for every failure kind.
    pub fn standard() -> Self {
        Self::standard_with_config(&DiagnosticsConfig::default())
    }

    pub fn standard_with_config(config: &DiagnosticsConfig) -> Self {
        use ResolutionFailureKind as Kind;

        let max = config.max_candidates();
        let mut registry = Self::empty().with_color(config.color);

        // Ahead of the generic graph ambiguity describer so the more specific
        // case is tried first.
        registry.register_describer(
            Kind::AmbiguousVariants,
            Arc::new(MissingAttributeAmbiguityDescriber::new(max)),
        );
        registry.register_describer(
            Kind::AmbiguousVariants,
            Arc::new(AmbiguousGraphVariantsDescriber::new(max)),
        );
        registry.register_describer(
            Kind::NoCompatibleVariants,
            Arc::new(IncompatibleGraphVariantsDescriber::new(max)),
        );

        registry.register_describer(
            Kind::AmbiguousVariants,
            Arc::new(AmbiguousArtifactVariantsDescriber::new(max)),
        );
        registry.register_describer(
            Kind::NoCompatibleArtifact,
            Arc::new(IncompatibleArtifactVariantsDescriber::new(max)),
        );
        registry.register_describer(
            Kind::IncompatibleMultipleNodes,
            Arc::new(InvalidMultipleVariantsDescriber),
        );
        registry.register_describer(
            Kind::AmbiguousArtifactTransforms,
            Arc::new(AmbiguousArtifactTransformDescriber::new(max)),
        );

        registry.register_describer(
            Kind::ConfigurationNotCompatible,
            Arc::new(IncompatibleRequestedConfigurationDescriber),
        );
        registry.register_describer(
            Kind::ConfigurationDoesNotExist,
            Arc::new(RequestedConfigurationNotFoundDescriber),
        );

        registry.register_describer(
            Kind::NoVariantsWithMatchingCapabilities,
            Arc::new(NoMatchingCapabilitiesDescriber::new(max)),
        );

        registry.register_describer(
            Kind::UnknownArtifactSelection,
            Arc::new(UnknownArtifactSelectionDescriber),
        );

        registry
    }

    /// Render diagnostics with ANSI colors.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Append `describer` to the describers for `kind`.
    pub fn register_describer(
        &mut self,
        kind: ResolutionFailureKind,
        describer: Arc<dyn ResolutionFailureDescriber>,
    ) {
        tracing::trace!("Registering describer `{}` for {}", describer.name(), kind);
        self.describers.entry(kind).or_default().push(describer);
    }

    /// Describers for `kind` in registration order; empty when none were
    /// registered.
    pub fn describers(
        &self,
        kind: ResolutionFailureKind,
    ) -> &[Arc<dyn ResolutionFailureDescriber>] {
        self.describers.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Describe `failure` with the first registered describer that can.
    pub fn describe(&self, failure: &ResolutionFailure) -> Option<Diagnostic> {
        let describer = self
            .describers(failure.kind())
            .iter()
            .find(|d| d.can_describe(failure))?;

        tracing::debug!(
            "Describing {} failure for `{}` with `{}`",
            failure.kind(),
            failure.target(),
            describer.name()
        );
        Some(describer.describe(failure))
    }

    /// Like [`describe`](Self::describe), falling back to the failure's
    /// summary when no describer applies.
    pub fn describe_or_summary(&self, failure: &ResolutionFailure) -> Diagnostic {
        self.describe(failure)
            .unwrap_or_else(|| Diagnostic::error(failure.summary()))
    }

    /// Terminal text for `failure`, colored when the registry was configured
    /// to.
    pub fn render(&self, failure: &ResolutionFailure) -> String {
        self.describe_or_summary(failure).format(self.color)
    }

    /// Number of registered describers across all kinds.
    pub fn len(&self) -> usize {
        self.describers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.describers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Attribute, AttributesFactory};
    use crate::resolution::failure::{Candidate, ResolutionStage};

    struct Fixed {
        name: &'static str,
        applies: bool,
    }

    impl ResolutionFailureDescriber for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn can_describe(&self, _failure: &ResolutionFailure) -> bool {
            self.applies
        }

        fn describe(&self, _failure: &ResolutionFailure) -> Diagnostic {
            Diagnostic::error(self.name)
        }
    }

    fn fixed(name: &'static str, applies: bool) -> Arc<dyn ResolutionFailureDescriber> {
        Arc::new(Fixed { name, applies })
    }

    fn missing_configuration() -> ResolutionFailure {
        ResolutionFailure::ConfigurationDoesNotExist {
            target: "lib".to_string(),
            configuration: "nope".to_string(),
        }
    }

    fn names(describers: &[Arc<dyn ResolutionFailureDescriber>]) -> Vec<&'static str> {
        describers.iter().map(|d| d.name()).collect()
    }

    #[test]
    fn test_registration_order_is_kept() {
        let mut registry = FailureDescriberRegistry::empty();
        let d1 = fixed("d1", true);
        let d2 = fixed("d2", true);

        registry.register_describer(ResolutionFailureKind::AmbiguousVariants, d1.clone());
        registry.register_describer(ResolutionFailureKind::AmbiguousVariants, d2.clone());

        let describers = registry.describers(ResolutionFailureKind::AmbiguousVariants);
        assert_eq!(describers.len(), 2);
        assert!(Arc::ptr_eq(&describers[0], &d1));
        assert!(Arc::ptr_eq(&describers[1], &d2));
    }

    #[test]
    fn test_unregistered_kind_is_empty() {
        let registry = FailureDescriberRegistry::empty();
        assert!(registry
            .describers(ResolutionFailureKind::UnknownArtifactSelection)
            .is_empty());
        assert!(registry.is_empty());
        assert_eq!(registry.describe(&missing_configuration()), None);
    }

    #[test]
    fn test_first_applicable_describer_wins() {
        let mut registry = FailureDescriberRegistry::empty();
        let kind = ResolutionFailureKind::ConfigurationDoesNotExist;
        registry.register_describer(kind, fixed("skipped", false));
        registry.register_describer(kind, fixed("first", true));
        registry.register_describer(kind, fixed("second", true));

        let diag = registry.describe(&missing_configuration()).unwrap();
        assert_eq!(diag.message, "first");
    }

    #[test]
    fn test_describe_or_summary_falls_back() {
        let mut registry = FailureDescriberRegistry::empty();
        registry.register_describer(
            ResolutionFailureKind::ConfigurationDoesNotExist,
            fixed("never", false),
        );

        let failure = missing_configuration();
        assert_eq!(registry.describe_or_summary(&failure).message, failure.summary());
    }

    #[test]
    fn test_render_follows_color_setting() {
        let failure = missing_configuration();

        let plain = FailureDescriberRegistry::standard().render(&failure);
        assert!(plain.starts_with("error: "));

        let config = DiagnosticsConfig {
            color: true,
            ..DiagnosticsConfig::default()
        };
        let colored = FailureDescriberRegistry::standard_with_config(&config).render(&failure);
        assert!(colored.starts_with("\x1b[1;31merror\x1b[0m: "));
        assert!(FailureDescriberRegistry::empty().render(&failure).contains(&failure.summary()));
    }

    #[test]
    fn test_standard_registry_order() {
        let registry = FailureDescriberRegistry::standard();

        assert_eq!(
            names(registry.describers(ResolutionFailureKind::AmbiguousVariants)),
            vec![
                "missing-attribute-ambiguity",
                "ambiguous-graph-variants",
                "ambiguous-artifact-variants"
            ]
        );
        assert_eq!(registry.len(), 11);
        for kind in ResolutionFailureKind::ALL {
            assert!(!registry.describers(kind).is_empty(), "no describer for {}", kind);
        }
    }

    #[test]
    fn test_standard_registry_prefers_missing_attribute() {
        let factory = AttributesFactory::new();
        let category = Attribute::string("registry-test.category");
        let candidates = vec![
            Candidate::new("api", factory.of(category, "library".into())),
            Candidate::new("platform", factory.of(category, "platform".into())),
        ];
        let failure = ResolutionFailure::AmbiguousVariants {
            stage: ResolutionStage::GraphVariantSelection,
            target: "lib".to_string(),
            requested: factory.root(),
            candidates: candidates.clone(),
        };

        let diag = FailureDescriberRegistry::standard().describe(&failure).unwrap();
        assert!(diag.context[0].contains("did not request a value for `registry-test.category`"));

        // Candidates that agree fall through to the generic describer.
        let failure = ResolutionFailure::AmbiguousVariants {
            stage: ResolutionStage::GraphVariantSelection,
            target: "lib".to_string(),
            requested: factory.root(),
            candidates: vec![candidates[0].clone(), Candidate::new("copy", candidates[0].attributes.clone())],
        };
        let diag = FailureDescriberRegistry::standard().describe(&failure).unwrap();
        assert!(diag.message.starts_with("cannot choose between the following variants"));
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        let registry = Arc::new(FailureDescriberRegistry::standard());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.describe(&missing_configuration()).is_some())
            })
            .collect();

        assert!(handles.into_iter().all(|h| h.join().unwrap()));
    }
}
