//! # Dimension Validation Rules
//!
//! Derives the `dimensions:` validation rule for uploads into a collection
//! from the conversions that will be generated for it.
//!
//! An upload must be at least as large as every declared conversion on
//! each axis, so for each axis the rule carries the **largest** declared
//! size. The `min_` prefix is the rule keyword; it is a lower bound on the
//! upload, not the aggregation operator.
//!
//! Every case where no rule applies (unknown collection, non-image
//! collection, no declared sizes) yields an empty string so callers can
//! drop the rule from a larger rule set without special handling.
//!
//! # Example
//! ```rust
//! use std::collections::HashMap;
//!
//! use wzs_media::image::mime::StaticImageMimeTypes;
//! use wzs_media::media::collection::MediaCollection;
//! use wzs_media::media::conversion::MediaConversion;
//! use wzs_media::rules::dimension::resolve;
//!
//! let mut logo = MediaCollection::new("logo");
//! logo.accepts_mime_types(["image/png"]);
//! let collections = HashMap::from([("logo".to_string(), logo)]);
//!
//! let mut thumb = MediaConversion::new("thumb");
//! thumb.width(120);
//!
//! let detector = StaticImageMimeTypes::default();
//! assert_eq!(resolve("logo", &[thumb], &collections, &detector), "dimensions:min_width=120");
//! assert_eq!(resolve("banner", &[], &collections, &detector), "");
//! ```

use std::{collections::HashMap, fmt, sync::Arc};

use tracing::debug;

use crate::config::media::MediaConfig;
use crate::image::mime::{ImageTypeDetector, StaticImageMimeTypes};
use crate::media::collection::MediaCollection;
use crate::media::conversion::MediaConversion;
use crate::media::registry::{ConversionScope, EffectiveConversions, MediaRegistry, ScopePolicy};

/// Lower bounds on upload dimensions, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DimensionRule {
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
}

impl DimensionRule {
    /// Folds the declared sizes of `conversions`, each axis independently.
    pub fn from_conversions<'a, I>(conversions: I) -> Self
    where
        I: IntoIterator<Item = &'a MediaConversion>,
    {
        conversions
            .into_iter()
            .fold(Self::default(), |rule, c| Self {
                min_width: max_declared(rule.min_width, c.width),
                min_height: max_declared(rule.min_height, c.height),
            })
    }

    /// Returns `true` if neither axis is constrained.
    pub fn is_empty(&self) -> bool {
        self.min_width.is_none() && self.min_height.is_none()
    }
}

fn max_declared(current: Option<u32>, declared: Option<u32>) -> Option<u32> {
    match (current, declared) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

/// Renders `dimensions:min_width=W,min_height=H` (or the declared subset).
/// An empty rule renders as an empty string.
impl fmt::Display for DimensionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min_width, self.min_height) {
            (Some(w), Some(h)) => write!(f, "dimensions:min_width={w},min_height={h}"),
            (Some(w), None) => write!(f, "dimensions:min_width={w}"),
            (None, Some(h)) => write!(f, "dimensions:min_height={h}"),
            (None, None) => Ok(()),
        }
    }
}

/// Selects the conversions that apply to `collection` under `policy`.
pub fn effective_conversions<'a>(
    collection: &'a MediaCollection,
    global: &'a [MediaConversion],
    policy: ScopePolicy,
) -> EffectiveConversions<'a> {
    if !collection.has_conversions() {
        return EffectiveConversions {
            scope: ConversionScope::Global,
            conversions: global.iter().collect(),
        };
    }

    let scoped = collection.conversions().iter();
    let conversions = match policy {
        ScopePolicy::Override => scoped.collect(),
        ScopePolicy::Merge => global.iter().chain(scoped).collect(),
    };
    EffectiveConversions {
        scope: ConversionScope::Collection(collection.name().to_string()),
        conversions,
    }
}

/// Computes the rule for `collection_name`, with scoped conversions
/// overriding global ones.
pub fn resolve(
    collection_name: &str,
    global_conversions: &[MediaConversion],
    collections_by_name: &HashMap<String, MediaCollection>,
    is_image: &dyn ImageTypeDetector,
) -> String {
    resolve_rule(
        collection_name,
        global_conversions,
        collections_by_name,
        is_image,
        ScopePolicy::Override,
    )
    .to_string()
}

fn resolve_rule(
    collection_name: &str,
    global_conversions: &[MediaConversion],
    collections_by_name: &HashMap<String, MediaCollection>,
    is_image: &dyn ImageTypeDetector,
    policy: ScopePolicy,
) -> DimensionRule {
    let Some(collection) = collections_by_name.get(collection_name) else {
        debug!(collection = collection_name, "no such media collection");
        return DimensionRule::default();
    };

    let effective = effective_conversions(collection, global_conversions, policy);

    if !collection.accepts_images(is_image) {
        debug!(
            collection = collection_name,
            mime_types = ?collection.accepted_mime_types(),
            "collection accepts no image types"
        );
        return DimensionRule::default();
    }

    let rule = DimensionRule::from_conversions(effective.conversions);
    debug!(
        collection = collection_name,
        scope = ?effective.scope,
        ?policy,
        %rule,
        "resolved dimension rule"
    );
    rule
}

/// Resolver bundling an image-type detector with a [`ScopePolicy`].
///
/// # Example
/// ```rust
/// use wzs_media::media::conversion::CropPosition;
/// use wzs_media::media::registry::{MediaRegistry, ScopePolicy};
/// use wzs_media::rules::dimension::DimensionRuleResolver;
///
/// let mut registry = MediaRegistry::new();
/// registry
///     .add_media_collection("logo")
///     .register_media_conversions(|set| {
///         set.add_media_conversion("admin-panel").crop(CropPosition::Center, 20, 80);
///     });
/// registry.add_media_conversion("thumb").crop(CropPosition::Center, 100, 70);
///
/// let strict = DimensionRuleResolver::default();
/// assert_eq!(strict.resolve_for(&registry, "logo"), "dimensions:min_width=20,min_height=80");
///
/// let merged = DimensionRuleResolver::default().with_policy(ScopePolicy::Merge);
/// assert_eq!(merged.resolve_for(&registry, "logo"), "dimensions:min_width=100,min_height=80");
/// ```
#[derive(Clone)]
pub struct DimensionRuleResolver {
    detector: Arc<dyn ImageTypeDetector>,
    policy: ScopePolicy,
}

impl DimensionRuleResolver {
    /// Creates a resolver from an image-type detector and a scope policy.
    pub fn new(detector: Arc<dyn ImageTypeDetector>, policy: ScopePolicy) -> Self {
        Self { detector, policy }
    }

    /// Builds a resolver from configuration, using a static MIME list
    /// extended with the configured extra image types.
    pub fn from_config(config: &MediaConfig) -> Self {
        let detector =
            StaticImageMimeTypes::default().with_extra(&config.extra_image_mime_types);
        Self::new(Arc::new(detector), config.scope_policy)
    }

    /// Replaces the scope policy.
    pub fn with_policy(mut self, policy: ScopePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The scope policy in use.
    pub fn policy(&self) -> ScopePolicy {
        self.policy
    }

    /// Computes the structured rule for `collection_name` in `registry`.
    pub fn rule_for(&self, registry: &MediaRegistry, collection_name: &str) -> DimensionRule {
        resolve_rule(
            collection_name,
            registry.global_conversions().as_slice(),
            registry.collections(),
            self.detector.as_ref(),
            self.policy,
        )
    }

    /// Renders the rule for `collection_name`; empty when none applies.
    pub fn resolve_for(&self, registry: &MediaRegistry, collection_name: &str) -> String {
        self.rule_for(registry, collection_name).to_string()
    }
}

impl Default for DimensionRuleResolver {
    fn default() -> Self {
        Self::new(Arc::new(StaticImageMimeTypes::default()), ScopePolicy::default())
    }
}

impl fmt::Debug for DimensionRuleResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DimensionRuleResolver")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
