use tracing::{debug, trace, warn};

use super::traits::Platform;

/// Ordered registry of platforms.
///
/// Registration order is the dispatch priority: [`PlatformRegistry::detect`]
/// returns the first platform whose `detect` accepts the input and never
/// compares specificity. A platform whose domain overlaps a broader one must
/// be registered before it.
pub struct PlatformRegistry {
    platforms: Vec<Box<dyn Platform>>,
}

impl PlatformRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            platforms: Vec::new(),
        }
    }

    /// Append a platform at the lowest priority.
    ///
    /// A platform whose id is already registered is ignored.
    pub fn register(&mut self, platform: Box<dyn Platform>) {
        if self.get(platform.id()).is_some() {
            warn!(platform = platform.id(), "Platform already registered, ignoring");
            return;
        }
        debug!(
            platform = platform.id(),
            priority = self.platforms.len(),
            "Registered platform"
        );
        self.platforms.push(platform);
    }

    /// Find the first platform, in registration order, that detects the input.
    #[must_use]
    pub fn detect(&self, text: &str) -> Option<&dyn Platform> {
        let found = self
            .platforms
            .iter()
            .find(|p| p.detect(text))
            .map(AsRef::as_ref);
        trace!(input = text, platform = ?found.map(Platform::id), "Dispatch");
        found
    }

    /// Look up a platform by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn Platform> {
        self.platforms
            .iter()
            .find(|p| p.id() == id)
            .map(AsRef::as_ref)
    }

    /// Get all registered platforms in priority order.
    #[must_use]
    pub fn platforms(&self) -> &[Box<dyn Platform>] {
        &self.platforms
    }

    /// Platform ids in priority order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.platforms.iter().map(|p| p.id())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new()
    }
}
