//! Download strategies: which areas to fetch for a requested area given what is present.

use crate::bounds::Bounds;
use crate::domain::CoordinateDomain;
use crate::error::{FetchError, Result};
use crate::partition::optimal_part;
use crate::rect::Rect;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Decides which areas to fetch.
///
/// Implementations are pure: they read their arguments only and may be shared across threads.
pub trait DownloadStrategy: Send + Sync {
    /// Name the strategy is registered under
    fn name(&self) -> &'static str;

    /// Areas to fetch so that `requested` is covered, given the areas in `existing`.
    ///
    /// At most `max_areas` areas are returned.
    ///
    /// # Errors
    /// [`FetchError::InvalidBudget`] when `max_areas` is 0.
    fn get_boxes(&self, requested: &Bounds, existing: &[Bounds], max_areas: usize)
    -> Result<Vec<Bounds>>;
}

/// Fetches the whole requested area every time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleStrategy;

impl DownloadStrategy for SimpleStrategy {
    fn name(&self) -> &'static str {
        "SimpleStrategy"
    }

    fn get_boxes(
        &self,
        requested: &Bounds,
        _existing: &[Bounds],
        max_areas: usize,
    ) -> Result<Vec<Bounds>> {
        if max_areas == 0 {
            return Err(FetchError::InvalidBudget { max_areas });
        }
        Ok(vec![*requested])
    }
}

/// Fetches only what is missing: the exact difference between the requested area and the
/// present areas, reduced to the budget by [`optimal_part`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BoxStrategy {
    domain: CoordinateDomain,
}

impl BoxStrategy {
    /// Strategy computing on the `domain` grid
    pub fn new(domain: CoordinateDomain) -> Self {
        Self { domain }
    }

    /// Grid the difference is computed on
    pub fn domain(&self) -> CoordinateDomain {
        self.domain
    }

    /// [`DownloadStrategy::get_boxes`] on grid rectangles.
    ///
    /// # Errors
    /// [`FetchError::InvalidBudget`] when `max_areas` is 0.
    ///
    /// # Example
    /// ```
    /// use regionfetch::{BoxStrategy, Rect};
    /// let strategy = BoxStrategy::default();
    /// let missing = strategy
    ///     .get_rects(&Rect::new(-1, 0, 2, 1), &[Rect::new(0, 0, 1, 1)], 3)
    ///     .unwrap();
    /// assert_eq!(missing, vec![Rect::new(-1, 0, 0, 1), Rect::new(1, 0, 2, 1)]);
    /// ```
    pub fn get_rects(
        &self,
        requested: &Rect,
        existing: &[Rect],
        max_areas: usize,
    ) -> Result<Vec<Rect>> {
        if max_areas == 0 {
            return Err(FetchError::InvalidBudget { max_areas });
        }
        let fragments = requested.subtract_all(existing);
        debug!(
            existing = existing.len(),
            fragments = fragments.len(),
            max_areas,
            "Computed missing fragments"
        );
        optimal_part(max_areas, &fragments)
    }
}

impl DownloadStrategy for BoxStrategy {
    fn name(&self) -> &'static str {
        "BoxStrategy"
    }

    fn get_boxes(
        &self,
        requested: &Bounds,
        existing: &[Bounds],
        max_areas: usize,
    ) -> Result<Vec<Bounds>> {
        let target = self.domain.to_rect_outer(requested);
        let present: Vec<Rect> = existing
            .iter()
            .map(|b| self.domain.to_rect_inner(b))
            .filter(Rect::is_valid)
            .collect();
        let rects = self.get_rects(&target, &present, max_areas)?;
        Ok(rects
            .iter()
            .filter_map(|r| self.domain.to_bounds(r))
            .collect())
    }
}

/// Strategies by name.
///
/// Owned by the composition root and passed by reference to whoever picks a strategy.
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    strategies: BTreeMap<String, Arc<dyn DownloadStrategy>>,
}

impl StrategyRegistry {
    /// Name of the strategy used when a configured name is unknown
    pub const FALLBACK: &'static str = "SimpleStrategy";

    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding [`SimpleStrategy`] and a [`BoxStrategy`] over `domain`.
    ///
    /// # Example
    /// ```
    /// use regionfetch::{CoordinateDomain, StrategyRegistry};
    /// let registry = StrategyRegistry::with_defaults(CoordinateDomain::Osm);
    /// assert_eq!(registry.names(), vec!["BoxStrategy", "SimpleStrategy"]);
    /// assert_eq!(registry.resolve("nope").name(), "SimpleStrategy");
    /// ```
    pub fn with_defaults(domain: CoordinateDomain) -> Self {
        let mut registry = Self::new();
        registry.register(SimpleStrategy);
        registry.register(BoxStrategy::new(domain));
        registry
    }

    /// Adds a strategy under its name, replacing any strategy registered under the same name.
    pub fn register<S>(&mut self, strategy: S)
    where
        S: DownloadStrategy + 'static,
    {
        self.strategies
            .insert(strategy.name().to_string(), Arc::new(strategy));
    }

    /// Strategy registered under `name`
    pub fn get(&self, name: &str) -> Option<Arc<dyn DownloadStrategy>> {
        self.strategies.get(name).cloned()
    }

    /// Looks up `name`, falling back to [`SimpleStrategy`] when it is not registered.
    pub fn resolve(&self, name: &str) -> Arc<dyn DownloadStrategy> {
        if let Some(strategy) = self.get(name) {
            return strategy;
        }
        warn!(
            strategy = name,
            fallback = Self::FALLBACK,
            "Unknown download strategy"
        );
        self.get(Self::FALLBACK)
            .unwrap_or_else(|| Arc::new(SimpleStrategy) as Arc<dyn DownloadStrategy>)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.strategies.keys().map(String::as_str).collect()
    }

    /// Number of registered strategies
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns true iff nothing is registered
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.names())
            .finish()
    }
}
