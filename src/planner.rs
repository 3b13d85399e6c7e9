//! Turning a viewport change into fetch requests.
//!
//! The planner reads what is already present for a data kind from a [`CoverageSource`], asks the
//! configured [`DownloadStrategy`] what is missing around the viewport, and hands each missing
//! area to a [`FetchDispatcher`]. How coverage is collected and how fetches are issued is up to
//! the host.

use crate::bounds::Bounds;
use crate::config::FetchConfig;
use crate::error::Result;
use crate::strategy::StrategyRegistry;
use std::fmt;
use tracing::{debug, info, instrument};

/// Kinds of data fetched independently, each with its own coverage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// Map data
    OsmData,
    /// GPS traces
    Gps,
    /// Map notes
    Notes,
}

impl DataKind {
    /// Every kind, in planning order
    pub const ALL: [DataKind; 3] = [DataKind::OsmData, DataKind::Gps, DataKind::Notes];
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataKind::OsmData => "osm",
            DataKind::Gps => "gps",
            DataKind::Notes => "notes",
        };
        f.write_str(name)
    }
}

/// Areas already downloaded for a data kind.
pub trait CoverageSource {
    /// Areas present for `kind`
    fn covered(&self, kind: DataKind) -> Vec<Bounds>;
}

/// Receives the areas to fetch.
pub trait FetchDispatcher {
    /// Starts fetching `area` for `kind`
    fn dispatch(&mut self, kind: DataKind, area: Bounds);
}

impl<F> FetchDispatcher for F
where
    F: FnMut(DataKind, Bounds),
{
    fn dispatch(&mut self, kind: DataKind, area: Bounds) {
        self(kind, area)
    }
}

/// Why a plan fetches nothing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The viewport is larger than the configured maximum area
    ZoomedOut,
    /// Nothing of this kind has been downloaded yet
    NoCoverage,
    /// The viewport is already fully covered
    NothingMissing,
}

/// Share of the extended viewport, in percent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlanStats {
    /// Area about to be fetched
    pub download_percent: f64,
    /// Area already present
    pub present_percent: f64,
    /// Area that will be fetched although present
    pub overlap_percent: f64,
}

/// Outcome of planning one data kind
#[derive(Clone, Debug, PartialEq)]
pub enum FetchPlan {
    /// Nothing to fetch
    Skipped(SkipReason),
    /// Areas to fetch
    Fetch {
        /// Missing areas that touch the viewport
        areas: Vec<Bounds>,
        /// Shares of the extended viewport
        stats: PlanStats,
    },
}

impl FetchPlan {
    /// Areas to fetch, empty when skipped
    pub fn areas(&self) -> &[Bounds] {
        match self {
            FetchPlan::Skipped(_) => &[],
            FetchPlan::Fetch { areas, .. } => areas,
        }
    }

    /// Returns true iff nothing is fetched
    pub fn is_skipped(&self) -> bool {
        matches!(self, FetchPlan::Skipped(_))
    }
}

/// Plans fetches with a [`FetchConfig`] and the strategies of a [`StrategyRegistry`].
#[derive(Clone, Debug)]
pub struct FetchPlanner<'r> {
    config: FetchConfig,
    registry: &'r StrategyRegistry,
}

impl<'r> FetchPlanner<'r> {
    /// Planner using `config` and the strategies in `registry`
    ///
    /// # Errors
    /// Any error of [`FetchConfig::validate`].
    pub fn new(config: FetchConfig, registry: &'r StrategyRegistry) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, registry })
    }

    /// Configuration in use
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Plans the fetches of one data kind for `viewport`.
    ///
    /// The viewport is extended by the configured margin before asking the strategy, and
    /// results that do not touch the unextended viewport are dropped.
    ///
    /// # Errors
    /// Any error of the selected strategy, or [`crate::FetchError::InvalidBounds`] when the
    /// extended viewport is not finite.
    ///
    /// # Example
    /// ```
    /// use regionfetch::prelude::*;
    /// let registry = StrategyRegistry::with_defaults(CoordinateDomain::Osm);
    /// let config = FetchConfig::default().with_extra_download(0.0);
    /// let planner = FetchPlanner::new(config, &registry).unwrap();
    ///
    /// let viewport = Bounds::new(0.0, 0.0, 0.2, 0.4).unwrap();
    /// let present = [Bounds::new(0.0, 0.0, 0.2, 0.2).unwrap()];
    /// let plan = planner.plan(&viewport, DataKind::OsmData, &present).unwrap();
    /// assert_eq!(plan.areas(), &[Bounds::new(0.0, 0.2, 0.2, 0.4).unwrap()]);
    /// ```
    #[instrument(skip_all, fields(kind = %kind))]
    pub fn plan(
        &self,
        viewport: &Bounds,
        kind: DataKind,
        coverage: &[Bounds],
    ) -> Result<FetchPlan> {
        if viewport.area() >= self.config.max_viewport_area {
            debug!(area = viewport.area(), "Viewport too large, not fetching");
            return Ok(FetchPlan::Skipped(SkipReason::ZoomedOut));
        }
        if coverage.is_empty() {
            return Ok(FetchPlan::Skipped(SkipReason::NoCoverage));
        }

        let extended = viewport.extend(self.config.extra_download)?;
        let strategy = self.registry.resolve(&self.config.strategy);
        let to_fetch = strategy.get_boxes(&extended, coverage, self.config.max_areas)?;

        let stats = plan_stats(&extended, coverage, &to_fetch);
        info!(
            strategy = strategy.name(),
            "Getting {:.1}% of area, already have {:.1}%, overlap {:.1}%",
            stats.download_percent,
            stats.present_percent,
            stats.overlap_percent
        );

        let areas: Vec<Bounds> = to_fetch
            .into_iter()
            .filter(|area| area.intersects(viewport))
            .collect();
        if areas.is_empty() {
            return Ok(FetchPlan::Skipped(SkipReason::NothingMissing));
        }
        Ok(FetchPlan::Fetch { areas, stats })
    }

    /// Plans every [`DataKind`] and dispatches the resulting areas.
    ///
    /// Returns the number of dispatched areas.
    ///
    /// # Errors
    /// The first error of [`FetchPlanner::plan`]; kinds planned before it stay dispatched.
    pub fn fetch<S, D>(&self, viewport: &Bounds, source: &S, dispatcher: &mut D) -> Result<usize>
    where
        S: CoverageSource + ?Sized,
        D: FetchDispatcher + ?Sized,
    {
        let mut dispatched = 0;
        for kind in DataKind::ALL {
            let coverage = source.covered(kind);
            let plan = self.plan(viewport, kind, &coverage)?;
            for area in plan.areas() {
                dispatcher.dispatch(kind, *area);
                dispatched += 1;
            }
        }
        Ok(dispatched)
    }
}

fn plan_stats(extended: &Bounds, coverage: &[Bounds], to_fetch: &[Bounds]) -> PlanStats {
    let total = extended.area();
    if total <= 0.0 {
        return PlanStats::default();
    }
    let download: f64 = to_fetch.iter().map(Bounds::area).sum();
    let present: f64 = coverage
        .iter()
        .filter_map(|b| b.intersection(extended))
        .map(|b| b.area())
        .sum();
    let download_percent = download * 100.0 / total;
    let present_percent = present * 100.0 / total;
    PlanStats {
        download_percent,
        present_percent,
        overlap_percent: download_percent + present_percent - 100.0,
    }
}
