//! # regionfetch - incremental map-area downloads
//!
//! Decides which rectangular areas to download when a map viewport moves, so that areas
//! already held locally are not downloaded again.
//!
//! ## Features
//!
//! - **Exact rectangle algebra**: half-open [`Interval`]s and [`Rect`]s on a fixed-point
//!   integer grid with intersection, hull, complement and set difference
//! - **Bounded partition**: [`optimal_part`] merges difference fragments down to a budget of
//!   at most `N` rectangles, adding as little re-downloaded area as it can
//! - **Strategies**: [`BoxStrategy`] (difference + partition) and [`SimpleStrategy`] (whole
//!   area) behind the [`DownloadStrategy`] trait, selected by name from a [`StrategyRegistry`]
//! - **Planning**: [`FetchPlanner`] pads the viewport, plans each [`DataKind`] and hands the
//!   areas to a [`FetchDispatcher`]
//!
//! ## Quick Start
//!
//! ```rust
//! use regionfetch::prelude::*;
//!
//! // A 3x1 strip with its middle cell already downloaded
//! let requested = Rect::new(0, 0, 3, 1);
//! let present = [Rect::new(1, 0, 2, 1)];
//!
//! // Exact difference: the two side cells
//! let missing = requested.subtract_all(&present);
//! assert_eq!(missing.len(), 2);
//!
//! // With a budget of one request, both cells are fetched as their hull
//! let merged = optimal_part(1, &missing).unwrap();
//! assert_eq!(merged, vec![Rect::new(0, 0, 3, 1)]);
//! ```
//!
//! ## How It Works
//!
//! Geographic [`Bounds`] are snapped to an integer grid by a [`CoordinateDomain`]: requested
//! areas round outward, present areas round inward. The requested area minus every present
//! area gives pairwise-disjoint fragments. If there are more fragments than the budget allows,
//! the pair whose bounding hull wastes the least area is merged, repeatedly, until they fit.
//!
//! All operations are pure functions of their arguments and can run concurrently.

pub mod bounds;
pub mod config;
pub mod domain;
pub mod error;
pub mod interval;
pub mod partition;
pub mod planner;
pub mod prelude;
pub mod rect;
pub mod strategy;

mod strategy_tests;

pub use bounds::Bounds;
pub use config::FetchConfig;
pub use domain::CoordinateDomain;
pub use error::{FetchError, Result};
pub use interval::Interval;
pub use partition::optimal_part;
pub use planner::{
    CoverageSource, DataKind, FetchDispatcher, FetchPlan, FetchPlanner, PlanStats, SkipReason,
};
pub use rect::Rect;
pub use strategy::{BoxStrategy, DownloadStrategy, SimpleStrategy, StrategyRegistry};
