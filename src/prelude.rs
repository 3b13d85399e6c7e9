//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//! Users can import everything they need with:
//!
//! ```
//! use regionfetch::prelude::*;
//! ```

pub use crate::{
    Bounds, BoxStrategy, CoordinateDomain, CoverageSource, DataKind, DownloadStrategy,
    FetchConfig, FetchDispatcher, FetchError, FetchPlan, FetchPlanner, Interval, Rect,
    SimpleStrategy, SkipReason, StrategyRegistry, optimal_part,
};
