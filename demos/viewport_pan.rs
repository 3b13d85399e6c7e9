//! Pans a viewport east in small steps and "downloads" whatever the planner asks for.
//!
//! Run with `RUST_LOG=debug` to see the fragment and merge logs.

use regionfetch::prelude::*;
use std::cell::RefCell;
use tracing_subscriber::EnvFilter;

/// Coverage that grows with every dispatched area
#[derive(Default)]
struct Downloaded {
    areas: RefCell<Vec<(DataKind, Bounds)>>,
}

impl CoverageSource for Downloaded {
    fn covered(&self, kind: DataKind) -> Vec<Bounds> {
        self.areas
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, b)| *b)
            .collect()
    }
}

fn main() -> Result<(), FetchError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = FetchConfig::from_preferences([
        ("plugin.continuos_download.max_areas", "3"),
        ("plugin.continuos_download.extra_download", "0.1"),
    ])?;
    let registry = StrategyRegistry::with_defaults(config.domain);
    let planner = FetchPlanner::new(config, &registry)?;

    let downloaded = Downloaded::default();
    // The first download is the host's job; start from one loaded area
    downloaded
        .areas
        .borrow_mut()
        .push((DataKind::OsmData, Bounds::new(51.50, -0.15, 51.55, -0.05)?));

    for step in 0..6 {
        let shift = step as f64 * 0.02;
        let viewport = Bounds::new(51.51, -0.14 + shift, 51.54, -0.08 + shift)?;
        let mut fetched = Vec::new();
        planner.fetch(&viewport, &downloaded, &mut |kind: DataKind, area: Bounds| {
            fetched.push((kind, area))
        })?;

        println!("step {}: viewport {}", step, viewport);
        for (kind, area) in &fetched {
            println!("  fetch {:<5} {} ({:.6} deg²)", kind.to_string(), area, area.area());
        }
        downloaded.areas.borrow_mut().extend(fetched);
    }
    Ok(())
}
