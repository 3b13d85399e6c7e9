//! Tunables for planning fetches.

use crate::domain::CoordinateDomain;
use crate::error::{FetchError, Result};
use tracing::trace;

/// Prefix the host application stores these settings under. Keys are accepted with or without it.
pub const PREFERENCE_PREFIX: &str = "plugin.continuos_download.";

/// Settings of a [`crate::FetchPlanner`].
#[derive(Clone, Debug, PartialEq)]
pub struct FetchConfig {
    /// Fraction of the viewport span added on every side before computing missing areas
    pub extra_download: f64,
    /// Maximum number of areas fetched per data kind and viewport change
    pub max_areas: usize,
    /// Viewports with this area or more (square degrees) are not fetched
    pub max_viewport_area: f64,
    /// Registered name of the strategy to use
    pub strategy: String,
    /// Grid the geometry is computed on
    pub domain: CoordinateDomain,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            extra_download: 0.1,
            max_areas: 4,
            max_viewport_area: 0.25,
            strategy: "BoxStrategy".to_string(),
            domain: CoordinateDomain::Osm,
        }
    }
}

impl FetchConfig {
    /// Sets the viewport margin
    #[must_use]
    pub fn with_extra_download(mut self, extra_download: f64) -> Self {
        self.extra_download = extra_download;
        self
    }

    /// Sets the fragment budget
    #[must_use]
    pub fn with_max_areas(mut self, max_areas: usize) -> Self {
        self.max_areas = max_areas;
        self
    }

    /// Sets the zoom guard, in square degrees
    #[must_use]
    pub fn with_max_viewport_area(mut self, max_viewport_area: f64) -> Self {
        self.max_viewport_area = max_viewport_area;
        self
    }

    /// Sets the strategy name
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = strategy.into();
        self
    }

    /// Sets the coordinate grid
    #[must_use]
    pub fn with_domain(mut self, domain: CoordinateDomain) -> Self {
        self.domain = domain;
        self
    }

    /// Rejects values that cannot be used as is.
    ///
    /// # Errors
    /// [`FetchError::InvalidBudget`] for a zero budget, [`FetchError::InvalidMargin`] for a
    /// negative or non-finite margin, [`FetchError::InvalidPreference`] for a zoom guard that
    /// is not positive.
    pub fn validate(&self) -> Result<()> {
        if self.max_areas == 0 {
            return Err(FetchError::InvalidBudget {
                max_areas: self.max_areas,
            });
        }
        if !self.extra_download.is_finite() || self.extra_download < 0.0 {
            return Err(FetchError::InvalidMargin {
                margin: self.extra_download,
            });
        }
        if self.max_viewport_area.is_nan() || self.max_viewport_area <= 0.0 {
            return Err(FetchError::InvalidPreference {
                key: "max_area".to_string(),
                value: self.max_viewport_area.to_string(),
            });
        }
        Ok(())
    }

    /// Builds a configuration from `key = value` string pairs on top of the defaults.
    ///
    /// Recognized keys are `extra_download`, `max_areas`, `max_area`, `strategy` and
    /// `domain`, optionally prefixed with [`PREFERENCE_PREFIX`]. Other keys are ignored.
    ///
    /// # Errors
    /// [`FetchError::InvalidPreference`] for values that do not parse,
    /// [`FetchError::UnknownDomain`] for an unknown grid name, and any error of
    /// [`FetchConfig::validate`].
    ///
    /// # Example
    /// ```
    /// use regionfetch::{CoordinateDomain, FetchConfig};
    /// let config = FetchConfig::from_preferences([
    ///     ("plugin.continuos_download.max_areas", "6"),
    ///     ("domain", "e6"),
    /// ])
    /// .unwrap();
    /// assert_eq!(config.max_areas, 6);
    /// assert_eq!(config.domain, CoordinateDomain::Micro);
    /// assert!(FetchConfig::from_preferences([("max_areas", "0")]).is_err());
    /// ```
    pub fn from_preferences<I, K, V>(preferences: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in preferences {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            let short = key.strip_prefix(PREFERENCE_PREFIX).unwrap_or(key);
            match short {
                "extra_download" => config.extra_download = parse(key, value)?,
                "max_areas" => config.max_areas = parse(key, value)?,
                "max_area" => config.max_viewport_area = parse(key, value)?,
                "strategy" => config.strategy = value.to_string(),
                "domain" => config.domain = value.parse()?,
                _ => trace!(key, "Ignoring unknown preference"),
            }
        }
        config.validate()?;
        Ok(config)
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| FetchError::InvalidPreference {
        key: key.to_string(),
        value: value.to_string(),
    })
}
