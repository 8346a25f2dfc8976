//! Sheet layout configuration
//!
//! Describes how the deployment's sheet names its columns and whether
//! derived metrics are filled in automatically.

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::{PeriodNaming, Site};
use crate::domain::inventory::{
    ColumnResolver, DerivationEngine, DerivationMode, DEFAULT_AREA_LABEL,
    DEFAULT_LEGACY_AREA_SITE,
};
use crate::domain::session::SessionSettings;

#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Formula for the derived area
    #[serde(default)]
    pub derivation_mode: DerivationMode,

    /// Period label scheme used when the header does not settle it
    #[serde(default)]
    pub period_naming: PeriodNaming,

    /// Site whose area columns carry no site prefix
    #[serde(default = "default_legacy_area_site")]
    pub legacy_area_site: Site,

    /// Metric text of the area columns
    #[serde(default = "default_area_label")]
    pub area_label: String,

    /// Recompute pallets and area when rolls change
    #[serde(default = "default_auto_derive")]
    pub auto_derive: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            derivation_mode: DerivationMode::default(),
            period_naming: PeriodNaming::default(),
            legacy_area_site: default_legacy_area_site(),
            area_label: default_area_label(),
            auto_derive: default_auto_derive(),
        }
    }
}

impl LayoutConfig {
    pub fn resolver(&self) -> ColumnResolver {
        ColumnResolver::new(self.period_naming)
            .with_legacy_area_site(Some(self.legacy_area_site))
            .with_area_label(self.area_label.trim())
    }

    /// Settings every session of this deployment is opened with
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            resolver: self.resolver(),
            engine: DerivationEngine::new(self.derivation_mode),
            auto_derive: self.auto_derive,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.area_label.trim().is_empty() {
            return Err(ValidationError::EmptyAreaLabel);
        }
        Ok(())
    }
}

fn default_legacy_area_site() -> Site {
    DEFAULT_LEGACY_AREA_SITE
}

fn default_area_label() -> String {
    DEFAULT_AREA_LABEL.to_string()
}

fn default_auto_derive() -> bool {
    true
}
