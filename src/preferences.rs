//! User preferences: selected property, site, location, date range and
//! country/region.
//!
//! [`UserPreferences`] is an immutable value. Every change produces a new
//! value which the [`PreferenceStore`] writes out whole, replacing the
//! previous blob.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::config::{self, PREFERENCES_FILE};
use crate::dates::{DatePreset, DateRange};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub property_id: Option<String>,
    pub site_url: Option<String>,
    /// Selected business-profile location resource name.
    pub location: Option<String>,
    pub date_preset: DatePreset,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub country: String,
    pub region: Option<String>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            property_id: None,
            site_url: None,
            location: None,
            date_preset: DatePreset::Last28d,
            start_date: None,
            end_date: None,
            country: "US".to_string(),
            region: None,
        }
    }
}

impl UserPreferences {
    pub fn with_property(self, property_id: impl Into<String>) -> Self {
        Self {
            property_id: Some(property_id.into()),
            ..self
        }
    }

    pub fn with_site(self, site_url: impl Into<String>) -> Self {
        Self {
            site_url: Some(site_url.into()),
            ..self
        }
    }

    pub fn with_location(self, location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..self
        }
    }

    /// Switch to a preset range. Explicit dates are kept for a later switch
    /// back to [`DatePreset::Custom`].
    pub fn with_preset(self, date_preset: DatePreset) -> Self {
        Self {
            date_preset,
            ..self
        }
    }

    /// Set explicit dates and switch to [`DatePreset::Custom`].
    pub fn with_custom_range(self, range: DateRange) -> Self {
        Self {
            date_preset: DatePreset::Custom,
            start_date: Some(range.start_date),
            end_date: Some(range.end_date),
            ..self
        }
    }

    /// Changing the country clears the region, which belongs to the old one.
    pub fn with_country(self, country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            region: None,
            ..self
        }
    }

    pub fn with_region(self, region: Option<String>) -> Self {
        Self { region, ..self }
    }

    /// The effective date range as of `today`.
    ///
    /// A custom preset with missing or invalid dates falls back to the
    /// default 28-day range.
    pub fn resolved_range(&self, today: NaiveDate) -> DateRange {
        if let Some(range) = DateRange::for_preset(self.date_preset, today) {
            return range;
        }
        match (self.start_date.as_deref(), self.end_date.as_deref()) {
            (Some(start), Some(end)) => DateRange::parse(start, end).ok(),
            _ => None,
        }
        .unwrap_or_else(|| crate::dates::last_n_days(28, today))
    }
}

// ---------------------------------------------------------------------------
// PreferenceStore
// ---------------------------------------------------------------------------

/// File-backed persistence for [`UserPreferences`].
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store under `dir`, or the platform config directory when `None`.
    pub fn new(dir: Option<PathBuf>) -> Self {
        let dir = dir.unwrap_or_else(config::default_config_dir);
        Self {
            path: dir.join(PREFERENCES_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored blob merged over the defaults.
    ///
    /// A missing file yields the defaults. A corrupt file is logged and
    /// also yields the defaults; it is overwritten on the next save.
    pub fn load(&self) -> UserPreferences {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return UserPreferences::default(),
        };
        match merge_over_defaults(&contents) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable preferences");
                UserPreferences::default()
            }
        }
    }

    /// Replace the stored blob with `prefs`.
    ///
    /// Writes to a temp file in the same directory and renames it over the
    /// old one, so readers never see a partial blob.
    pub fn save(&self, prefs: &UserPreferences) -> Result<()> {
        let dir = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, prefs)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Apply `change` to the current preferences, persist and return the result.
    pub fn update<F>(&self, change: F) -> Result<UserPreferences>
    where
        F: FnOnce(UserPreferences) -> UserPreferences,
    {
        let next = change(self.load());
        self.save(&next)?;
        Ok(next)
    }
}

/// Overlay the keys of a stored JSON object onto the default preferences.
///
/// `null` values are skipped so one cleared field keeps its default.
fn merge_over_defaults(contents: &str) -> Result<UserPreferences> {
    let stored: Value = serde_json::from_str(contents)?;
    let mut merged = serde_json::to_value(UserPreferences::default())?;
    if let (Value::Object(base), Value::Object(overlay)) = (&mut merged, stored) {
        for (k, v) in overlay {
            if v.is_null() {
                continue;
            }
            base.insert(k, v);
        }
    }
    Ok(serde_json::from_value(merged)?)
}
