//! Catalog loading and the offline placeholder.
//!
//! The static-asset layer drops the catalog payload at
//! `StorageConfig::catalog_file()`. Loading never fails: a missing, corrupt,
//! non-array, or empty payload degrades to the deterministic placeholder
//! catalog so selection stays exercisable offline. Substitution is logged,
//! never surfaced as a user error.

use std::path::Path;

use crate::error::{Result, WhimError};
use crate::types::{Activity, EffortTier, EnergyLevel, LocationAffinity, PlanningMode};

/// Size of the synthesized placeholder catalog.
pub const PLACEHOLDER_COUNT: usize = 370;

/// The immutable-for-the-session activity list.
#[derive(Debug, Clone)]
pub struct Catalog {
    activities: Vec<Activity>,
    placeholder: bool,
}

impl Catalog {
    /// Loads the catalog from `path`, substituting the placeholder on any
    /// failure.
    pub fn load(path: &Path) -> Catalog {
        let payload = match fs_err::read_to_string(path) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::info!(
                    path = %path.display(),
                    error = %err,
                    "Catalog unavailable, using placeholder"
                );
                return Catalog::placeholder();
            }
        };
        match Catalog::from_json(&payload) {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "Catalog malformed, using placeholder"
                );
                Catalog::placeholder()
            }
        }
    }

    /// Parses a catalog payload. The payload must be a non-empty JSON array;
    /// entries with duplicate ids are dropped (first occurrence wins).
    pub fn from_json(payload: &str) -> Result<Catalog> {
        let value: serde_json::Value =
            serde_json::from_str(payload).map_err(|source| WhimError::Json {
                context: "catalog payload".to_string(),
                source,
            })?;
        let entries = value
            .as_array()
            .ok_or_else(|| WhimError::CatalogUnavailable {
                context: "payload is not an array".to_string(),
            })?;
        if entries.is_empty() {
            return Err(WhimError::CatalogUnavailable {
                context: "payload is empty".to_string(),
            });
        }

        let mut activities: Vec<Activity> = Vec::with_capacity(entries.len());
        let mut seen = std::collections::HashSet::new();
        for entry in entries {
            let activity: Activity = match serde_json::from_value(entry.clone()) {
                Ok(activity) => activity,
                Err(err) => {
                    tracing::warn!(error = %err, "Dropping unparsable catalog entry");
                    continue;
                }
            };
            if !seen.insert(activity.id.clone()) {
                tracing::warn!(id = %activity.id, "Dropping duplicate catalog id");
                continue;
            }
            activities.push(activity);
        }

        if activities.is_empty() {
            return Err(WhimError::CatalogUnavailable {
                context: "no usable entries".to_string(),
            });
        }
        Ok(Catalog {
            activities,
            placeholder: false,
        })
    }

    /// The deterministic offline catalog: sequentially numbered activities
    /// with attributes cycling by index so every enum value and both pools
    /// are represented.
    pub fn placeholder() -> Catalog {
        let minutes = [5, 10, 15, 20, 30, 45, 60, 90];
        let efforts = [EffortTier::Light, EffortTier::Moderate, EffortTier::Demanding];
        let planning = [
            PlanningMode::Immediate,
            PlanningMode::Immediate,
            PlanningMode::Prepared,
            PlanningMode::Scheduled,
        ];
        let energy = [
            EnergyLevel::Any,
            EnergyLevel::Low,
            EnergyLevel::Medium,
            EnergyLevel::High,
        ];
        let locations = [
            LocationAffinity::Either,
            LocationAffinity::Indoor,
            LocationAffinity::Outdoor,
        ];
        let tags = ["maker", "mover", "connector", "explorer"];

        let activities = (1..=PLACEHOLDER_COUNT)
            .map(|i| Activity {
                id: format!("activity-{i}"),
                title: format!("Activity {i}"),
                description: format!("This is description for activity {i}"),
                minutes: minutes[i % minutes.len()],
                effort: efforts[i % efforts.len()],
                planning: planning[i % planning.len()],
                energy: energy[i % energy.len()],
                identity_tag: tags[i % tags.len()].to_string(),
                is_community: i % 9 == 0,
                supports_solo: i % 5 != 0,
                location: locations[i % locations.len()],
            })
            .collect();
        Catalog {
            activities,
            placeholder: true,
        }
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }
}
