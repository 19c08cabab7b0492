//! Core types shared across all whim clients.
//!
//! These types are the lingua franca of the picker: the CLI adapter, the
//! engine, and the persistence layer all speak them. Keep changes additive —
//! the persisted session blob and catalog files deserialize into these shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// Activity Attributes
// ═══════════════════════════════════════════════════════════════════════════════

/// Duration tier derived from an activity's minutes.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DurationClass {
    Short,
    Medium,
    Long,
}

impl DurationClass {
    /// Tier boundaries: short ≤ 10 minutes, medium ≤ 30, long above that.
    pub fn for_minutes(minutes: u32) -> Self {
        match minutes {
            0..=10 => DurationClass::Short,
            11..=30 => DurationClass::Medium,
            _ => DurationClass::Long,
        }
    }
}

/// Effort tiers, ordered lightest first so `<=` compares against a cap.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum EffortTier {
    Light,
    #[default]
    Moderate,
    Demanding,
}

/// Whether an activity can be done on the spot or needs lead time.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanningMode {
    #[default]
    Immediate,
    Prepared,
    Scheduled,
}

/// Energy an activity asks for. `Any` on an activity means it fits every
/// mood; `Any` in a filter means no constraint.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    #[default]
    Any,
    Low,
    Medium,
    High,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationAffinity {
    Indoor,
    Outdoor,
    #[default]
    Either,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Activity
// ═══════════════════════════════════════════════════════════════════════════════

fn default_supports_solo() -> bool {
    true
}

fn default_minutes() -> u32 {
    15
}

/// One suggestible action from the catalog.
///
/// Only `id`, `title`, and `description` are required in catalog payloads;
/// every attribute field has a forgiving default so a hand-edited catalog
/// with missing fields still loads.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default = "default_minutes")]
    pub minutes: u32,
    #[serde(default)]
    pub effort: EffortTier,
    #[serde(default)]
    pub planning: PlanningMode,
    #[serde(default)]
    pub energy: EnergyLevel,
    /// Categorical tag used only for cosmetic color-coding in clients.
    #[serde(default)]
    pub identity_tag: String,
    /// Whether this activity belongs to the civic/community subset.
    #[serde(default)]
    pub is_community: bool,
    #[serde(default = "default_supports_solo")]
    pub supports_solo: bool,
    #[serde(default)]
    pub location: LocationAffinity,
}

impl Activity {
    pub fn duration_class(&self) -> DurationClass {
        DurationClass::for_minutes(self.minutes)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Filter Settings
// ═══════════════════════════════════════════════════════════════════════════════

/// User-adjustable predicate parameters. `None` means no constraint.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FilterSettings {
    pub max_minutes: Option<u32>,
    pub max_effort: Option<EffortTier>,
    pub planning: Option<PlanningMode>,
    pub energy: Option<EnergyLevel>,
    pub community_only: bool,
    pub solo_only: bool,
    pub location: Option<LocationAffinity>,
}

/// Distinguishes an absent patch field (outer `None`) from an explicit
/// `null` (inner `None`). Plain `Option<Option<T>>` collapses the two.
fn double_option<'de, T, D>(de: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// A partial update to [`FilterSettings`].
///
/// Absent field = leave unchanged; `null` = clear the constraint; value = set
/// it. This is the shape the `adjustFilters` intent carries.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FilterPatch {
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub max_minutes: Option<Option<u32>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub max_effort: Option<Option<EffortTier>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub planning: Option<Option<PlanningMode>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub energy: Option<Option<EnergyLevel>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solo_only: Option<bool>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<LocationAffinity>>,
}

impl FilterPatch {
    /// Applies the patch to `filters`, leaving absent fields untouched.
    pub fn apply(&self, filters: &mut FilterSettings) {
        if let Some(v) = self.max_minutes {
            filters.max_minutes = v;
        }
        if let Some(v) = self.max_effort {
            filters.max_effort = v;
        }
        if let Some(v) = self.planning {
            filters.planning = v;
        }
        if let Some(v) = self.energy {
            filters.energy = v;
        }
        if let Some(v) = self.community_only {
            filters.community_only = v;
        }
        if let Some(v) = self.solo_only {
            filters.solo_only = v;
        }
        if let Some(v) = self.location {
            filters.location = v;
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Session Enumerations
// ═══════════════════════════════════════════════════════════════════════════════

/// Copy voice. Cosmetic only: the tone never feeds into selection (steering
/// hints are the one explicit channel for that).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Gentle,
    Coach,
    Playful,
}

/// One-shot selection bias, consumed and cleared by the next spin.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SteeringHint {
    /// Prefer activities sharing the current activity's energy level.
    KeepEnergy,
    /// Prefer activities with a different energy level.
    SwitchEnergy,
    /// Explicit request for an unbiased uniform pick.
    Surprise,
}

/// The screen the session is showing. Modal screens (Filters, Profile) do not
/// consume or alter pick/progress state.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Spin,
    Activity,
    InProgress,
    Done,
    Filters,
    Profile,
}

// ═══════════════════════════════════════════════════════════════════════════════
// History / Dot Log
// ═══════════════════════════════════════════════════════════════════════════════

/// A completed activity, kept most-recent-first in the session history.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: String,
    pub title: String,
    pub identity_tag: String,
    pub effort: EffortTier,
    pub duration: DurationClass,
    pub completed_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn for_activity(activity: &Activity, completed_at: DateTime<Utc>) -> Self {
        HistoryEntry {
            id: activity.id.clone(),
            title: activity.title.clone(),
            identity_tag: activity.identity_tag.clone(),
            effort: activity.effort,
            duration: activity.duration_class(),
            completed_at,
        }
    }
}

/// A decorative completion dot.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct DotEntry {
    pub at: DateTime<Utc>,
    pub is_community: bool,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Display Summaries
// ═══════════════════════════════════════════════════════════════════════════════

/// How many catalog activities pass the current filters.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct EligibleCounts {
    pub total: u32,
    pub core_count: u32,
    pub community_count: u32,
}

/// Aggregates over the dot log for the profile screen.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct DotSummary {
    pub total: u32,
    pub community: u32,
    /// Consecutive days ending today with at least one dot, capped at 7.
    pub day_streak: u32,
}

/// Everything a presentation adapter needs to render one frame.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DisplayPayload {
    pub screen: Screen,
    pub tone: Tone,
    pub sound_enabled: bool,
    pub copy: crate::copy::CopyDeck,
    pub current: Option<Activity>,
    pub counts: EligibleCounts,
    pub history: Vec<HistoryEntry>,
    pub dots: DotSummary,
    pub filters: FilterSettings,
    /// Recoverable notices, e.g. the no-match invitation to relax filters.
    pub notice: Option<String>,
    /// True when the last spin only found a match after dropping the
    /// location constraint.
    pub location_relaxed: bool,
    /// Cosmetic fill percent, present only on the in-progress screen.
    pub progress_percent: Option<u8>,
}
