//! The eligibility predicate and pool partitioning.
//!
//! `eligible` is pure: same activity + same filters always gives the same
//! answer. Everything the selection policy consumes is derived from it.

use crate::types::{Activity, EnergyLevel, FilterSettings, LocationAffinity};

/// Returns true when `activity` passes every constraint in `filters`.
pub fn eligible(activity: &Activity, filters: &FilterSettings) -> bool {
    if let Some(max) = filters.max_minutes {
        if activity.minutes > max {
            return false;
        }
    }
    if let Some(max) = filters.max_effort {
        if activity.effort > max {
            return false;
        }
    }
    if let Some(required) = filters.planning {
        if activity.planning != required {
            return false;
        }
    }
    if let Some(required) = filters.energy {
        // `Any` in the filter is no constraint; `Any` on the activity fits
        // every requirement.
        if required != EnergyLevel::Any
            && activity.energy != EnergyLevel::Any
            && activity.energy != required
        {
            return false;
        }
    }
    if filters.community_only && !activity.is_community {
        return false;
    }
    if filters.solo_only && !activity.supports_solo {
        return false;
    }
    if let Some(preference) = filters.location {
        if activity.location != preference && activity.location != LocationAffinity::Either {
            return false;
        }
    }
    true
}

/// The eligible subset of a catalog, partitioned into core and community.
#[derive(Debug, Default)]
pub struct EligiblePool<'a> {
    pub core: Vec<&'a Activity>,
    pub community: Vec<&'a Activity>,
}

impl<'a> EligiblePool<'a> {
    pub fn is_empty(&self) -> bool {
        self.core.is_empty() && self.community.is_empty()
    }

    pub fn total(&self) -> usize {
        self.core.len() + self.community.len()
    }
}

/// Partitions `catalog` into eligible core/community subsets.
pub fn eligible_pool<'a>(catalog: &'a [Activity], filters: &FilterSettings) -> EligiblePool<'a> {
    let mut pool = EligiblePool::default();
    for activity in catalog {
        if !eligible(activity, filters) {
            continue;
        }
        if activity.is_community {
            pool.community.push(activity);
        } else {
            pool.core.push(activity);
        }
    }
    pool
}

/// Partitions with the single automatic relaxation: if the full filters yield
/// nothing and a location preference is set, retry with location dropped.
/// Returns the pool and whether the relaxed pass was used.
pub fn eligible_pool_relaxed<'a>(
    catalog: &'a [Activity],
    filters: &FilterSettings,
) -> (EligiblePool<'a>, bool) {
    let pool = eligible_pool(catalog, filters);
    if !pool.is_empty() || filters.location.is_none() {
        return (pool, false);
    }
    let relaxed = FilterSettings {
        location: None,
        ..filters.clone()
    };
    let pool = eligible_pool(catalog, &relaxed);
    let used = !pool.is_empty();
    (pool, used)
}
