//! Display statistics derived from the dot log and the catalog.
//!
//! Everything here is recomputed on demand from live state — the done screen
//! must reflect the filters as they are now, not a snapshot taken when the
//! activity was picked.

use chrono::{Duration, NaiveDate};

use crate::filter::eligible_pool;
use crate::types::{Activity, DotEntry, DotSummary, EligibleCounts, FilterSettings};

/// The streak only looks back over this many trailing days.
const STREAK_WINDOW_DAYS: u32 = 7;

/// Aggregates the dot log for the profile screen. `today` is injected so
/// tests can pin the clock.
pub fn dot_summary(dots: &[DotEntry], today: NaiveDate) -> DotSummary {
    DotSummary {
        total: dots.len() as u32,
        community: dots.iter().filter(|d| d.is_community).count() as u32,
        day_streak: day_streak(dots, today),
    }
}

/// Consecutive calendar days ending `today` with at least one dot, evaluated
/// over a trailing 7-day window (so the streak caps at 7).
pub fn day_streak(dots: &[DotEntry], today: NaiveDate) -> u32 {
    let days: std::collections::HashSet<NaiveDate> =
        dots.iter().map(|d| d.at.date_naive()).collect();

    let mut streak = 0;
    for offset in 0..STREAK_WINDOW_DAYS {
        let day = today - Duration::days(offset as i64);
        if days.contains(&day) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// How many catalog activities pass the current filters, split by pool.
pub fn eligible_counts(catalog: &[Activity], filters: &FilterSettings) -> EligibleCounts {
    let pool = eligible_pool(catalog, filters);
    EligibleCounts {
        total: pool.total() as u32,
        core_count: pool.core.len() as u32,
        community_count: pool.community.len() as u32,
    }
}
