//! The in-memory session record.

use chrono::{DateTime, Utc};

use crate::types::{
    Activity, DotEntry, FilterSettings, HistoryEntry, Screen, SteeringHint, Tone,
};

/// Most recent completions kept for display and recency exclusion.
pub const HISTORY_CAP: usize = 12;

/// Decorative dots kept for the profile screen.
pub const DOT_CAP: usize = 90;

/// The cosmetic progress bar advances one percent per tick of this length.
const PROGRESS_TICK_MS: i64 = 20;

/// The mutable root of a whim session.
///
/// `history` is ordered most-recent-first; `dots` in insertion order. Both
/// are FIFO-capped: oldest entries are evicted on overflow, no scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub tone: Tone,
    pub sound_enabled: bool,
    pub filters: FilterSettings,
    pub screen: Screen,
    pub screen_changed_at: DateTime<Utc>,
    /// Where a modal screen (Filters/Profile) was opened from, for `back`.
    pub modal_from: Option<Screen>,
    pub current: Option<Activity>,
    /// The most recent successful pick, kept even after the current pick is
    /// discarded. Steering hints compare energy against this.
    pub last_pick: Option<Activity>,
    /// One-shot selection bias, cleared by the next spin.
    pub steering: Option<SteeringHint>,
    pub history: Vec<HistoryEntry>,
    pub dots: Vec<DotEntry>,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            tone: Tone::default(),
            sound_enabled: true,
            filters: FilterSettings::default(),
            screen: Screen::Spin,
            screen_changed_at: Utc::now(),
            modal_from: None,
            current: None,
            last_pick: None,
            steering: None,
            history: Vec::new(),
            dots: Vec::new(),
        }
    }
}

impl Session {
    pub fn change_screen(&mut self, screen: Screen, at: DateTime<Utc>) {
        if self.screen != screen {
            self.screen = screen;
            self.screen_changed_at = at;
        }
    }

    /// Records a completion: prepends a history entry and appends a dot,
    /// evicting the oldest entries past the caps.
    pub fn record_completion(&mut self, activity: &Activity, at: DateTime<Utc>) {
        self.history.insert(0, HistoryEntry::for_activity(activity, at));
        self.history.truncate(HISTORY_CAP);

        self.dots.push(DotEntry {
            at,
            is_community: activity.is_community,
        });
        if self.dots.len() > DOT_CAP {
            let excess = self.dots.len() - DOT_CAP;
            self.dots.drain(..excess);
        }
    }

    /// Cosmetic fill percent for the in-progress screen: one percent per
    /// 20ms since the screen was entered, capped at 100. Display-only.
    pub fn progress_percent(&self, now: DateTime<Utc>) -> u8 {
        let elapsed = now.signed_duration_since(self.screen_changed_at);
        let ticks = elapsed.num_milliseconds().max(0) / PROGRESS_TICK_MS;
        ticks.min(100) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EffortTier, EnergyLevel, LocationAffinity, PlanningMode};
    use chrono::Duration;

    fn activity(id: &str, community: bool) -> Activity {
        Activity {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            minutes: 15,
            effort: EffortTier::Moderate,
            planning: PlanningMode::Immediate,
            energy: EnergyLevel::Any,
            identity_tag: String::new(),
            is_community: community,
            supports_solo: true,
            location: LocationAffinity::Either,
        }
    }

    #[test]
    fn test_history_is_most_recent_first() {
        let mut session = Session::default();
        session.record_completion(&activity("first", false), Utc::now());
        session.record_completion(&activity("second", false), Utc::now());
        assert_eq!(session.history[0].id, "second");
        assert_eq!(session.history[1].id, "first");
    }

    #[test]
    fn test_history_cap_evicts_oldest() {
        let mut session = Session::default();
        for i in 0..(HISTORY_CAP + 3) {
            session.record_completion(&activity(&format!("a{i}"), false), Utc::now());
        }
        assert_eq!(session.history.len(), HISTORY_CAP);
        // Most recent retained in order, earliest gone.
        assert_eq!(session.history[0].id, format!("a{}", HISTORY_CAP + 2));
        assert!(session.history.iter().all(|e| e.id != "a0"));
        assert!(session.history.iter().all(|e| e.id != "a2"));
    }

    #[test]
    fn test_dot_cap_evicts_oldest_fifo() {
        let mut session = Session::default();
        let base = Utc::now();
        for i in 0..(DOT_CAP + 5) {
            session.record_completion(
                &activity(&format!("a{i}"), false),
                base + Duration::seconds(i as i64),
            );
        }
        assert_eq!(session.dots.len(), DOT_CAP);
        // The oldest five were evicted, so the first remaining dot is #5.
        assert_eq!(session.dots[0].at, base + Duration::seconds(5));
    }

    #[test]
    fn test_dot_records_community_flag() {
        let mut session = Session::default();
        session.record_completion(&activity("c", true), Utc::now());
        assert!(session.dots[0].is_community);
    }

    #[test]
    fn test_change_screen_updates_timestamp_only_on_change() {
        let mut session = Session::default();
        let t1 = Utc::now();
        session.change_screen(Screen::Activity, t1);
        assert_eq!(session.screen_changed_at, t1);
        let t2 = t1 + Duration::seconds(5);
        session.change_screen(Screen::Activity, t2);
        assert_eq!(session.screen_changed_at, t1);
    }

    #[test]
    fn test_progress_advances_one_percent_per_tick() {
        let mut session = Session::default();
        let start = Utc::now();
        session.change_screen(Screen::InProgress, start);
        assert_eq!(session.progress_percent(start), 0);
        assert_eq!(
            session.progress_percent(start + Duration::milliseconds(400)),
            20
        );
        assert_eq!(
            session.progress_percent(start + Duration::milliseconds(2000)),
            100
        );
    }

    #[test]
    fn test_progress_caps_at_one_hundred() {
        let mut session = Session::default();
        let start = Utc::now();
        session.change_screen(Screen::InProgress, start);
        assert_eq!(session.progress_percent(start + Duration::hours(1)), 100);
    }

    #[test]
    fn test_progress_never_negative() {
        let session = Session::default();
        let past = session.screen_changed_at - Duration::seconds(10);
        assert_eq!(session.progress_percent(past), 0);
    }
}
