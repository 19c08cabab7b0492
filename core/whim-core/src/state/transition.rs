//! Maps presentation intents to screen transitions.
//!
//! `next_screen` is the pure navigational skeleton: it answers "where does
//! this intent lead from here", and nothing else. Effects (selection, history
//! appends, persistence) are layered on by the engine. Invalid pairs yield
//! `None` so ambiguous input never moves the screen.

use crate::types::{FilterPatch, Screen, SteeringHint, Tone};

/// Everything a presentation adapter can raise against the core.
/// Each intent maps to exactly one state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Pick an activity and show it.
    Spin,
    /// Discard the current pick and return to the spin screen.
    SpinAgain,
    /// Begin the current activity.
    Start,
    /// Finish the in-progress activity, recording it.
    Complete,
    /// Leave the current screen; abandons an in-progress activity.
    Back,
    /// Open the filters modal.
    OpenFilters,
    /// Open the profile modal.
    OpenProfile,
    AdjustFilters(FilterPatch),
    SetSteering(Option<SteeringHint>),
    SetTone(Tone),
    ToggleSound,
    ToggleCommunityOnly,
    /// Restore the default session.
    Reset,
}

/// The next screen for a navigational intent, or `None` when the intent does
/// not move the screen (either it is a setting intent, or it does not apply
/// where the session currently is).
///
/// `origin` is where the open modal was entered from; `back` returns there.
/// A spin is assumed successful — the engine stays on Spin itself when
/// selection comes up empty.
pub fn next_screen(current: Screen, intent: &Intent, origin: Option<Screen>) -> Option<Screen> {
    match (current, intent) {
        (Screen::Spin, Intent::Spin) => Some(Screen::Activity),
        (Screen::Spin, Intent::OpenFilters) => Some(Screen::Filters),
        (Screen::Spin, Intent::OpenProfile) => Some(Screen::Profile),

        (Screen::Activity, Intent::SpinAgain) => Some(Screen::Spin),
        (Screen::Activity, Intent::Start) => Some(Screen::InProgress),
        (Screen::Activity, Intent::OpenFilters) => Some(Screen::Filters),

        (Screen::InProgress, Intent::Back) => Some(Screen::Spin),
        (Screen::InProgress, Intent::Complete) => Some(Screen::Done),

        (Screen::Done, Intent::Back | Intent::SpinAgain) => Some(Screen::Spin),

        (Screen::Filters | Screen::Profile, Intent::Back) => Some(origin.unwrap_or(Screen::Spin)),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spin_leads_to_activity() {
        assert_eq!(
            next_screen(Screen::Spin, &Intent::Spin, None),
            Some(Screen::Activity)
        );
    }

    #[test]
    fn test_spin_is_rejected_off_the_spin_screen() {
        for screen in [Screen::Activity, Screen::InProgress, Screen::Done, Screen::Filters] {
            assert_eq!(next_screen(screen, &Intent::Spin, None), None);
        }
    }

    #[test]
    fn test_activity_cycle() {
        assert_eq!(
            next_screen(Screen::Activity, &Intent::Start, None),
            Some(Screen::InProgress)
        );
        assert_eq!(
            next_screen(Screen::InProgress, &Intent::Complete, None),
            Some(Screen::Done)
        );
        assert_eq!(
            next_screen(Screen::Done, &Intent::Back, None),
            Some(Screen::Spin)
        );
    }

    #[test]
    fn test_spin_again_discards_from_activity_and_done() {
        assert_eq!(
            next_screen(Screen::Activity, &Intent::SpinAgain, None),
            Some(Screen::Spin)
        );
        assert_eq!(
            next_screen(Screen::Done, &Intent::SpinAgain, None),
            Some(Screen::Spin)
        );
    }

    #[test]
    fn test_back_abandons_in_progress() {
        assert_eq!(
            next_screen(Screen::InProgress, &Intent::Back, None),
            Some(Screen::Spin)
        );
    }

    #[test]
    fn test_filters_modal_returns_to_origin() {
        assert_eq!(
            next_screen(Screen::Filters, &Intent::Back, Some(Screen::Activity)),
            Some(Screen::Activity)
        );
        assert_eq!(
            next_screen(Screen::Filters, &Intent::Back, Some(Screen::Spin)),
            Some(Screen::Spin)
        );
    }

    #[test]
    fn test_modal_back_defaults_to_spin_without_origin() {
        assert_eq!(
            next_screen(Screen::Profile, &Intent::Back, None),
            Some(Screen::Spin)
        );
    }

    #[test]
    fn test_filters_opens_from_spin_and_activity() {
        assert_eq!(
            next_screen(Screen::Spin, &Intent::OpenFilters, None),
            Some(Screen::Filters)
        );
        assert_eq!(
            next_screen(Screen::Activity, &Intent::OpenFilters, None),
            Some(Screen::Filters)
        );
    }

    #[test]
    fn test_profile_opens_only_from_spin() {
        assert_eq!(
            next_screen(Screen::Spin, &Intent::OpenProfile, None),
            Some(Screen::Profile)
        );
        assert_eq!(next_screen(Screen::Activity, &Intent::OpenProfile, None), None);
    }

    #[test]
    fn test_setting_intents_never_move_the_screen() {
        for screen in [Screen::Spin, Screen::Activity, Screen::Filters] {
            assert_eq!(next_screen(screen, &Intent::ToggleSound, None), None);
            assert_eq!(
                next_screen(screen, &Intent::SetTone(Tone::Coach), None),
                None
            );
            assert_eq!(
                next_screen(
                    screen,
                    &Intent::AdjustFilters(FilterPatch::default()),
                    None
                ),
                None
            );
        }
    }

    #[test]
    fn test_start_requires_activity_screen() {
        assert_eq!(next_screen(Screen::Spin, &Intent::Start, None), None);
        assert_eq!(next_screen(Screen::Done, &Intent::Start, None), None);
    }
}
