//! WhimEngine - the main entry point for whim clients.
//!
//! The engine owns the session and is the only thing that mutates it: every
//! presentation adapter raises [`Intent`]s through [`WhimEngine::apply`] and
//! renders the returned [`DisplayPayload`]. It is:
//!
//! - **Synchronous**: no async runtime. Catalog and copy resources are read
//!   (or substituted) during construction, so by the time any intent arrives
//!   the catalog is ready — there is nothing to queue.
//! - **Not thread-safe**: clients provide their own synchronization.
//! - **Gracefully degrading**: a missing catalog, copy resource, or session
//!   file falls back to placeholder/default values, never an error.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use whim_core::{Intent, WhimEngine};
//!
//! let mut engine = WhimEngine::new();
//! let payload = engine.apply(Intent::Spin);
//! println!("{:?}", payload.current);
//! ```

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::Catalog;
use crate::copy::CopyBook;
use crate::selection::{self, SelectionConfig};
use crate::state::{self, next_screen, Intent, Session};
use crate::stats;
use crate::storage::StorageConfig;
use crate::types::{DisplayPayload, Screen};

/// The main engine for whim operations.
pub struct WhimEngine {
    storage: StorageConfig,
    catalog: Catalog,
    copy: CopyBook,
    config: SelectionConfig,
    session: Session,
    rng: StdRng,
    /// Transient notice for the next frame (e.g. no-match). Never persisted.
    notice: Option<String>,
    /// Whether the last spin needed the location relaxation.
    location_relaxed: bool,
}

impl Default for WhimEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl WhimEngine {
    /// Creates an engine with default storage (`~/.whim/`), loading the
    /// catalog, copy decks, and persisted session from there.
    pub fn new() -> Self {
        Self::with_storage(StorageConfig::default())
    }

    /// Creates an engine rooted at a custom storage location.
    /// Tests inject a temp root here.
    pub fn with_storage(storage: StorageConfig) -> Self {
        let catalog = Catalog::load(&storage.catalog_file());
        let copy = CopyBook::load(&storage.copy_file());
        let session = state::load(&storage.session_file());
        Self::assemble(storage, catalog, copy, session)
    }

    /// Builds an engine from preloaded parts, for tests that need a
    /// hand-rolled catalog without touching disk.
    pub fn with_parts(storage: StorageConfig, catalog: Catalog, copy: CopyBook) -> Self {
        Self::assemble(storage, catalog, copy, Session::default())
    }

    fn assemble(storage: StorageConfig, catalog: Catalog, copy: CopyBook, session: Session) -> Self {
        tracing::info!(
            activities = catalog.len(),
            placeholder = catalog.is_placeholder(),
            "Engine ready"
        );
        WhimEngine {
            storage,
            catalog,
            copy,
            config: SelectionConfig::default(),
            session,
            rng: StdRng::from_entropy(),
            notice: None,
            location_relaxed: false,
        }
    }

    /// Reseeds the random source for deterministic runs.
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Overrides the selection constants.
    pub fn set_selection_config(&mut self, config: SelectionConfig) {
        self.config = config;
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Intent Handling
    // ─────────────────────────────────────────────────────────────────────────────

    /// Applies one presentation intent and returns the frame to render.
    ///
    /// Intents that do not apply on the current screen are ignored (logged at
    /// debug), so a stale client cannot corrupt the session.
    pub fn apply(&mut self, intent: Intent) -> DisplayPayload {
        self.notice = None;
        let now = Utc::now();

        match intent {
            Intent::Spin => self.spin(now),
            Intent::SpinAgain => {
                if self.navigate(&Intent::SpinAgain, now) {
                    self.discard_pick();
                }
            }
            Intent::Start => {
                // No mutation beyond the transition; the progress indicator
                // derives from the screen-change timestamp.
                self.navigate(&Intent::Start, now);
            }
            Intent::Complete => self.complete(now),
            Intent::Back => {
                let from = self.session.screen;
                if self.navigate(&Intent::Back, now) {
                    match from {
                        // Abandoned: not recorded as completed or failed.
                        Screen::InProgress => self.discard_pick(),
                        Screen::Done => self.discard_pick(),
                        Screen::Filters | Screen::Profile => self.session.modal_from = None,
                        _ => {}
                    }
                }
            }
            Intent::OpenFilters => {
                let from = self.session.screen;
                if self.navigate(&Intent::OpenFilters, now) {
                    self.session.modal_from = Some(from);
                }
            }
            Intent::OpenProfile => {
                let from = self.session.screen;
                if self.navigate(&Intent::OpenProfile, now) {
                    self.session.modal_from = Some(from);
                }
            }
            Intent::AdjustFilters(patch) => {
                patch.apply(&mut self.session.filters);
                self.persist();
            }
            Intent::SetSteering(hint) => {
                self.session.steering = hint;
            }
            Intent::SetTone(tone) => {
                self.session.tone = tone;
                self.persist();
            }
            Intent::ToggleSound => {
                self.session.sound_enabled = !self.session.sound_enabled;
                self.persist();
            }
            Intent::ToggleCommunityOnly => {
                self.session.filters.community_only = !self.session.filters.community_only;
                self.persist();
            }
            Intent::Reset => {
                self.session = Session::default();
                self.location_relaxed = false;
                self.persist();
            }
        }

        self.payload()
    }

    /// Moves the screen for a navigational intent. Returns false (and leaves
    /// everything untouched) when the intent does not apply here.
    fn navigate(&mut self, intent: &Intent, now: DateTime<Utc>) -> bool {
        match next_screen(self.session.screen, intent, self.session.modal_from) {
            Some(next) => {
                self.session.change_screen(next, now);
                true
            }
            None => {
                tracing::debug!(screen = ?self.session.screen, ?intent, "Ignoring intent");
                false
            }
        }
    }

    fn spin(&mut self, now: DateTime<Utc>) {
        if self.session.screen != Screen::Spin {
            tracing::debug!(screen = ?self.session.screen, "Ignoring spin off the spin screen");
            return;
        }

        let pick = selection::select(
            self.catalog.activities(),
            &self.session.filters,
            &self.session.history,
            self.session.steering,
            self.session.last_pick.as_ref(),
            &self.config,
            &mut self.rng,
        )
        .map(|pick| (pick.activity.clone(), pick.location_relaxed));

        // One spin consumes the hint, whether or not it biased anything.
        self.session.steering = None;

        match pick {
            Some((activity, relaxed)) => {
                self.session.current = Some(activity.clone());
                self.session.last_pick = Some(activity);
                self.location_relaxed = relaxed;
                self.session.change_screen(Screen::Activity, now);
                self.persist();
            }
            None => {
                // Recoverable: stay on the spin screen and invite the user
                // to loosen filters.
                tracing::debug!(error = %crate::error::WhimError::NoEligibleActivities, "Spin found nothing");
                self.notice = Some(self.copy.deck(self.session.tone).no_match_notice.clone());
                self.location_relaxed = false;
            }
        }
    }

    fn complete(&mut self, now: DateTime<Utc>) {
        if self.session.screen != Screen::InProgress {
            tracing::debug!(screen = ?self.session.screen, "Ignoring complete");
            return;
        }
        let Some(current) = self.session.current.clone() else {
            tracing::warn!("In progress with no current activity, ignoring complete");
            return;
        };
        self.session.record_completion(&current, now);
        self.session.change_screen(Screen::Done, now);
        self.persist();
    }

    fn discard_pick(&mut self) {
        self.session.current = None;
        self.location_relaxed = false;
    }

    fn persist(&self) {
        if let Err(err) = state::save(&self.storage.session_file(), &self.session) {
            // Data loss here is cosmetic; keep the session usable.
            tracing::warn!(error = %err, "Failed to persist session");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Display
    // ─────────────────────────────────────────────────────────────────────────────

    /// The current frame. Counts and dot statistics are recomputed from live
    /// state on every call.
    pub fn payload(&self) -> DisplayPayload {
        let now = Utc::now();
        DisplayPayload {
            screen: self.session.screen,
            tone: self.session.tone,
            sound_enabled: self.session.sound_enabled,
            copy: self.copy.deck(self.session.tone).clone(),
            current: self.session.current.clone(),
            counts: stats::eligible_counts(self.catalog.activities(), &self.session.filters),
            history: self.session.history.clone(),
            dots: stats::dot_summary(&self.session.dots, now.date_naive()),
            filters: self.session.filters.clone(),
            notice: self.notice.clone(),
            location_relaxed: self.location_relaxed,
            progress_percent: (self.session.screen == Screen::InProgress)
                .then(|| self.session.progress_percent(now)),
        }
    }
}
