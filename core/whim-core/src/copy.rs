//! Tone-keyed copy decks.
//!
//! Every tone maps to a fixed `CopyDeck` record, so clients never render
//! empty text. An optional copy resource can override decks per tone; it is
//! validated field-by-field at load and anything missing or mistyped falls
//! back to the default tone's built-in value.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::types::Tone;

/// The fixed copy shape every screen pulls from. All fields required.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CopyDeck {
    pub spin_prompt: String,
    pub no_match_notice: String,
    pub pick_lead: String,
    pub start_label: String,
    pub progress_label: String,
    pub done_cheer: String,
    pub profile_title: String,
}

const DECK_FIELDS: [&str; 7] = [
    "spin_prompt",
    "no_match_notice",
    "pick_lead",
    "start_label",
    "progress_label",
    "done_cheer",
    "profile_title",
];

fn deck(fields: [&str; 7]) -> CopyDeck {
    CopyDeck {
        spin_prompt: fields[0].to_string(),
        no_match_notice: fields[1].to_string(),
        pick_lead: fields[2].to_string(),
        start_label: fields[3].to_string(),
        progress_label: fields[4].to_string(),
        done_cheer: fields[5].to_string(),
        profile_title: fields[6].to_string(),
    }
}

static BUILTIN: Lazy<HashMap<Tone, CopyDeck>> = Lazy::new(|| {
    HashMap::from([
        (
            Tone::Gentle,
            deck([
                "Give the wheel a spin when you're ready.",
                "Nothing fits those filters just now. Loosening one might help.",
                "How about this?",
                "Start when it feels right",
                "Take your time",
                "Lovely. That's one more dot.",
                "Your little collection",
            ]),
        ),
        (
            Tone::Coach,
            deck([
                "Spin it. Let's find your next move.",
                "Zero matches. Relax a filter and go again.",
                "Here's your assignment:",
                "Start now",
                "Keep pushing",
                "Done. Dot earned.",
                "Your scoreboard",
            ]),
        ),
        (
            Tone::Playful,
            deck([
                "Wheeeeel, what'll it be?",
                "The wheel came up empty. Maybe ease off a filter?",
                "Ooh, the wheel says:",
                "Let's gooo",
                "Doing the thing...",
                "Ta-da! Another dot for the jar.",
                "Dot museum",
            ]),
        ),
    ])
});

/// All decks for all tones, overrides applied.
#[derive(Debug, Clone)]
pub struct CopyBook {
    decks: HashMap<Tone, CopyDeck>,
}

impl Default for CopyBook {
    fn default() -> Self {
        CopyBook {
            decks: BUILTIN.clone(),
        }
    }
}

impl CopyBook {
    /// Loads the copy book from `path`, falling back to the built-in decks
    /// when the file is absent or unusable. Overrides apply per field.
    pub fn load(path: &Path) -> CopyBook {
        let payload = match fs_err::read_to_string(path) {
            Ok(payload) => payload,
            Err(_) => return CopyBook::default(),
        };
        match serde_json::from_str::<serde_json::Value>(&payload) {
            Ok(value) => CopyBook::from_value(&value),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "Copy resource malformed, using built-in decks"
                );
                CopyBook::default()
            }
        }
    }

    /// Builds a book from a parsed override payload shaped
    /// `{ "<tone>": { "<field>": "<text>", ... }, ... }`.
    /// Unknown tones and non-string fields are dropped silently.
    pub fn from_value(value: &serde_json::Value) -> CopyBook {
        let mut book = CopyBook::default();
        let Some(tones) = value.as_object() else {
            return book;
        };
        for (key, overrides) in tones {
            let Ok(tone) = serde_json::from_value::<Tone>(serde_json::Value::String(key.clone()))
            else {
                tracing::debug!(tone = %key, "Ignoring unknown tone in copy resource");
                continue;
            };
            let Some(fields) = overrides.as_object() else {
                continue;
            };
            let Some(deck) = book.decks.get_mut(&tone) else {
                continue;
            };
            for field in DECK_FIELDS {
                let Some(text) = fields.get(field).and_then(|v| v.as_str()) else {
                    continue;
                };
                match field {
                    "spin_prompt" => deck.spin_prompt = text.to_string(),
                    "no_match_notice" => deck.no_match_notice = text.to_string(),
                    "pick_lead" => deck.pick_lead = text.to_string(),
                    "start_label" => deck.start_label = text.to_string(),
                    "progress_label" => deck.progress_label = text.to_string(),
                    "done_cheer" => deck.done_cheer = text.to_string(),
                    "profile_title" => deck.profile_title = text.to_string(),
                    _ => {}
                }
            }
        }
        book
    }

    /// The deck for `tone`. Falls back to the default tone's deck if a tone
    /// is somehow absent.
    pub fn deck(&self, tone: Tone) -> &CopyDeck {
        self.decks
            .get(&tone)
            .or_else(|| self.decks.get(&Tone::default()))
            .expect("built-in decks cover every tone")
    }
}
