//! whim: CLI presentation adapter for the whim picker core.
//!
//! Each subcommand raises exactly one intent against the engine, renders the
//! resulting frame, and exits. Session state lives in `~/.whim/session.json`
//! between invocations, which keeps the event model honest: one intent at a
//! time, run to completion.

mod output;

use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use whim_core::{
    EffortTier, EnergyLevel, FilterPatch, Intent, LocationAffinity, PlanningMode, StorageConfig,
    SteeringHint, Tone, WhimEngine,
};

#[derive(Parser)]
#[command(name = "whim")]
#[command(about = "Spin for your next activity")]
#[command(version)]
struct Cli {
    /// Storage root override (default: ~/.whim)
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Print the raw display payload as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Spin the wheel for an activity
    Spin,
    /// Discard the current pick and return to the spin screen
    Again,
    /// Start the current activity
    Start,
    /// Finish the in-progress activity and earn a dot
    Done,
    /// Go back (abandons an in-progress activity)
    Back,
    /// Open the filters screen
    Filters,
    /// Open the profile screen
    Profile,
    /// Adjust filters; only the options you pass change
    Filter {
        /// Longest acceptable activity, in minutes
        #[arg(long)]
        max_minutes: Option<u32>,
        /// Highest acceptable effort tier
        #[arg(long)]
        max_effort: Option<EffortArg>,
        /// Required planning mode
        #[arg(long)]
        planning: Option<PlanningArg>,
        /// Required energy level
        #[arg(long)]
        energy: Option<EnergyArg>,
        /// Location preference
        #[arg(long)]
        location: Option<LocationArg>,
        /// Only activities doable solo
        #[arg(long)]
        solo_only: Option<bool>,
        /// Drop every constraint
        #[arg(long)]
        clear: bool,
    },
    /// Nudge the next spin
    Steer {
        hint: HintArg,
    },
    /// Switch the copy voice
    Tone {
        tone: ToneArg,
    },
    /// Toggle sound effects
    Sound,
    /// Toggle community-only mode
    Community,
    /// Wipe the session back to defaults
    Reset,
    /// Show the current screen without raising an intent
    Status,
}

#[derive(Clone, Copy, ValueEnum)]
enum EffortArg {
    Light,
    Moderate,
    Demanding,
}

impl From<EffortArg> for EffortTier {
    fn from(arg: EffortArg) -> Self {
        match arg {
            EffortArg::Light => EffortTier::Light,
            EffortArg::Moderate => EffortTier::Moderate,
            EffortArg::Demanding => EffortTier::Demanding,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PlanningArg {
    Immediate,
    Prepared,
    Scheduled,
}

impl From<PlanningArg> for PlanningMode {
    fn from(arg: PlanningArg) -> Self {
        match arg {
            PlanningArg::Immediate => PlanningMode::Immediate,
            PlanningArg::Prepared => PlanningMode::Prepared,
            PlanningArg::Scheduled => PlanningMode::Scheduled,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum EnergyArg {
    Any,
    Low,
    Medium,
    High,
}

impl From<EnergyArg> for EnergyLevel {
    fn from(arg: EnergyArg) -> Self {
        match arg {
            EnergyArg::Any => EnergyLevel::Any,
            EnergyArg::Low => EnergyLevel::Low,
            EnergyArg::Medium => EnergyLevel::Medium,
            EnergyArg::High => EnergyLevel::High,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LocationArg {
    Indoor,
    Outdoor,
    Either,
}

impl From<LocationArg> for LocationAffinity {
    fn from(arg: LocationArg) -> Self {
        match arg {
            LocationArg::Indoor => LocationAffinity::Indoor,
            LocationArg::Outdoor => LocationAffinity::Outdoor,
            LocationArg::Either => LocationAffinity::Either,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum HintArg {
    /// Stay near the current activity's energy level
    Keep,
    /// Go for a different energy level
    Switch,
    /// Explicitly unbiased pick
    Surprise,
    /// Clear a pending hint
    Off,
}

impl From<HintArg> for Option<SteeringHint> {
    fn from(arg: HintArg) -> Self {
        match arg {
            HintArg::Keep => Some(SteeringHint::KeepEnergy),
            HintArg::Switch => Some(SteeringHint::SwitchEnergy),
            HintArg::Surprise => Some(SteeringHint::Surprise),
            HintArg::Off => None,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ToneArg {
    Gentle,
    Coach,
    Playful,
}

impl From<ToneArg> for Tone {
    fn from(arg: ToneArg) -> Self {
        match arg {
            ToneArg::Gentle => Tone::Gentle,
            ToneArg::Coach => Tone::Coach,
            ToneArg::Playful => Tone::Playful,
        }
    }
}

fn init_logging() {
    let debug_enabled = env::var("WHIM_DEBUG_LOG")
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false);
    let filter = if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    // Logs to stderr so the payload on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn filter_patch(
    max_minutes: Option<u32>,
    max_effort: Option<EffortArg>,
    planning: Option<PlanningArg>,
    energy: Option<EnergyArg>,
    location: Option<LocationArg>,
    solo_only: Option<bool>,
    clear: bool,
) -> FilterPatch {
    if clear {
        return FilterPatch {
            max_minutes: Some(None),
            max_effort: Some(None),
            planning: Some(None),
            energy: Some(None),
            location: Some(None),
            solo_only: Some(false),
            community_only: Some(false),
        };
    }
    FilterPatch {
        max_minutes: max_minutes.map(Some),
        max_effort: max_effort.map(|v| Some(v.into())),
        planning: planning.map(|v| Some(v.into())),
        energy: energy.map(|v| Some(v.into())),
        location: location.map(|v| Some(v.into())),
        solo_only,
        community_only: None,
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let storage = match cli.root {
        Some(root) => StorageConfig::with_root(root),
        None => StorageConfig::default(),
    };
    let mut engine = WhimEngine::with_storage(storage);

    let payload = match cli.command {
        Commands::Spin => engine.apply(Intent::Spin),
        Commands::Again => engine.apply(Intent::SpinAgain),
        Commands::Start => engine.apply(Intent::Start),
        Commands::Done => engine.apply(Intent::Complete),
        Commands::Back => engine.apply(Intent::Back),
        Commands::Filters => engine.apply(Intent::OpenFilters),
        Commands::Profile => engine.apply(Intent::OpenProfile),
        Commands::Filter {
            max_minutes,
            max_effort,
            planning,
            energy,
            location,
            solo_only,
            clear,
        } => engine.apply(Intent::AdjustFilters(filter_patch(
            max_minutes,
            max_effort,
            planning,
            energy,
            location,
            solo_only,
            clear,
        ))),
        Commands::Steer { hint } => engine.apply(Intent::SetSteering(hint.into())),
        Commands::Tone { tone } => engine.apply(Intent::SetTone(tone.into())),
        Commands::Sound => engine.apply(Intent::ToggleSound),
        Commands::Community => engine.apply(Intent::ToggleCommunityOnly),
        Commands::Reset => engine.apply(Intent::Reset),
        Commands::Status => engine.payload(),
    };

    output::render(&payload, cli.json);
}
