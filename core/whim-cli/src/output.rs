//! Renders a display payload for the terminal.

use whim_core::{DisplayPayload, Screen};

pub fn render(payload: &DisplayPayload, json: bool) {
    if json {
        match serde_json::to_string_pretty(payload) {
            Ok(text) => println!("{text}"),
            Err(err) => tracing::error!(error = %err, "Failed to serialize payload"),
        }
        return;
    }

    match payload.screen {
        Screen::Spin => render_spin(payload),
        Screen::Activity => render_activity(payload),
        Screen::InProgress => render_in_progress(payload),
        Screen::Done => render_done(payload),
        Screen::Filters => render_filters(payload),
        Screen::Profile => render_profile(payload),
    }

    if let Some(notice) = &payload.notice {
        println!();
        println!("! {notice}");
    }
}

fn render_spin(payload: &DisplayPayload) {
    println!("{}", payload.copy.spin_prompt);
    println!(
        "  {} eligible ({} everyday, {} community)",
        payload.counts.total, payload.counts.core_count, payload.counts.community_count
    );
}

fn render_activity(payload: &DisplayPayload) {
    println!("{}", payload.copy.pick_lead);
    if let Some(activity) = &payload.current {
        println!();
        println!("  {}", activity.title);
        if !activity.description.is_empty() {
            println!("  {}", activity.description);
        }
        println!(
            "  ~{} min · {:?} effort · {:?} energy",
            activity.minutes, activity.effort, activity.energy
        );
        if payload.location_relaxed {
            println!("  (stretched your location preference to find this)");
        }
        println!();
        println!("  [{}]", payload.copy.start_label);
    }
}

fn render_in_progress(payload: &DisplayPayload) {
    if let Some(activity) = &payload.current {
        println!("{} — {}", payload.copy.progress_label, activity.title);
    } else {
        println!("{}", payload.copy.progress_label);
    }
    let percent = payload.progress_percent.unwrap_or(0);
    let filled = (percent as usize) / 5;
    println!("  [{}{}] {percent}%", "#".repeat(filled), "-".repeat(20 - filled));
}

fn render_done(payload: &DisplayPayload) {
    println!("{}", payload.copy.done_cheer);
    println!(
        "  {} dots so far · {} day streak",
        payload.dots.total, payload.dots.day_streak
    );
}

fn render_filters(payload: &DisplayPayload) {
    println!("Filters");
    let filters = &payload.filters;
    match filters.max_minutes {
        Some(minutes) => println!("  max minutes: {minutes}"),
        None => println!("  max minutes: any"),
    }
    match filters.max_effort {
        Some(effort) => println!("  max effort: {effort:?}"),
        None => println!("  max effort: any"),
    }
    match filters.planning {
        Some(planning) => println!("  planning: {planning:?}"),
        None => println!("  planning: any"),
    }
    match filters.energy {
        Some(energy) => println!("  energy: {energy:?}"),
        None => println!("  energy: any"),
    }
    match filters.location {
        Some(location) => println!("  location: {location:?}"),
        None => println!("  location: any"),
    }
    println!("  solo only: {}", filters.solo_only);
    println!("  community only: {}", filters.community_only);
    println!(
        "  matching now: {} ({} everyday, {} community)",
        payload.counts.total, payload.counts.core_count, payload.counts.community_count
    );
}

fn render_profile(payload: &DisplayPayload) {
    println!("{}", payload.copy.profile_title);
    println!(
        "  {} dots · {} community · {} day streak",
        payload.dots.total, payload.dots.community, payload.dots.day_streak
    );
    if payload.history.is_empty() {
        println!("  nothing finished yet");
        return;
    }
    println!("  recent:");
    for entry in &payload.history {
        println!(
            "    {} · {:?} · {}",
            entry.title,
            entry.duration,
            entry.completed_at.format("%b %d")
        );
    }
}
