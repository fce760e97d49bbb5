//! `circle demo`: a scripted walkthrough of the whole API.
//!
//! Builds a five-profile network (two of them named "Alex"), links four
//! friendships, asks for suggestions, renames one profile, removes another,
//! and prints the state after each step.

use std::io::{self, Write};

use anyhow::Result;
use circle_core::config::NetworkConfig;
use circle_core::{NetworkError, ProfileUpdate, SocialNetwork, UserId};
use serde::Serialize;
use tracing::info;

use super::view::{FriendRef, ProfileView, SuggestionView};
use crate::output::{OutputMode, Renderable, pretty_section, render_mode};

const PROFILES: [(&str, &str, &str); 5] = [
    ("Alex", "alex@wvc.edu", "408-111-2222"),
    ("Alex", "alex2@wvc.edu", "650-222-3333"),
    ("Bella", "bella@wvc.edu", "415-333-4444"),
    ("Carlos", "carlos@wvc.edu", "408-444-5555"),
    ("Diana", "diana@wvc.edu", "408-555-6666"),
];

/// Everything the walkthrough observed, in order.
#[derive(Debug, Serialize)]
pub struct DemoReport {
    pub created: Vec<ProfileView>,
    pub friendships: Vec<(FriendRef, FriendRef)>,
    pub friends_of_alex: Vec<FriendRef>,
    pub friends_of_bella: Vec<FriendRef>,
    pub suggestions_for_alex: Vec<SuggestionView>,
    pub updated: ProfileView,
    pub removed: FriendRef,
    pub friends_after_removal: Vec<FriendRef>,
    pub final_profiles: Vec<ProfileView>,
}

/// Run the walkthrough and print it to stdout.
///
/// # Errors
///
/// Returns an error if a scripted call fails or stdout cannot be written.
pub fn run_demo(config: NetworkConfig, mode: OutputMode) -> Result<()> {
    let report = build_report(config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, mode, &report)
}

/// Render `report` in the requested mode.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_report(w: &mut dyn Write, mode: OutputMode, report: &DemoReport) -> Result<()> {
    render_mode(
        w,
        mode,
        report,
        |r, w| narrate(r, w, text_heading),
        |r, w| narrate(r, w, pretty_section),
    )
}

/// Drive the scripted calls against a fresh network.
///
/// # Errors
///
/// Propagates any [`NetworkError`]; none is expected for the fixed script.
pub fn build_report(config: NetworkConfig) -> Result<DemoReport, NetworkError> {
    let mut net = SocialNetwork::with_config(config);

    let mut ids = Vec::with_capacity(PROFILES.len());
    for (name, email, phone) in PROFILES {
        ids.push(net.add_profile(name, email, phone)?.id());
    }
    let [alex, _alex2, bella, carlos, diana] = [ids[0], ids[1], ids[2], ids[3], ids[4]];
    let created = ProfileView::all(&net);

    let pairs = [(alex, bella), (alex, carlos), (bella, diana), (carlos, diana)];
    for (a, b) in pairs {
        net.add_friendship(a, b)?;
    }
    let friendships = pairs
        .iter()
        .map(|&(a, b)| (friend_ref(&net, a), friend_ref(&net, b)))
        .collect();
    let friends_of_alex = friends(&net, alex)?;
    let friends_of_bella = friends(&net, bella)?;

    let suggestions_for_alex = net
        .suggest_friends(alex)?
        .iter()
        .map(SuggestionView::from)
        .collect();

    let update = ProfileUpdate::new()
        .name("Alexander")
        .email("alexander@wvc.edu");
    let renamed = net.update_profile(alex, &update)?.clone();
    let updated = ProfileView::capture(&net, &renamed);

    let removed = friend_ref(&net, bella);
    net.remove_profile(bella)?;
    let friends_after_removal = friends(&net, alex)?;

    info!(
        profiles = net.len(),
        friendships = net.friendship_count(),
        "demo finished"
    );

    Ok(DemoReport {
        created,
        friendships,
        friends_of_alex,
        friends_of_bella,
        suggestions_for_alex,
        updated,
        removed,
        friends_after_removal,
        final_profiles: ProfileView::all(&net),
    })
}

fn friend_ref(net: &SocialNetwork, id: UserId) -> FriendRef {
    FriendRef {
        id,
        name: net
            .profile(id)
            .map(|p| p.name().to_string())
            .unwrap_or_default(),
    }
}

fn friends(net: &SocialNetwork, id: UserId) -> Result<Vec<FriendRef>, NetworkError> {
    Ok(net
        .get_friends(id)?
        .into_iter()
        .map(|p| FriendRef {
            id: p.id(),
            name: p.name().to_string(),
        })
        .collect())
}

fn text_heading(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "## {heading}")
}

fn write_friends(w: &mut dyn Write, friends: &[FriendRef]) -> io::Result<()> {
    if friends.is_empty() {
        return writeln!(w, "  (none)");
    }
    for f in friends {
        writeln!(w, "  -> {} (id={})", f.name, f.id)?;
    }
    Ok(())
}

fn narrate(
    r: &DemoReport,
    w: &mut dyn Write,
    heading: fn(&mut dyn Write, &str) -> io::Result<()>,
) -> io::Result<()> {
    heading(w, "1. Creating Profiles")?;
    writeln!(w, "Profiles created:")?;
    for p in &r.created {
        writeln!(w, "  id={}: {}, {}, {}", p.id, p.name, p.email, p.phone)?;
    }

    heading(w, "2. Creating Friendships")?;
    for (a, b) in &r.friendships {
        writeln!(
            w,
            "Friendship created between {} (id={}) and {} (id={}).",
            a.name, a.id, b.name, b.id
        )?;
    }
    if let Some(alex) = r.created.first() {
        writeln!(w, "\nFriends of {} (id={}):", alex.name, alex.id)?;
        write_friends(w, &r.friends_of_alex)?;
    }
    writeln!(w, "\nFriends of {} (id={}):", r.removed.name, r.removed.id)?;
    write_friends(w, &r.friends_of_bella)?;

    heading(w, "3. Friend Suggestions")?;
    if let Some(alex) = r.created.first() {
        writeln!(w, "Suggested friends for {} (id={}):", alex.name, alex.id)?;
    }
    if r.suggestions_for_alex.is_empty() {
        writeln!(w, "  (no suggestions)")?;
    }
    for s in &r.suggestions_for_alex {
        writeln!(
            w,
            "  -> {} (id={}), {} mutual friends",
            s.name, s.id, s.mutual_friends
        )?;
    }

    heading(w, "4. Updating a Profile")?;
    writeln!(
        w,
        "Updating profile id={} to name '{}' and email '{}'...",
        r.updated.id, r.updated.name, r.updated.email
    )?;
    writeln!(w, "New profile details:")?;
    r.updated.render_human(w)?;

    heading(w, "5. Removing a Profile")?;
    writeln!(w, "Removing {} (id={})...", r.removed.name, r.removed.id)?;
    writeln!(
        w,
        "\nCurrent friends of {} (id={}) after removal:",
        r.updated.name, r.updated.id
    )?;
    write_friends(w, &r.friends_after_removal)?;

    heading(w, "6. Final State of All Profiles")?;
    for p in &r.final_profiles {
        p.render_human(w)?;
    }

    writeln!(w, "Demo complete.")
}
