//! Static community directory.
//!
//! There is no live membership data: the six featured communities are built
//! once per process and only ever read afterwards.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

use crate::types::Community;

pub const DEFAULT_COMMUNITY: &str = "nosleep";

const FEATURED: [(&str, &str, u64, u64); 6] = [
    (
        "nosleep",
        "A place for authors to share original horror stories",
        17_400_000,
        5_200,
    ),
    (
        "LetsNotMeet",
        "True scary stories about real people",
        1_800_000,
        1_200,
    ),
    (
        "creepyencounters",
        "Unsettling encounters that left you feeling uneasy",
        450_000,
        800,
    ),
    (
        "Glitch_in_the_Matrix",
        "Eye-witness accounts of inexplicable events",
        680_000,
        950,
    ),
    (
        "TrueScaryStories",
        "True accounts of frightening experiences",
        320_000,
        600,
    ),
    (
        "shortscarystories",
        "Short scary stories under 500 words",
        1_100_000,
        2_100,
    ),
];

static LOADED_AT: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

static COMMUNITIES: Lazy<Vec<Community>> = Lazy::new(|| {
    FEATURED
        .iter()
        .enumerate()
        .map(|(index, (name, description, members, online))| Community {
            id: (index + 1).to_string(),
            name: name.to_string(),
            description: description.to_string(),
            members: *members,
            online: *online,
            created_at: *LOADED_AT,
            icon: None,
        })
        .collect()
});

pub fn communities() -> &'static [Community] {
    &COMMUNITIES
}

/// Case-insensitive lookup in the static table.
pub fn find_community(name: &str) -> Option<&'static Community> {
    COMMUNITIES
        .iter()
        .find(|community| community.name.eq_ignore_ascii_case(name))
}

/// Looks `name` up, synthesizing an empty record for unknown communities.
pub fn community_or_placeholder(name: &str) -> Community {
    match find_community(name) {
        Some(community) => community.clone(),
        None => Community {
            id: name.to_string(),
            name: name.to_string(),
            description: format!("Stories from r/{}", name),
            members: 0,
            online: 0,
            created_at: *LOADED_AT,
            icon: None,
        },
    }
}
