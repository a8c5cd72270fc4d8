//! Profile placeholders. Reading history and saved stories are not
//! persisted anywhere, so every figure is zero and every list is empty.

use serde::Serialize;
use threadist_core::Story;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileStats {
    pub stories_read: u64,
    pub read_minutes: u64,
    pub saved_stories: u64,
    pub subreddits_followed: u64,
}

impl ProfileStats {
    /// "Total Read Time" as shown on the profile page, in whole hours.
    pub fn read_time_label(&self) -> String {
        format!("{}h", self.read_minutes / 60)
    }
}

pub fn profile_stats() -> ProfileStats {
    ProfileStats::default()
}

pub fn reading_history() -> Vec<Story> {
    Vec::new()
}

pub fn saved_stories() -> Vec<Story> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_empty() {
        let stats = profile_stats();
        assert_eq!(stats.stories_read, 0);
        assert_eq!(stats.saved_stories, 0);
        assert_eq!(stats.subreddits_followed, 0);
        assert_eq!(stats.read_time_label(), "0h");
        assert!(reading_history().is_empty());
        assert!(saved_stories().is_empty());
    }
}
