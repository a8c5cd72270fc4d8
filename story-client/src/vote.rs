//! View-local voting. Nothing here is sent anywhere; the state lives as long
//! as the card that owns it.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Vote {
    #[default]
    None,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl From<VoteDirection> for Vote {
    fn from(direction: VoteDirection) -> Self {
        match direction {
            VoteDirection::Up => Vote::Up,
            VoteDirection::Down => Vote::Down,
        }
    }
}

impl Vote {
    pub fn delta(&self) -> i64 {
        match self {
            Vote::None => 0,
            Vote::Up => 1,
            Vote::Down => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteState {
    base: i64,
    vote: Vote,
}

impl VoteState {
    pub fn new(base: i64) -> Self {
        Self {
            base,
            vote: Vote::None,
        }
    }

    pub fn vote(&self) -> Vote {
        self.vote
    }

    /// Re-selecting the active direction clears it; the opposite direction
    /// replaces it directly.
    pub fn cast(&mut self, direction: VoteDirection) -> Vote {
        let requested = Vote::from(direction);
        self.vote = if self.vote == requested {
            Vote::None
        } else {
            requested
        };
        self.vote
    }

    pub fn display_count(&self) -> i64 {
        self.base + self.vote.delta()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upvote_toggles() {
        let mut state = VoteState::new(100);
        assert_eq!(state.display_count(), 100);

        assert_eq!(state.cast(VoteDirection::Up), Vote::Up);
        assert_eq!(state.display_count(), 101);

        assert_eq!(state.cast(VoteDirection::Up), Vote::None);
        assert_eq!(state.display_count(), 100);
    }

    #[test]
    fn test_switching_direction_skips_neutral() {
        let mut state = VoteState::new(100);
        state.cast(VoteDirection::Up);

        assert_eq!(state.cast(VoteDirection::Down), Vote::Down);
        assert_eq!(state.display_count(), 99);

        assert_eq!(state.cast(VoteDirection::Up), Vote::Up);
        assert_eq!(state.display_count(), 101);
    }

    #[test]
    fn test_downvote_toggles() {
        let mut state = VoteState::new(0);
        state.cast(VoteDirection::Down);
        assert_eq!(state.display_count(), -1);
        state.cast(VoteDirection::Down);
        assert_eq!(state.vote(), Vote::None);
        assert_eq!(state.display_count(), 0);
    }
}
