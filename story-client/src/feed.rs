use threadist_core::{CoreError, SortMode, StoriesPayload, Story};
use tracing::debug;

use crate::api::{ApiClient, ApiResponse, ListParams};
use crate::view::{Ticket, ViewScope};
use crate::vote::{VoteDirection, VoteState};

/// A story as shown in a feed, with its local vote and expansion state.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryCard {
    pub story: Story,
    pub vote: VoteState,
    pub expanded: bool,
}

impl StoryCard {
    pub fn new(story: Story) -> Self {
        let vote = VoteState::new(story.upvotes);
        Self {
            story,
            vote,
            expanded: false,
        }
    }

    pub fn display_count(&self) -> i64 {
        self.vote.display_count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedState {
    Loading,
    Loaded(Vec<StoryCard>),
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum Message {
    Vote(String, VoteDirection),
    ToggleExpanded(String),
    SelectSort(SortMode),
}

/// Feed of stories for one page: `{stories, loading, error, refetch}`.
#[derive(Debug)]
pub struct FeedView {
    params: ListParams,
    state: FeedState,
    scope: ViewScope,
}

impl FeedView {
    pub fn new(params: ListParams) -> Self {
        Self {
            params,
            state: FeedState::Loading,
            scope: ViewScope::new(),
        }
    }

    pub fn params(&self) -> &ListParams {
        &self.params
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FeedState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FeedState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn cards(&self) -> &[StoryCard] {
        match &self.state {
            FeedState::Loaded(cards) => cards.as_slice(),
            _ => &[],
        }
    }

    /// Switches to `Loading` and hands out the ticket the response must carry.
    pub fn begin_fetch(&mut self) -> Ticket {
        self.state = FeedState::Loading;
        self.scope.begin()
    }

    /// Applies a response unless a newer fetch has started since `ticket`
    /// was issued. Returns whether the response was applied.
    pub fn apply(&mut self, ticket: &Ticket, response: ApiResponse<StoriesPayload>) -> bool {
        if !ticket.is_current() {
            debug!("Discarding stale feed response");
            return false;
        }

        self.state = match response {
            ApiResponse::Data(payload) => {
                FeedState::Loaded(payload.stories.into_iter().map(StoryCard::new).collect())
            }
            ApiResponse::Error(message) => FeedState::Failed(message),
        };
        true
    }

    /// Fetches the feed again with the current parameters. This is the only
    /// retry path; it is always user-triggered.
    pub async fn refetch(&mut self, client: &ApiClient) {
        let ticket = self.begin_fetch();
        let response = client.list(&self.params).await;
        self.apply(&ticket, response);
    }

    pub fn update(&mut self, message: Message) -> Result<(), CoreError> {
        match message {
            Message::Vote(story_id, direction) => {
                self.card_mut(&story_id)?.vote.cast(direction);
                Ok(())
            }
            Message::ToggleExpanded(story_id) => {
                let card = self.card_mut(&story_id)?;
                card.expanded = !card.expanded;
                Ok(())
            }
            Message::SelectSort(sort) => {
                self.params.sort = Some(sort);
                // Anything still in flight was requested for the old tab.
                self.scope.invalidate();
                self.state = FeedState::Loading;
                Ok(())
            }
        }
    }

    fn card_mut(&mut self, story_id: &str) -> Result<&mut StoryCard, CoreError> {
        let cards = match &mut self.state {
            FeedState::Loaded(cards) => cards,
            _ => {
                return Err(CoreError::NotFound {
                    resource: format!("story {}", story_id),
                })
            }
        };

        cards
            .iter_mut()
            .find(|card| card.story.id == story_id)
            .ok_or_else(|| CoreError::NotFound {
                resource: format!("story {}", story_id),
            })
    }
}
