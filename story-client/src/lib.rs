//! Client data layer: proxy requests, the community directory, and the
//! view-local state pages build on.

pub mod api;
pub mod feed;
pub mod profile;
pub mod view;
pub mod vote;

pub use api::{ApiClient, ApiResponse, ListParams, NETWORK_ERROR, REQUEST_FAILED};
pub use feed::{FeedState, FeedView, Message, StoryCard};
pub use view::{Ticket, ViewScope};
pub use vote::{Vote, VoteDirection, VoteState};
