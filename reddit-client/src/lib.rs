pub mod api;


pub use api::{
    ListingQuery, RedditApiClient, RedditListing, RedditListingChild, RedditListingData,
    RedditPostData, MIN_CONTENT_CHARS,
};
