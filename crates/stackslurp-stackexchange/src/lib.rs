pub mod client;
pub mod traits;
pub mod types;

pub use client::{StackExchangeClient, STACKEXCHANGE_SEARCH_API};
pub use traits::QuestionSource;
pub use types::{SearchOrder, SearchQuery, SearchResponse, SearchSort};
