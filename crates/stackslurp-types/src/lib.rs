pub mod error;
pub mod event;
pub mod question;
pub mod queue;
pub mod tags;
pub mod watermark;

pub use error::{Result, SlurpError};
pub use event::{Event, OriginId};
pub use question::RawQuestion;
pub use queue::{AuthToken, EnqueueReceipt, MAX_MESSAGE_TTL, MIN_MESSAGE_TTL};
pub use tags::TagFilter;
pub use watermark::Watermark;
