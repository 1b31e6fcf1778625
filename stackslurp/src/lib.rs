//! # StackSlurp
//!
//! Watches StackExchange sites for questions carrying a set of tags and
//! posts each one as an incident event to a Rackspace Cloud Queue.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stackslurp::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut slurper = SlurperBuilder::new()
//!         .sites(["stackoverflow", "serverfault"])
//!         .tags(vec!["python".to_string(), "ruby".to_string()])
//!         .rackspace("rgbkrk", "RACKSPACE_API_KEY")
//!         .queue("some_queue_name", "https://dfw.queues.api.rackspacecloud.com/v1/")
//!         .build()?;
//!
//!     slurper.run().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **stackslurp-types**: data model (`Event`, `RawQuestion`, `Watermark`) and `SlurpError`
//! - **stackslurp-stackexchange**: `QuestionSource` and the HTTP search client
//! - **stackslurp-rackspace**: `IdentityClient`, `QueueClient` and their HTTP clients
//! - **stackslurp-core**: batching, event mapping, `SourceProvider` and the `Slurper` loop

// Re-export all public APIs
pub use stackslurp_core as engine;
pub use stackslurp_rackspace as rackspace;
pub use stackslurp_stackexchange as stackexchange;
pub use stackslurp_types as types;

// Re-export commonly used types
pub use stackslurp_core::{
    chunks, to_event, Batcher, DeliveryConfig, EventMapper, Harvest, IterationOutcome, Slurper,
    SlurperConfig, SourceProvider, StackExchangeProvider,
};
pub use stackslurp_rackspace::{CloudQueuesClient, IdentityClient, QueueClient, RackspaceIdentity};
pub use stackslurp_stackexchange::{QuestionSource, StackExchangeClient};
pub use stackslurp_types::{Event, OriginId, RawQuestion, SlurpError, TagFilter, Watermark};

/// High-level builder wiring the HTTP clients into a `Slurper`
pub mod builder;

/// Convenient prelude with commonly used types
pub mod prelude {
    pub use crate::builder::SlurperBuilder;
    pub use crate::types::{Event, SlurpError, TagFilter, Watermark};
    pub use crate::engine::{IterationOutcome, Slurper, SourceProvider};
    pub use anyhow::Result;
}
