pub mod batcher;
pub mod config;
pub mod mapper;
pub mod provider;
pub mod slurper;

pub use batcher::{chunks, Batcher, MAX_BATCH_SIZE};
pub use config::{DeliveryConfig, SlurperConfig};
pub use mapper::{reporter_tag, to_event, EventMapper};
pub use provider::{Harvest, SourceProvider, StackExchangeProvider};
pub use slurper::{IterationOutcome, SendReport, Slurper};
