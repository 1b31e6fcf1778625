pub mod identity;
pub mod queues;
pub mod traits;
pub mod types;

pub use identity::{RackspaceIdentity, RACKSPACE_IDENTITY_ENDPOINT};
pub use queues::CloudQueuesClient;
pub use traits::{IdentityClient, QueueClient};
pub use types::{AuthRequest, IdentityResponse, QueueMessage};
