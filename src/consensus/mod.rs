pub mod peer;
pub mod registry;
pub mod resolver;

pub use peer::{HttpPeerClient, PeerClient};
pub use registry::{NodeRegistry, normalize_address};
pub use resolver::longest_valid_chain;
