// Domain models for the published snapshot

mod container;
mod dns;
mod host;
mod snapshot;

pub use container::{ContainerState, ContainerStatus};
pub use dns::DnsFilterStats;
pub use host::HostMetrics;
pub use snapshot::{Snapshot, SourceError, SourceResult};
