pub mod benchmark;
pub mod container;
pub mod host;
pub mod network;
pub mod process;
pub mod system;

pub use benchmark::{BenchmarkStatus, StartOutcome, StopOutcome};
pub use container::{ContainerListing, ContainerRecord};
pub use host::NodeHealth;
pub use network::{InterfaceCounters, InterfaceTraffic};
pub use process::ProcessSample;
pub use system::SystemSnapshot;
