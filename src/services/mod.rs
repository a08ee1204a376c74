pub mod benchmark;
pub mod containers;
pub mod host;
pub mod network;
pub mod processes;
pub mod system;
pub mod temperature;
pub mod tool;

pub use benchmark::{BenchmarkController, BenchmarkSlot, BenchmarkState, StressTool};
pub use containers::{collect_containers, list_containers};
pub use host::collect_node_health;
pub use network::collect_network;
pub use processes::collect_top_processes;
pub use system::collect_system;
pub use tool::{ExternalTools, ToolError};
