//! Common test utilities for proposal-intake tests

pub mod fixtures;
pub mod mock_host;
pub mod mock_registry;
pub mod recording_progress;

// Re-exports for convenience - not all test binaries use all exports
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use mock_host::MockHost;
#[allow(unused_imports)]
pub use mock_registry::MockRegistry;
#[allow(unused_imports)]
pub use recording_progress::RecordingProgress;
