// Common test utilities and fixtures

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items
// Note: These may appear unused in some test binaries
#[allow(unused_imports)]
pub use fixtures::{long_line, TestRepo};
#[allow(unused_imports)]
pub use helpers::{create_fake_services, create_local_services, FakeIndex};
