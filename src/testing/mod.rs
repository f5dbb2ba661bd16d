mod fake_database;
mod fake_host;
mod harness;
mod memory_env_store;
mod scripted_prompter;

pub use fake_database::FakeDatabase;
pub use fake_host::{FakePermissions, FakePlatform};
pub use harness::TestHarness;
pub use memory_env_store::MemoryEnvStore;
pub use scripted_prompter::{Answer, ScriptedPrompter};
