pub mod cli;
pub mod config;
pub mod models;
pub mod server;
pub mod store;
pub mod utils;

pub use config::Config;
pub use models::{Chapter, PlannerData, Subject, Task, TaskUpdate};
pub use store::{PlannerStore, StoreError};
pub use utils::Profile;
