pub mod database;
pub mod mock;
pub mod store;

pub use database::MongoDb;
pub use mock::MockItemStore;
pub use store::{ItemStore, UpdateOutcome};
