pub mod health;
pub mod items;

pub use health::{health_check, metrics, readiness_check};
pub use items::{create_item, delete_item, get_all_items, get_item, update_item};
