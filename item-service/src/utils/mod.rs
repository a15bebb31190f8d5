pub mod item_id;
pub mod json;

pub use item_id::{parse_item_id, ItemId};
pub use json::JsonBody;
