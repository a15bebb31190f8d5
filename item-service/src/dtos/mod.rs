pub mod items;

pub use items::{
    DeleteItemResponse, InsertItemResponse, ItemRequest, ItemResponse, UpdateItemResponse,
};
