use crate::models::{Item, ItemPatch};
use serde::de::{value::MapAccessDeserializer, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Body of `POST /items` and `PUT /items/:id`.
///
/// Unknown keys, including `id`, are ignored: identifiers come from storage
/// on create and from the path on update. Only a JSON object decodes; the
/// derived impl would also take a positional array.
#[derive(Debug, Default)]
pub struct ItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct ItemFields {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl<'de> Deserialize<'de> for ItemRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ObjectVisitor;

        impl<'de> Visitor<'de> for ObjectVisitor {
            type Value = ItemRequest;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, map: A) -> Result<ItemRequest, A::Error>
            where
                A: MapAccess<'de>,
            {
                let fields = ItemFields::deserialize(MapAccessDeserializer::new(map))?;
                Ok(ItemRequest {
                    name: fields.name,
                    description: fields.description,
                })
            }
        }

        deserializer.deserialize_map(ObjectVisitor)
    }
}

impl ItemRequest {
    pub fn into_item(self) -> Item {
        Item::new(self.name, self.description)
    }

    pub fn into_patch(self) -> ItemPatch {
        ItemPatch::new(self.name, self.description)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.map(|id| id.to_hex()),
            name: item.name,
            description: item.description,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InsertItemResponse {
    pub inserted_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateItemResponse {
    pub matched_count: u64,
    pub modified_count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteItemResponse {
    pub deleted_count: u64,
}
