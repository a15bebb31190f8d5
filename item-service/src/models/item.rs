use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// Stored shape of an item in the `items` collection.
///
/// Absent fields are left out of the BSON document entirely, so the server
/// assigns `_id` on insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Item {
    /// New, not yet stored item. Empty strings count as not provided.
    pub fn new(name: Option<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            name: provided(name),
            description: provided(description),
        }
    }
}

/// Fields supplied by an update request.
///
/// Only fields present here end up in the `$set`; everything else on the
/// stored document stays as it is. An empty string is indistinguishable from
/// an absent field, so an update cannot clear a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    name: Option<String>,
    description: Option<String>,
}

impl ItemPatch {
    pub fn new(name: Option<String>, description: Option<String>) -> Self {
        Self {
            name: provided(name),
            description: provided(description),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Body of the `$set` operator.
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(name) = &self.name {
            set.insert("name", name.as_str());
        }
        if let Some(description) = &self.description {
            set.insert("description", description.as_str());
        }
        set
    }

    pub fn to_update_document(&self) -> Document {
        doc! { "$set": self.to_set_document() }
    }

    /// Overwrite the provided fields on `item`. Returns whether anything changed.
    pub fn apply_to(&self, item: &mut Item) -> bool {
        let mut changed = false;
        if let Some(name) = &self.name {
            if item.name.as_ref() != Some(name) {
                item.name = Some(name.clone());
                changed = true;
            }
        }
        if let Some(description) = &self.description {
            if item.description.as_ref() != Some(description) {
                item.description = Some(description.clone());
                changed = true;
            }
        }
        changed
    }
}

fn provided(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
