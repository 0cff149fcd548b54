//! Response bodies shared by all resources.
//!
//! - create: `{ "message", <record fields> }` with 201
//! - list: `{ <plural>: [records], "count" }`
//! - delete: `{ "message", <singular>: record, "count": remaining }`

use crate::config::EntitySchema;
use crate::store::Document;
use axum::{http::StatusCode, Json};
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(serde::Serialize)]
pub struct Created {
    pub message: String,
    #[serde(flatten)]
    pub record: Document,
}

/// Records under an entity-specific key, with their count.
pub struct Listing {
    key: &'static str,
    items: Vec<Document>,
}

impl Listing {
    pub fn count(&self) -> u64 {
        self.items.len() as u64
    }
}

impl Serialize for Listing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.key, &self.items)?;
        map.serialize_entry("count", &self.count())?;
        map.end()
    }
}

pub struct Removed {
    message: String,
    key: &'static str,
    record: Document,
    remaining: u64,
}

impl Serialize for Removed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("message", &self.message)?;
        map.serialize_entry(self.key, &self.record)?;
        map.serialize_entry("count", &self.remaining)?;
        map.end()
    }
}

pub fn created(entity: &EntitySchema, record: Document) -> (StatusCode, Json<Created>) {
    (
        StatusCode::CREATED,
        Json(Created {
            message: format!("{} added successfully", entity.label),
            record,
        }),
    )
}

pub fn success_one(record: Document) -> (StatusCode, Json<Document>) {
    (StatusCode::OK, Json(record))
}

pub fn success_many(entity: &EntitySchema, items: Vec<Document>) -> (StatusCode, Json<Listing>) {
    (
        StatusCode::OK,
        Json(Listing {
            key: entity.plural,
            items,
        }),
    )
}

pub fn removed(entity: &EntitySchema, record: Document, remaining: u64) -> (StatusCode, Json<Removed>) {
    (
        StatusCode::OK,
        Json(Removed {
            message: format!("{} deleted successfully", entity.label),
            key: entity.singular,
            record,
            remaining,
        }),
    )
}
