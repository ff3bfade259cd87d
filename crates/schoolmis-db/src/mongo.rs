//! MongoDB-backed document store.
//!
//! Documents cross the boundary as JSON. On the way in, reference fields that
//! parse as an `ObjectId` are stored as one, and timestamps and date fields
//! become BSON dates; on the way out, ids are rendered as hex strings and
//! dates as RFC 3339.
//! Filters on a reference field match either representation, so records
//! written with a raw string reference are still found.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, Bson, doc, oid::ObjectId};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions, ReturnDocument};
use mongodb::{Client, Database, IndexModel};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, instrument};

use schoolmis_config::MongoConfig;

use crate::collection::Collection;
use crate::document::{CREATED_AT, Document, Filter, ID_FIELD, UPDATED_AT};
use crate::error::StoreError;
use crate::store::{DocumentStore, StoreSource};

#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    /// Builds the client. The driver connects lazily, so this succeeds even
    /// when the server is down; call [`DocumentStore::ping`] to find out.
    pub async fn connect(config: &MongoConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&config.uri).await.map_err(map_error)?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.server_selection_timeout =
            Some(Duration::from_millis(config.server_selection_timeout_ms));
        options.connect_timeout = Some(Duration::from_millis(config.server_selection_timeout_ms));

        let client = Client::with_options(options).map_err(map_error)?;
        let db = client.database(&config.database);

        Ok(Self { client, db })
    }

    pub fn database_name(&self) -> &str {
        self.db.name()
    }

    /// Creates a unique index, named after its field, for every unique field.
    /// Only non-empty strings take part, matching the checks
    /// [`crate::Repository`] runs before each write. Idempotent.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        for collection in Collection::ALL {
            for &field in collection.unique_fields() {
                let options = IndexOptions::builder()
                    .name(field.to_string())
                    .unique(true)
                    .partial_filter_expression(doc! { field: { "$gt": "" } })
                    .build();
                let index = IndexModel::builder()
                    .keys(doc! { field: 1 })
                    .options(options)
                    .build();

                self.collection(collection)
                    .create_index(index)
                    .await
                    .map_err(map_error)?;
            }
        }
        debug!("Unique indexes in place");
        Ok(())
    }

    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<bson::Document> {
        self.db.collection(collection.name())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn source(&self) -> StoreSource {
        StoreSource::Mongodb
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(map_error)
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError> {
        let query = to_query(collection, filter);
        let cursor = self
            .collection(collection)
            .find(query)
            .sort(doc! { CREATED_AT: -1 })
            .await
            .map_err(map_error)?;
        let docs: Vec<bson::Document> = cursor.try_collect().await.map_err(map_error)?;

        debug!(collection = %collection, count = docs.len(), "Listed documents");
        Ok(docs.into_iter().map(from_bson_document).collect())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let found = self
            .collection(collection)
            .find_one(to_query(collection, filter))
            .await
            .map_err(map_error)?;
        Ok(found.map(from_bson_document))
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Document, StoreError> {
        let oid = parse_id(collection, id)?;
        self.collection(collection)
            .find_one(doc! { ID_FIELD: oid })
            .await
            .map_err(map_error)?
            .map(from_bson_document)
            .ok_or(StoreError::NotFound(collection.entity_name()))
    }

    #[instrument(skip(self, doc))]
    async fn create(&self, collection: Collection, doc: Document) -> Result<Document, StoreError> {
        let mut record = to_bson_document(collection, doc)?;
        let oid = ObjectId::new();
        let now = bson::DateTime::now();
        record.insert(ID_FIELD, oid);
        record.insert(CREATED_AT, now);
        record.insert(UPDATED_AT, now);

        self.collection(collection)
            .insert_one(&record)
            .await
            .map_err(|e| map_write_error(collection, e))?;

        debug!(collection = %collection, id = %oid, "Saved document to MongoDB");
        Ok(from_bson_document(record))
    }

    #[instrument(skip(self, patch))]
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        mut patch: Document,
    ) -> Result<Document, StoreError> {
        let oid = parse_id(collection, id)?;
        patch.remove(ID_FIELD);
        patch.remove(CREATED_AT);

        let mut set = to_bson_document(collection, patch)?;
        set.insert(UPDATED_AT, bson::DateTime::now());

        self.collection(collection)
            .find_one_and_update(doc! { ID_FIELD: oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| map_write_error(collection, e))?
            .map(from_bson_document)
            .ok_or(StoreError::NotFound(collection.entity_name()))
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let oid = parse_id(collection, id)?;
        let result = self
            .collection(collection)
            .delete_one(doc! { ID_FIELD: oid })
            .await
            .map_err(map_error)?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound(collection.entity_name()));
        }
        Ok(())
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        self.collection(collection)
            .count_documents(doc! {})
            .await
            .map_err(map_error)
    }

    async fn clear(&self, collection: Collection) -> Result<u64, StoreError> {
        self.collection(collection)
            .delete_many(doc! {})
            .await
            .map(|result| result.deleted_count)
            .map_err(map_error)
    }
}

/// Ids that are not ObjectIds cannot exist in this store.
fn parse_id(collection: Collection, id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::NotFound(collection.entity_name()))
}

fn map_error(err: MongoError) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. } => StoreError::Unavailable(err.to_string()),
        _ => StoreError::Backend(err.to_string()),
    }
}

const DUPLICATE_KEY: i32 = 11000;

/// Like [`map_error`], but a unique index violation becomes `Duplicate`.
fn map_write_error(collection: Collection, err: MongoError) -> StoreError {
    let message = match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY => {
            Some(e.message.clone())
        }
        ErrorKind::Command(e) if e.code == DUPLICATE_KEY => Some(e.message.clone()),
        _ => None,
    };

    match message.as_deref().and_then(duplicate_field) {
        Some(field) => StoreError::Duplicate {
            entity: collection.entity_name(),
            field,
        },
        None => map_error(err),
    }
}

/// The index named in an E11000 message. Indexes are named after their field.
fn duplicate_field(message: &str) -> Option<String> {
    let (_, rest) = message.split_once("index: ")?;
    rest.split_whitespace().next().map(str::to_string)
}

fn to_reference(value: &str) -> Bson {
    match ObjectId::parse_str(value) {
        Ok(oid) => Bson::ObjectId(oid),
        Err(_) => Bson::String(value.to_string()),
    }
}

fn to_bson_document(collection: Collection, doc: Document) -> Result<bson::Document, StoreError> {
    let mut out = bson::Document::new();
    for (key, value) in doc {
        if let Value::String(s) = &value {
            if collection.is_date(&key) {
                if let Ok(date) = bson::DateTime::parse_rfc3339_str(s) {
                    out.insert(key, date);
                    continue;
                }
            }
        }

        let converted = match (&value, collection.is_reference(&key)) {
            (Value::String(s), true) if !s.is_empty() => to_reference(s),
            (Value::Array(items), true) => Bson::Array(
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => to_reference(s),
                        other => bson::to_bson(other).unwrap_or(Bson::Null),
                    })
                    .collect(),
            ),
            _ => bson::to_bson(&value).map_err(|e| StoreError::Backend(e.to_string()))?,
        };
        out.insert(key, converted);
    }
    Ok(out)
}

fn to_query(collection: Collection, filter: &Filter) -> bson::Document {
    let mut query = bson::Document::new();
    for (field, value) in filter.conditions() {
        let condition = if field == ID_FIELD {
            to_reference(value)
        } else if collection.is_reference(field) {
            match ObjectId::parse_str(value) {
                Ok(oid) => Bson::Document(doc! { "$in": [oid, value.as_str()] }),
                Err(_) => Bson::String(value.clone()),
            }
        } else {
            Bson::String(value.clone())
        };
        query.insert(field.as_str(), condition);
    }
    query
}

fn from_bson_document(doc: bson::Document) -> Document {
    doc.into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect::<Map<String, Value>>()
}

/// Largest integer a double holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or(Value::Null),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(inner) => Value::Object(from_bson_document(inner)),
        // Other writers store JS numbers as doubles; whole ones read back as
        // integers so that integer record fields still decode.
        Bson::Double(v) if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER => {
            Value::from(v as i64)
        }
        other => other.into_relaxed_extjson(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_references_become_object_ids_when_valid() {
        let oid = ObjectId::new();
        let converted = to_bson_document(
            Collection::Students,
            doc(json!({
                "name": "Ada",
                "school": oid.to_hex(),
                "class": "mem-1700000000000-3",
                "level": ""
            })),
        )
        .unwrap();

        assert_eq!(converted.get("school"), Some(&Bson::ObjectId(oid)));
        assert_eq!(
            converted.get("class"),
            Some(&Bson::String("mem-1700000000000-3".into()))
        );
        assert_eq!(converted.get("level"), Some(&Bson::String(String::new())));
        assert_eq!(converted.get("name"), Some(&Bson::String("Ada".into())));
    }

    #[test]
    fn test_student_dates_are_stored_as_dates() {
        let converted = to_bson_document(
            Collection::Students,
            doc(json!({
                "dateOfBirth": "2008-03-14T00:00:00Z",
                "enrollmentDate": "2024-01-08T07:30:00.000Z",
                "phone": "2008-03-14T00:00:00Z"
            })),
        )
        .unwrap();

        let born = converted.get_datetime("dateOfBirth").unwrap();
        assert_eq!(born.try_to_rfc3339_string().unwrap(), "2008-03-14T00:00:00Z");
        assert!(converted.get_datetime("enrollmentDate").is_ok());
        assert!(matches!(converted.get("phone"), Some(Bson::String(_))));

        let rendered = from_bson_document(converted);
        assert_eq!(rendered["dateOfBirth"], json!("2008-03-14T00:00:00Z"));
    }

    #[test]
    fn test_reference_lists_convert_elementwise() {
        let oid = ObjectId::new();
        let converted = to_bson_document(
            Collection::Teachers,
            doc(json!({ "courses": [oid.to_hex(), "legacy"] })),
        )
        .unwrap();
        assert_eq!(
            converted.get("courses"),
            Some(&Bson::Array(vec![
                Bson::ObjectId(oid),
                Bson::String("legacy".into())
            ]))
        );
    }

    #[test]
    fn test_reference_filter_accepts_both_forms() {
        let oid = ObjectId::new();
        let query = to_query(
            Collection::Students,
            &Filter::new().eq("school", oid.to_hex()),
        );
        assert_eq!(
            query.get_document("school").unwrap(),
            &doc! { "$in": [oid, oid.to_hex()] }
        );

        let query = to_query(Collection::Students, &Filter::new().eq("school", "mem-1-1"));
        assert_eq!(query.get_str("school").unwrap(), "mem-1-1");
    }

    #[test]
    fn test_plain_fields_filter_by_string() {
        let query = to_query(
            Collection::Users,
            &Filter::new().eq("username", "admin").eq("password", "admin123"),
        );
        assert_eq!(query, doc! { "username": "admin", "password": "admin123" });
    }

    #[test]
    fn test_documents_render_as_plain_json() {
        let oid = ObjectId::new();
        let rendered = from_bson_document(doc! {
            "_id": oid,
            "createdAt": bson::DateTime::from_millis(0),
            "credits": 4_i64,
            "courses": [oid],
        });

        assert_eq!(rendered["_id"], json!(oid.to_hex()));
        assert!(
            rendered["createdAt"]
                .as_str()
                .unwrap()
                .starts_with("1970-01-01T00:00:00")
        );
        assert_eq!(rendered["credits"], json!(4));
        assert_eq!(rendered["courses"], json!([oid.to_hex()]));
    }

    #[test]
    fn test_whole_doubles_decode_into_integer_fields() {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Capacities {
            capacity: Option<i64>,
            established_year: Option<i64>,
        }

        let rendered = from_bson_document(doc! {
            "_id": ObjectId::new(),
            "capacity": 40.0_f64,
            "establishedYear": 1998.0_f64,
            "ratio": 0.5_f64,
        });

        assert_eq!(rendered["ratio"], json!(0.5));
        let parsed: Capacities = serde_json::from_value(Value::Object(rendered)).unwrap();
        assert_eq!(parsed.capacity, Some(40));
        assert_eq!(parsed.established_year, Some(1998));
    }

    #[test]
    fn test_duplicate_key_message_names_the_field() {
        let message = "E11000 duplicate key error collection: school-mis.students \
                       index: admissionNumber dup key: { admissionNumber: \"ADM-1\" }";
        assert_eq!(duplicate_field(message).as_deref(), Some("admissionNumber"));
        assert_eq!(duplicate_field("E11000 duplicate key error"), None);
    }

    #[test]
    fn test_non_object_ids_are_not_found() {
        assert!(matches!(
            parse_id(Collection::Schools, "mem-1-1"),
            Err(StoreError::NotFound("School"))
        ));
    }
}
