/// Record identifiers are UUID v7 so that id order follows creation order.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Allocate a fresh record identifier.
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7()
}
