/// All record identifiers are UUIDv7, generated by the application before insert.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Allocate a fresh, time-ordered record identifier.
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7()
}

/// Parse an identifier taken from a URL path segment.
///
/// Returns `None` for anything that is not a UUID; callers treat that the
/// same as an id that does not resolve.
pub fn parse_id(raw: &str) -> Option<DbId> {
    uuid::Uuid::parse_str(raw.trim()).ok()
}
