/// All primary keys are SQLite `INTEGER PRIMARY KEY AUTOINCREMENT` rowids.
pub type DbId = i64;

/// All audit timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (join dates, publish dates, deadlines) carry no time zone.
pub type Date = chrono::NaiveDate;

/// Body returned by delete endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}
