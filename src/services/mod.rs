pub mod ingestion;
pub mod inspection;
pub mod ranking;
