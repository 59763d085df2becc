mod cosmos;
pub mod sqlite;
pub mod traits;

pub use cosmos::CosmosStore;
pub use sqlite::SqliteStore;
pub use traits::{DocumentStore, NoStore, StorageError, DASHBOARD_DOC_TYPE};
