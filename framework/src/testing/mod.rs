//! Test helpers
//!
//! - `expect!` for fluent assertions
//! - [`TestDatabase`] for a migrated in-memory SQLite database
//! - [`TestClient`] for driving a router without opening a socket
//!
//! ```rust,ignore
//! use framework::expect;
//! use framework::testing::{TestClient, TestDatabase};
//!
//! #[tokio::test]
//! async fn lists_todos() {
//!     let db = TestDatabase::fresh::<Migrator>().await.unwrap();
//!     let todos = store::connect(StoreDriver::Orm, db.connection());
//!     let client = TestClient::new(routes::build(todos));
//!
//!     let response = client.get("/api/todos").await;
//!     expect!(response.status).to_equal(200);
//! }
//! ```

mod client;
mod database;
mod expect;

pub use client::{TestClient, TestResponse};
pub use database::TestDatabase;
pub use expect::Expect;

/// Start a fluent assertion on a value
#[macro_export]
macro_rules! expect {
    ($value:expr) => {
        $crate::testing::Expect::new($value, concat!(file!(), ":", line!()))
    };
}
