pub mod clients;
pub mod migrate;
pub mod page;
pub mod pool;
pub mod projects;
pub mod query;
pub mod repository;
pub mod slots;
pub mod sort;
pub mod tx;

use crate::errors::AppResult;

pub use clients::ClientRepository;
pub use page::{Page, PageResult};
pub use pool::Database;
pub use projects::ProjectRepository;
pub use query::{ConditionBuilder, Conditional, NamedParams, ToConditional};
pub use repository::CrudRepository;
pub use slots::{SLOT_SORT_COLUMNS, SlotRepository};
pub use sort::{SortColumns, SortField};
pub use tx::{ExecResult, Tx};

/// Validate every static sort table. Called once at startup.
pub fn check_sort_tables() -> AppResult<()> {
    SLOT_SORT_COLUMNS.check()
}
