mod criteria;
mod memory;
mod table_store;

pub use criteria::{FilterCondition, OrderDirection, QueryCriteria};
pub use memory::MemoryTableStore;
pub use table_store::TableStore;
