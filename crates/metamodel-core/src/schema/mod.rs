pub mod column;
pub mod table;

pub use column::{Column, ColumnType};
pub use table::Table;
