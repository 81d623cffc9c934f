pub mod row;
pub mod style;
pub mod value;

pub use row::Row;
pub use style::{Color, Style, TextAlignment};
pub use value::Value;
