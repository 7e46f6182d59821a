pub use field::*;
pub use table::*;

mod field;
mod table;
