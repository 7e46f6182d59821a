pub use config::*;
pub use declaration::*;
pub use description::*;
pub use error::*;
pub use ident::*;
pub use metadata::*;
pub use naming::*;
pub use ttype::*;

mod config;
mod declaration;
mod description;
mod error;
mod ident;
mod metadata;
pub mod naming;
pub mod ttype;
