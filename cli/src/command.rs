mod info;
mod inject;

pub use info::*;
pub use inject::*;
