mod format;
mod page;

pub use format::*;
pub use page::*;
