mod dataset;
mod payload;
mod record;
mod table;

pub use dataset::*;
pub use payload::*;
pub use record::*;
pub use table::*;
