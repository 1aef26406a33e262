mod assets;
pub mod markup;
pub mod page;
pub mod table;

pub use markup::{escape, remove_sfurl_tags, truncate};
pub use table::{RenderedTable, ScanTable, StatusBadge};
