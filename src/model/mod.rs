mod scan;
mod tree;

pub use scan::{ScanRow, ScanStatus, Severity, SeverityCounts};
pub use tree::{DiscoveryTree, EventDetail, TreeNode};
