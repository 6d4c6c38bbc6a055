pub mod column;
pub mod event;
pub mod navigator;
pub mod sort;
pub mod tabs;

pub use column::Column;
pub use event::{ColumnLoadFailure, NavigatorEvent};
pub use navigator::{ColumnNavigator, ListingKind, ListingOutcome, ListingRequest, PendingListing};
pub use sort::{SortBy, SortOptions, SortOrder};
pub use tabs::{Tab, TabId, TabsManager};
