//! Proxy actions: one function per logical operation on the commerce API.
//!
//! Reads return the API envelope untouched. Mutations also revalidate the
//! cached pages that show the changed data.

pub mod bookmarks;
pub mod magazine;
pub mod posts;
pub mod products;

pub use bookmarks::{list_bookmarks, toggle_bookmark, BookmarkToggle};
pub use magazine::{fetch_curation_detail, fetch_magazine_detail};
pub use posts::{create_post, list_community_posts};
pub use products::fetch_product;
