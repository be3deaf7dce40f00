//! ACNHEX Core
//!
//! Browser-independent pieces of the marketplace front end: catalog models and
//! the catalog data service, the 40-slot cart, multi-list wishlists, versioned
//! persistence, the bot command generator and the search debounce.

pub mod cart;
pub mod catalog;
pub mod command;
pub mod debounce;
pub mod error;
pub mod models;
pub mod schema;
pub mod storage;
pub mod wishlist;

pub use cart::{Cart, CartAdd, CART_CAPACITY};
pub use catalog::{Catalog, CatalogSource, Page};
pub use command::{generate_command, normalize_prefix};
pub use debounce::{Debounce, Ticket};
pub use error::{LoadError, SchemaError, StoreError};
pub use models::*;
pub use storage::{KeyValueStore, MemoryStore, Persist};
pub use wishlist::{ListAdd, Wishlists, DEFAULT_LIST_ID, DEFAULT_LIST_NAME};
