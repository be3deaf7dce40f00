//! View Models
//!
//! Plain functions from state to display data. Components stay thin and
//! these stay testable without a browser.

pub mod cart;
pub mod catalog;
pub mod detail;
pub mod filters;
pub mod wishlist;
