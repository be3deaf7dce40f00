//! UI Components
//!
//! Leptos components. Each reads the fields it needs from the app store and
//! sends user input to `dispatch`.

mod bottom_nav;
mod cart_page;
mod catalog_page;
mod detail_page;
mod filter_panel;
mod header;
mod info_page;
mod item_card;
mod list_delete_button;
mod load_sentinel;
mod modal_host;
mod search_bar;
mod settings_page;
mod tag_picker;
mod toast;
mod wishlist_page;

pub use bottom_nav::BottomNav;
pub use cart_page::CartPage;
pub use catalog_page::CatalogPage;
pub use detail_page::DetailPage;
pub use filter_panel::FilterPanel;
pub use header::Header;
pub use info_page::InfoPage;
pub use item_card::ItemCard;
pub use list_delete_button::ListDeleteButton;
pub use load_sentinel::LoadSentinel;
pub use modal_host::ModalHost;
pub use search_bar::SearchOverlay;
pub use settings_page::SettingsPage;
pub use tag_picker::TagPicker;
pub use toast::ToastView;
pub use wishlist_page::WishlistPage;
