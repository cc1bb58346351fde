//! UI Components
//!
//! Reusable Leptos components.

mod add_section_menu;
mod app_card;
mod confirm_button;
mod header_bar;
mod section_view;

pub use add_section_menu::AddSectionMenu;
pub use app_card::AppCard;
pub use confirm_button::ConfirmButton;
pub use header_bar::HeaderBar;
pub use section_view::SectionView;
