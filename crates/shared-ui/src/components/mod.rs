// Layout and display
pub mod button;
pub mod card;
pub mod data_table;
pub mod page_header;
pub mod pagination;
pub mod skeleton;

// Forms
pub mod form;
pub mod input;
pub mod sheet;
pub mod textarea;

// Overlays built on dioxus-primitives
pub mod alert_dialog;
pub mod dropdown_menu;
pub mod toast;

pub use alert_dialog::*;
pub use button::*;
pub use card::*;
pub use data_table::*;
pub use dropdown_menu::*;
pub use form::*;
pub use input::*;
pub use page_header::*;
pub use pagination::*;
pub use sheet::*;
pub use skeleton::*;
pub use textarea::*;
pub use toast::*;
