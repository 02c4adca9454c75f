pub mod actions_menu;
pub mod form_sheet;
pub mod list;
