pub mod menu_bar;
pub mod status;
pub mod url_dialog;
pub mod viewport;
