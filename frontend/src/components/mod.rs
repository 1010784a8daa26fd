pub mod chat;
pub mod home;
pub mod navbar;
pub mod sidebar;
pub mod toasts;
pub mod tool_page;
