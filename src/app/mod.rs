pub mod editor;
pub mod forms;
pub mod list_page;
pub mod notifications;
pub mod summary;
