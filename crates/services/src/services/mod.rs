pub mod columns;
pub mod confirm;
pub mod forms;
pub mod list_view;
pub mod moderation;
pub mod notification;
pub mod preview;
pub mod query;
pub mod table;

#[cfg(test)]
pub(crate) mod test_support;
