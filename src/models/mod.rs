pub mod chat;
pub mod research;
