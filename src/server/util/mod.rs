pub mod discord;
pub mod retry;
