pub mod handlers;
pub mod permissions;
