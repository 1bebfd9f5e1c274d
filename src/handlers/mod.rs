pub mod api;
pub mod meta;
