pub mod embeds;
pub mod limits;
pub mod permissions;
