pub mod env;
pub mod media;
