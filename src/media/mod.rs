pub mod collection;
pub mod conversion;
pub mod manifest;
pub mod model;
pub mod registry;
