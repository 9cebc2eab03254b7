pub mod collection;
pub mod metadata;
pub mod movie;

pub use collection::Collection;
pub use metadata::MovieMetadata;
pub use movie::Movie;
