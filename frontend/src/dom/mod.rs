pub mod extractor;
pub mod mount;
pub mod selectors;
