pub mod compose;
pub mod fetch;
pub mod images;
pub mod probe;
pub mod sweep;
