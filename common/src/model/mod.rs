pub mod attribute;
pub mod entity;
pub mod media;
pub mod tag;

mod lenient;
