pub mod error;
pub mod map;
pub mod track;
