pub mod priority;
pub mod track;
