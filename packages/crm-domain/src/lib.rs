pub mod entity;
pub mod headline;
pub mod text;
