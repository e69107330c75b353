pub mod button;
pub mod upload;
