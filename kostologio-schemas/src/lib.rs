pub mod breakdown;
pub mod catalog;
pub mod extras;
pub mod file_formats;
pub mod measurements;
pub mod page;
pub mod unit;
