pub mod aggregate;
pub mod consumption;
pub mod error;
pub mod estimate;
pub mod export;
pub mod extras;
