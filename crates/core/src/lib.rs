pub mod capture;
pub mod classification;
pub mod pipeline;
pub mod shared;
pub mod stabilization;
