pub mod alerts;
pub mod relay;
