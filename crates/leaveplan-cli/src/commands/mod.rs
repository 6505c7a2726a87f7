pub mod bridges;
pub mod config;
pub mod fraction;
pub mod holidays;
pub mod metrics;
pub mod recommend;
pub mod shift;
pub mod split;
