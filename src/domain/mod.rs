// Domain layer: typed records, the view shapes the pipeline produces, and the
// ports that adapters implement.

pub mod appointment;
pub mod model;
pub mod ports;
pub mod views;
