pub mod config;
pub mod logging;

pub mod descriptor;
pub mod html;
pub mod model;
pub mod pool;
pub mod registry;
pub mod session;
