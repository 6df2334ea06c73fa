// Utility modules

pub mod imaging;
pub mod logging;
