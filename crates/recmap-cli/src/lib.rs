pub mod logging;
pub mod rows;
