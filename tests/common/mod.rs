pub mod environment;
pub mod logging;
pub mod renderer;
pub mod server;
