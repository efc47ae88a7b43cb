pub mod game;
pub mod hub;
pub mod protocol;
pub mod session;
