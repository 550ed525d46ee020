pub mod demo;
pub mod game;
pub mod games;
pub mod import;
