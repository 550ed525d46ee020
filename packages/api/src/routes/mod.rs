pub mod demo;
pub mod diagnostics;
pub mod games;
pub mod health;
pub mod import;
