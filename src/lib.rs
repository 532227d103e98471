pub mod app;
pub mod changelog;
pub mod checkers;
pub mod core;
pub mod report;
pub mod scanner;
