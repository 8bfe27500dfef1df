pub mod assets;
pub mod core;
pub mod input;
pub mod lab;
pub mod rendering;
pub mod ui;
