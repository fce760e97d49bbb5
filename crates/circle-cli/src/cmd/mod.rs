pub mod completions;
pub mod demo;
pub mod menu;
pub mod view;
