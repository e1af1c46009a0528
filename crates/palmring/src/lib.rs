pub mod config;
pub mod demo;
pub mod events;
pub mod menu;
pub mod sys;
