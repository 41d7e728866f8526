pub mod action_executor;
pub mod app;
pub mod clipboard;
pub mod command;
pub mod config;
pub mod controller;
pub mod directory;
pub mod history;
pub mod input;
pub mod links;
pub mod logging;
pub mod model;
pub mod open_schedule;
pub mod panels;
pub mod runtime;
pub mod search;
pub mod slot_store;
pub mod toast;
pub mod view;
