#![doc = "The `taskdeck` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, authentication gate, routing"]
#![doc = "configuration, and error handling for the TaskDeck task-management API."]
#![doc = "It is used by the main binary (`main.rs`) to construct and run the"]
#![doc = "application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
