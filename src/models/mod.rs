//! Core data models shared by the classifier, tracker and dispatcher

pub mod manifest;
pub mod tab;
pub mod request;
pub mod menu;

pub use manifest::*;
pub use tab::*;
pub use request::*;
pub use menu::*;
