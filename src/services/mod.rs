// Service module exports

pub mod auth;
pub mod birthday;
pub mod database;
pub mod listing;
pub mod notification;
pub mod occurrence;
pub mod reminder;
pub mod settings;
pub mod store;
