// Module exports for models

pub mod birthday;
pub mod category;
pub mod occurrence;
pub mod settings;
