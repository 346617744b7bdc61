pub mod assets;
pub mod chat_controller;
pub mod chat_storage;
pub mod gateway;
pub mod notification;
pub mod presence;
