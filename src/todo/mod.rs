pub mod derived;
pub mod todo_dto;
pub mod todo_handlers;
pub mod todo_models;
pub mod todo_repository;
pub mod todo_service;

pub use todo_models::{Priority, Todo};
