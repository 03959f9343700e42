pub mod email_dto;
pub mod email_handlers;
pub mod email_models;
pub mod email_repository;
pub mod email_service;
