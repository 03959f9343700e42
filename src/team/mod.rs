pub mod team_dto;
pub mod team_handlers;
pub mod team_models;
pub mod team_repository;
pub mod team_service;

pub use team_models::{Role, Team, TeamMember};
