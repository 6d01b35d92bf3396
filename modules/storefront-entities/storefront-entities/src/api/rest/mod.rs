//! REST surface: one route set per entity under `/api/v1/entities/`.

pub mod auth;
pub mod binding;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod problem;
pub mod routes;
