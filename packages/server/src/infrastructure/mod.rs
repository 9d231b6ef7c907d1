//! Infrastructure layer: in-memory registry and broker, wire DTOs.

pub mod broker;
pub mod dto;
pub mod repository;
