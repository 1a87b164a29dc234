//! Data models for Gymdesk entities

pub mod account;
pub mod assignment;
pub mod booking;
pub mod enums;
pub mod service;
