//! Service layer orchestrating the store clients.

pub mod company_service;
pub mod logo_key;
