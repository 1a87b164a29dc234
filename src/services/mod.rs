//! Business logic services

pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod email;
pub mod stats;

use crate::{
    config::{AuthConfig, EmailConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub bookings: bookings::BookingsService,
    pub catalog: catalog::CatalogService,
    pub stats: stats::StatsService,
    pub email: email::EmailService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig, email_config: EmailConfig) -> Self {
        let email = email::EmailService::new(email_config);
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config, email.clone()),
            bookings: bookings::BookingsService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
            email,
        }
    }
}
