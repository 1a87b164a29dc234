//! Repository layer for database operations

pub mod accounts;
pub mod assignments;
pub mod bookings;
pub mod services;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub accounts: accounts::AccountsRepository,
    pub assignments: assignments::AssignmentsRepository,
    pub bookings: bookings::BookingsRepository,
    pub services: services::ServicesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            accounts: accounts::AccountsRepository::new(pool.clone()),
            assignments: assignments::AssignmentsRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            services: services::ServicesRepository::new(pool.clone()),
            pool,
        }
    }
}
