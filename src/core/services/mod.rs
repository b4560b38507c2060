pub mod chart_service;
pub mod revenue_service;

pub use chart_service::{ChartService, PeriodBucket};
pub use revenue_service::{RevenueService, RevenueSummary};

use crate::errors::RevenueError;
use crate::storage::StoreError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Invalid(String),
}

impl From<RevenueError> for ServiceError {
    fn from(err: RevenueError) -> Self {
        ServiceError::Invalid(err.to_string())
    }
}
