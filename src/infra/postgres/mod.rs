pub mod lock_repo;
pub mod payment_repo;
