pub mod api_errors;
pub mod payment;
pub mod webhook;
pub mod yookassa_client;
