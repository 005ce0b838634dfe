pub mod checkout_service;
pub mod discount_service;
pub mod payment_service;
pub mod user_service;

pub use checkout_service::*;
pub use discount_service::*;
pub use payment_service::*;
pub use user_service::*;
