pub mod cart;
pub mod credentials;
pub mod payment;

pub use cart::*;
pub use credentials::*;
pub use payment::*;
