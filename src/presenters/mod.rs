pub mod login_presenter;

pub use login_presenter::*;
