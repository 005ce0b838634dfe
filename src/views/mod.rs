pub mod login_screen;
pub mod login_view;

pub use login_screen::*;
pub use login_view::*;
