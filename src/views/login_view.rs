use console::{style, Emoji};
use tracing::{info, warn};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");

/// Display sink for login results.
pub trait LoginView: Send + Sync {
    fn show_success(&self);
    fn show_error(&self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLoginView;

impl ConsoleLoginView {
    pub fn new() -> Self {
        Self
    }
}

impl LoginView for ConsoleLoginView {
    fn show_success(&self) {
        info!("Showing login success");
        println!("{} {}", CHECKMARK, style("Login successful!").green());
    }

    fn show_error(&self) {
        warn!("Showing login error");
        println!("{} {}", CROSS, style("Invalid username or password").red());
    }
}
