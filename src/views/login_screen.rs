use crate::presenters::{LoginPresenter, PendingLogin};

/// Entry point for the login flow.
pub struct LoginScreen {
    presenter: LoginPresenter,
}

impl LoginScreen {
    pub fn new(presenter: LoginPresenter) -> Self {
        Self { presenter }
    }

    /// Forwards to the presenter and hands back its pending attempt.
    pub fn login(&self, username: &str, password: &str) -> PendingLogin {
        self.presenter.login(username, password)
    }
}
