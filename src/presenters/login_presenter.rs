use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error};

use crate::{
    models::credentials::Credentials,
    services::{UserService, UserServiceError},
    views::LoginView,
};

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("User service error: {0}")]
    Service(#[from] UserServiceError),

    #[error("Login task failed: {0}")]
    Task(#[from] JoinError),
}

/// Handle to a login attempt that is still running.
///
/// The view is updated by the task itself, whether or not the handle is
/// awaited. Dropping the handle detaches the task.
#[derive(Debug)]
pub struct PendingLogin {
    handle: JoinHandle<Result<bool, UserServiceError>>,
}

impl PendingLogin {
    /// Waits for the attempt: `Ok(true)` authenticated, `Ok(false)`
    /// rejected. Service failures come back as errors and never reach the
    /// view.
    pub async fn outcome(self) -> Result<bool, LoginError> {
        Ok(self.handle.await??)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

pub struct LoginPresenter {
    view: Arc<dyn LoginView>,
    service: Arc<dyn UserService>,
}

impl LoginPresenter {
    pub fn new(view: Arc<dyn LoginView>, service: Arc<dyn UserService>) -> Self {
        Self { view, service }
    }

    /// Starts a login attempt on the runtime and returns without waiting.
    /// Must be called from within a tokio runtime. Concurrent attempts may
    /// update the view in any order.
    pub fn login(&self, username: &str, password: &str) -> PendingLogin {
        let credentials = Credentials::new(username, password);
        let view = Arc::clone(&self.view);
        let service = Arc::clone(&self.service);

        debug!("Dispatching login for user: {}", credentials.username);
        let handle = tokio::spawn(async move {
            match service.login(&credentials).await {
                Ok(true) => {
                    view.show_success();
                    Ok(true)
                }
                Ok(false) => {
                    view.show_error();
                    Ok(false)
                }
                Err(e) => {
                    error!("Login for {} failed: {}", credentials.username, e);
                    Err(e)
                }
            }
        });

        PendingLogin { handle }
    }
}
