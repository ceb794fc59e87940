//! Reading the retryability marker off an error.

use crate::error::AppError;

/// Errors that may carry an explicit retryability flag.
///
/// `None` means the error has no marker at all. The retry loop treats that
/// differently from `Some(false)`: only an explicit `false` stops it early.
pub trait Retryable {
    fn retry_marker(&self) -> Option<bool>;
}

impl Retryable for AppError {
    fn retry_marker(&self) -> Option<bool> {
        Some(self.is_retryable())
    }
}

impl Retryable for std::io::Error {
    fn retry_marker(&self) -> Option<bool> {
        None
    }
}

impl Retryable for anyhow::Error {
    fn retry_marker(&self) -> Option<bool> {
        self.downcast_ref::<AppError>().map(AppError::is_retryable)
    }
}

impl<T: Retryable + ?Sized> Retryable for Box<T> {
    fn retry_marker(&self) -> Option<bool> {
        (**self).retry_marker()
    }
}
