use crate::WalletError;

/// User-facing error reporting, e.g. a toast. Adapter operations never call
/// this themselves.
pub trait Notifier {
    fn notify_error(&self, error: &WalletError);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_error(&self, error: &WalletError) {
        tracing::error!(kind = %error.kind(), "{error}");
    }
}

pub trait NotifyExt {
    /// Forwards an error to `notifier` and hands the result back unchanged.
    fn notify_err(self, notifier: &dyn Notifier) -> Self;
}

impl<T> NotifyExt for crate::Result<T> {
    fn notify_err(self, notifier: &dyn Notifier) -> Self {
        if let Err(err) = &self {
            notifier.notify_error(err);
        }
        self
    }
}
