use crate::core::policy::{LoanExclusivity, OutstandingLoanPolicy};
use crate::domain::notification::Notification;

/// Sink for the status message each library operation emits.
pub trait Notifier {
    fn notify(&self, notification: &Notification<'_>);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notification: &Notification<'_>) {
        (**self).notify(notification);
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, notification: &Notification<'_>) {
        (**self).notify(notification);
    }
}

pub trait PolicyProvider {
    fn loan_exclusivity(&self) -> LoanExclusivity;
    fn outstanding_loan_policy(&self) -> OutstandingLoanPolicy;
}
