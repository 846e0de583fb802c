use rust_decimal::Decimal;
use tracing::debug;

use crate::account::{AccountError, BankAccount, OverdraftReason};

/// Largest single withdrawal [`LimitedWithdrawal`] lets through unless told otherwise.
pub const DEFAULT_WITHDRAWAL_LIMIT: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Decorates any [`BankAccount`] with a cap on individual withdrawals.
///
/// Everything is forwarded to the wrapped account, except that a withdrawal
/// above the limit is refused before the inner account sees it, so it neither
/// changes the balance nor reaches any subscriber.
///
/// Wrap a borrowed account (`LimitedWithdrawal::new(&mut account)`) to keep
/// using the account directly once the wrapper is dropped.
#[derive(Debug)]
pub struct LimitedWithdrawal<A> {
    inner: A,
    limit: Decimal,
}

impl<A: BankAccount> LimitedWithdrawal<A> {
    pub fn new(inner: A) -> Self {
        Self::with_limit(inner, DEFAULT_WITHDRAWAL_LIMIT)
    }

    pub fn with_limit(inner: A, limit: Decimal) -> Self {
        Self { inner, limit }
    }

    pub fn limit(&self) -> Decimal {
        self.limit
    }

    pub fn get_ref(&self) -> &A {
        &self.inner
    }

    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: BankAccount> BankAccount for LimitedWithdrawal<A> {
    fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        self.inner.deposit(amount)
    }

    fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount > self.limit {
            debug!(%amount, limit = %self.limit, "withdrawal over limit refused");
            return Err(AccountError::Overdraft {
                reason: OverdraftReason::LimitExceeded {
                    requested: amount,
                    limit: self.limit,
                },
            });
        }
        self.inner.withdraw(amount)
    }

    fn balance(&self) -> Decimal {
        self.inner.balance()
    }

    fn close(&mut self) -> Result<(), AccountError> {
        self.inner.close()
    }
}
