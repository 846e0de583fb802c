use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::{
    amount::DisplayAmount,
    notifier::{Notifier, Subscriber},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Deposit,
    Withdraw,
    Close,
}

impl Operation {
    fn rejected_when_closed(self) -> &'static str {
        match self {
            Operation::Deposit => "Cannot deposit, account is closed",
            Operation::Withdraw => "Cannot withdraw, account is closed",
            Operation::Close => "Account is already closed",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Operation::Deposit => "deposit",
            Operation::Withdraw => "withdrawal",
            Operation::Close => "close",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OverdraftReason {
    #[error("Insufficient funds")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("Exceeded the limit")]
    LimitExceeded { requested: Decimal, limit: Decimal },
}

/// How a failure is presented to whoever drives the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidOperation,
    TransactionFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("Negative {} amount", .operation.noun())]
    NegativeAmount { operation: Operation },
    #[error("{reason}")]
    Overdraft { reason: OverdraftReason },
    #[error("{}", .operation.rejected_when_closed())]
    InvalidOperation { operation: Operation },
    #[error("Balance would exceed the largest representable amount")]
    BalanceOverflow { balance: Decimal, deposit: Decimal },
}

impl AccountError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AccountError::InvalidOperation { .. } => ErrorCategory::InvalidOperation,
            AccountError::NegativeAmount { .. }
            | AccountError::Overdraft { .. }
            | AccountError::BalanceOverflow { .. } => ErrorCategory::TransactionFailed,
        }
    }
}

/// State change that has been applied to an account; its `Display` form is
/// the message handed to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountEvent {
    Deposited(Decimal),
    Withdrawn(Decimal),
    Closed,
}

impl fmt::Display for AccountEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountEvent::Deposited(amount) => write!(f, "Deposited: ${}", DisplayAmount(*amount)),
            AccountEvent::Withdrawn(amount) => write!(f, "Withdrawn: ${}", DisplayAmount(*amount)),
            AccountEvent::Closed => f.write_str("Account closed"),
        }
    }
}

/// Operations shared by an account and everything that decorates it.
pub trait BankAccount {
    fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError>;
    fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError>;
    fn balance(&self) -> Decimal;
    fn close(&mut self) -> Result<(), AccountError>;
}

impl<A: BankAccount + ?Sized> BankAccount for &mut A {
    fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        (**self).deposit(amount)
    }

    fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        (**self).withdraw(amount)
    }

    fn balance(&self) -> Decimal {
        (**self).balance()
    }

    fn close(&mut self) -> Result<(), AccountError> {
        (**self).close()
    }
}

#[derive(Debug)]
pub struct Account {
    id: String,
    balance: Decimal,
    open: bool,
    notifier: Notifier,
}

impl Account {
    /// Opens an account. The opening balance is taken as is, without any
    /// sign check.
    pub fn new(id: impl Into<String>, opening_balance: Decimal) -> Self {
        Self {
            id: id.into(),
            balance: opening_balance,
            open: true,
            notifier: Notifier::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn add_subscriber(&mut self, subscriber: impl Subscriber + 'static) {
        self.notifier.add(Box::new(subscriber));
    }

    pub fn subscriber_count(&self) -> usize {
        self.notifier.len()
    }

    fn ensure_open(&self, operation: Operation) -> Result<(), AccountError> {
        if self.open {
            Ok(())
        } else {
            Err(AccountError::InvalidOperation { operation })
        }
    }

    // Mutation is applied before anyone hears about it. Callers have already
    // checked that the new balance is representable.
    fn apply(&mut self, event: AccountEvent) {
        match event {
            AccountEvent::Deposited(amount) => self.balance += amount,
            AccountEvent::Withdrawn(amount) => self.balance -= amount,
            AccountEvent::Closed => self.open = false,
        }
        debug!(account = %self.id, balance = %self.balance, ?event, "applied");
        self.notifier.notify_all(&event.to_string());
    }
}

impl BankAccount for Account {
    fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        self.ensure_open(Operation::Deposit)?;
        if amount < Decimal::ZERO {
            return Err(AccountError::NegativeAmount {
                operation: Operation::Deposit,
            });
        }
        if self.balance.checked_add(amount).is_none() {
            return Err(AccountError::BalanceOverflow {
                balance: self.balance,
                deposit: amount,
            });
        }
        self.apply(AccountEvent::Deposited(amount));
        Ok(())
    }

    fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        self.ensure_open(Operation::Withdraw)?;
        if amount < Decimal::ZERO {
            return Err(AccountError::NegativeAmount {
                operation: Operation::Withdraw,
            });
        }
        if amount > self.balance {
            return Err(AccountError::Overdraft {
                reason: OverdraftReason::InsufficientFunds {
                    requested: amount,
                    available: self.balance,
                },
            });
        }
        self.apply(AccountEvent::Withdrawn(amount));
        Ok(())
    }

    fn balance(&self) -> Decimal {
        self.balance
    }

    fn close(&mut self) -> Result<(), AccountError> {
        self.ensure_open(Operation::Close)?;
        self.apply(AccountEvent::Closed);
        Ok(())
    }
}
