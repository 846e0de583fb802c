/// Account state, the error taxonomy, and the [`account::BankAccount`]
/// capability set that decorators implement as well.
pub mod account;

/// Human-readable rendering of amounts.
pub mod amount;

/// Subscriber registry fired after every applied account mutation, plus a
/// subscriber that logs to any writer.
pub mod notifier;

/// Withdrawal limit decorator.
pub mod limit;

/// Interactive console walk-through. Kept in the library so the integration
/// tests can run it against in-memory input.
pub mod session;
