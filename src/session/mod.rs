//! Console walk-through that wires an [`Account`], a [`LoggingSubscriber`]
//! and a [`LimitedWithdrawal`] together. It lives in the library so that the
//! integration tests can drive it with in-memory input and output.

use std::{
    cell::{Ref, RefCell},
    io::{self, BufRead, Write},
    rc::Rc,
};

use anyhow::Result;
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    account::{Account, AccountError, BankAccount, ErrorCategory},
    amount::DisplayAmount,
    limit::LimitedWithdrawal,
    notifier::LoggingSubscriber,
};
use tokens::TokenReader;

pub mod tokens;

/// Amount the session tries to deposit after closing the account.
const CLOSED_DEPOSIT: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Cloneable handle to one writer, so the session and the logging subscriber
/// print into the same stream in order.
#[derive(Debug, Default)]
pub struct SharedWriter<W>(Rc<RefCell<W>>);

impl<W> SharedWriter<W> {
    pub fn new(inner: W) -> Self {
        Self(Rc::new(RefCell::new(inner)))
    }

    pub fn contents(&self) -> Ref<'_, W> {
        self.0.borrow()
    }
}

impl<W> Clone for SharedWriter<W> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<W: Write> Write for SharedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.borrow_mut().flush()
    }
}

pub struct Session<R, W> {
    pub input: R,
    pub output: SharedWriter<W>,
}

impl<R, W> Session<R, W>
where
    R: BufRead,
    W: Write + 'static,
{
    /// Runs the script to its end or to the first failure, which is reported
    /// on the output. Only a failure to write that report is returned.
    pub fn run(self) -> Result<()> {
        let mut output = self.output;
        let mut tokens = TokenReader::new(self.input);

        if let Err(err) = script(&mut tokens, &mut output) {
            let line = describe_failure(&err);
            info!("session stopped: {line}");
            writeln!(output, "{line}")?;
        }
        output.flush()?;
        Ok(())
    }
}

fn script<R, W>(tokens: &mut TokenReader<R>, output: &mut SharedWriter<W>) -> Result<()>
where
    R: BufRead,
    W: Write + 'static,
{
    write!(output, "Enter initial balance: ")?;
    output.flush()?;
    let opening_balance: Decimal = tokens.parse_next("balance")?;
    write!(output, "Enter account number: ")?;
    output.flush()?;
    let account_id = tokens.next_token()?;

    let mut account = Account::new(account_id, opening_balance);
    writeln!(
        output,
        "Bank Account Created for Account Number: {}",
        account.id()
    )?;
    account.add_subscriber(LoggingSubscriber::new(output.clone()));

    let mut limited = LimitedWithdrawal::new(&mut account);

    write!(output, "Enter an amount to deposit: ")?;
    output.flush()?;
    let deposit: Decimal = tokens.parse_next("amount")?;
    limited.deposit(deposit)?;

    write!(output, "Enter an amount to withdraw: ")?;
    output.flush()?;
    let withdrawal: Decimal = tokens.parse_next("amount")?;
    limited.withdraw(withdrawal)?;

    writeln!(
        output,
        "Account Balance: {}",
        DisplayAmount(limited.balance())
    )?;

    limited.close()?;

    writeln!(output, "Depositing ${}", CLOSED_DEPOSIT)?;
    limited.deposit(CLOSED_DEPOSIT)?;
    Ok(())
}

fn describe_failure(err: &anyhow::Error) -> String {
    match err.downcast_ref::<AccountError>() {
        Some(account_err) => match account_err.category() {
            ErrorCategory::InvalidOperation => format!("Invalid operation: {account_err}"),
            ErrorCategory::TransactionFailed => format!("Transaction failed: {account_err}"),
        },
        None => format!("Unexpected error: {err:#}"),
    }
}
