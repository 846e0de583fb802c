use std::{fmt, io::Write};

use tracing::warn;

/// Receives a human-readable description after each applied account mutation.
pub trait Subscriber {
    fn notify(&mut self, message: &str) -> anyhow::Result<()>;
}

impl<F> Subscriber for F
where
    F: FnMut(&str),
{
    fn notify(&mut self, message: &str) -> anyhow::Result<()> {
        self(message);
        Ok(())
    }
}

/// Ordered list of subscribers, fired synchronously in attachment order.
///
/// A subscriber that fails is reported and skipped: the remaining subscribers
/// still run, and the caller that triggered the notification never sees the
/// failure, since the mutation has already been applied.
#[derive(Default)]
pub(crate) struct Notifier {
    subscribers: Vec<Box<dyn Subscriber>>,
}

impl Notifier {
    pub(crate) fn add(&mut self, subscriber: Box<dyn Subscriber>) {
        self.subscribers.push(subscriber);
    }

    pub(crate) fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub(crate) fn notify_all(&mut self, message: &str) {
        for (position, subscriber) in self.subscribers.iter_mut().enumerate() {
            if let Err(err) = subscriber.notify(message) {
                warn!(position, %message, "subscriber failed: {err:#}");
            }
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Writes every notification as one line to its sink.
#[derive(Debug)]
pub struct LoggingSubscriber<W> {
    sink: W,
}

impl<W: Write> LoggingSubscriber<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> Subscriber for LoggingSubscriber<W> {
    fn notify(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.sink, "{message}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    struct FailingSubscriber;

    impl Subscriber for FailingSubscriber {
        fn notify(&mut self, _message: &str) -> anyhow::Result<()> {
            anyhow::bail!("sink is gone")
        }
    }

    #[test]
    fn fires_in_attachment_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = Notifier::default();
        for tag in ["first", "second", "third"] {
            let seen = seen.clone();
            notifier.add(Box::new(move |msg: &str| {
                seen.borrow_mut().push(format!("{tag}: {msg}"))
            }));
        }
        notifier.notify_all("Account closed");
        assert_eq!(
            *seen.borrow(),
            vec![
                "first: Account closed",
                "second: Account closed",
                "third: Account closed"
            ]
        );
    }

    #[test]
    fn same_subscriber_can_be_attached_twice() {
        let count = Rc::new(RefCell::new(0));
        let mut notifier = Notifier::default();
        for _ in 0..2 {
            let count = count.clone();
            notifier.add(Box::new(move |_: &str| *count.borrow_mut() += 1));
        }
        assert_eq!(notifier.len(), 2);
        notifier.notify_all("Deposited: $1.0");
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn failing_subscriber_does_not_stop_the_rest() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = Notifier::default();
        notifier.add(Box::new(FailingSubscriber));
        let sink = seen.clone();
        notifier.add(Box::new(move |msg: &str| sink.borrow_mut().push(msg.to_owned())));
        notifier.notify_all("Withdrawn: $3.0");
        assert_eq!(*seen.borrow(), vec!["Withdrawn: $3.0"]);
    }

    #[test]
    fn logging_subscriber_writes_lines() {
        let mut logger = LoggingSubscriber::new(Vec::new());
        logger.notify("Deposited: $200.0").unwrap();
        logger.notify("Account closed").unwrap();
        assert_eq!(
            String::from_utf8(logger.into_inner()).unwrap(),
            "Deposited: $200.0\nAccount closed\n"
        );
    }
}
