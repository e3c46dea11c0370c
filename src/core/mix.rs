//! Composite provider fanning one write out to several children

use super::error::{DispatchError, Result};
use super::provider::Provider;
use super::record::Record;

/// Composite provider delivering every write to an ordered set of child
/// providers, deduplicated by type name.
///
/// Delivery to each child is independent: a failing (or panicking) child
/// never prevents delivery to its siblings. Failures are reported to
/// stderr and surfaced to the dispatcher as a partial-delivery error
/// after all children have been tried.
pub struct MixProvider {
    children: Vec<Box<dyn Provider>>,
}

impl MixProvider {
    pub fn new(first: Box<dyn Provider>, rest: Vec<Box<dyn Provider>>) -> Self {
        let mut mix = Self {
            children: Vec::with_capacity(1 + rest.len()),
        };
        mix.push(first);
        for provider in rest {
            mix.push(provider);
        }
        mix
    }

    /// Add a child provider; a child with an already-present type name is
    /// discarded.
    pub fn push(&mut self, provider: Box<dyn Provider>) {
        if self
            .children
            .iter()
            .any(|child| child.type_name() == provider.type_name())
        {
            return;
        }
        self.children.push(provider);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Provider for MixProvider {
    fn write(&mut self, record: &Record) -> Result<()> {
        let total = self.children.len();
        let mut failed = 0;

        for child in self.children.iter_mut() {
            // Per-child panic isolation: one bad sink must not take the
            // others down with it.
            let outcome =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| child.write(record)));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[log_dispatch] provider '{}' write failed: {}",
                        child.type_name(),
                        e
                    );
                    failed += 1;
                }
                Err(_) => {
                    eprintln!(
                        "[log_dispatch] provider '{}' panicked during write",
                        child.type_name()
                    );
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            Err(DispatchError::MixWriteFailures { failed, total })
        } else {
            Ok(())
        }
    }

    fn flush(&mut self) -> Result<()> {
        let total = self.children.len();
        let mut failed = 0;

        for child in self.children.iter_mut() {
            let outcome =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| child.flush()));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[log_dispatch] provider '{}' flush failed: {}",
                        child.type_name(),
                        e
                    );
                    failed += 1;
                }
                Err(_) => {
                    eprintln!(
                        "[log_dispatch] provider '{}' panicked during flush",
                        child.type_name()
                    );
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            Err(DispatchError::MixWriteFailures { failed, total })
        } else {
            Ok(())
        }
    }

    fn type_name(&self) -> &'static str {
        "mix"
    }
}
