#![deny(missing_docs)]
//! Sequential, fail-fast execution of benchmark sweeps.
//!
//! Each tuple becomes one blocking shell invocation. The first non-zero exit
//! status stops the sweep; nothing is retried.

mod artifacts;
mod ledger;
mod runner;
mod sweep;

pub use artifacts::{append_log_fragment, backup_artifacts, backup_path};
pub use ledger::{append_ledger, read_ledger, LedgerRow};
pub use runner::{DryRunner, ExternalRunner, Invocation, ShellRunner};
pub use sweep::{run_sweep, InvocationRecord, SweepOptions, SweepOutcome, SweepReport};
