//! Application layer for the CLI: command routing, exit codes, progress UI.

mod command_dispatcher;
mod exit_handler;
mod progress_manager;

use std::process::ExitCode;

pub(crate) use command_dispatcher::run;

/// Process exit outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    /// Every requested workbook was listed or downloaded.
    Success,
    /// Nothing usable was produced.
    Failure,
    /// The requested workbook does not exist.
    NotFound,
    /// Some workbooks were downloaded, others were missing or never listed.
    Partial,
}

impl ProcessExit {
    fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
            Self::NotFound => 2,
            Self::Partial => 3,
        }
    }
}

impl From<ProcessExit> for ExitCode {
    fn from(exit: ProcessExit) -> Self {
        ExitCode::from(exit.code())
    }
}
