use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("processes must not be empty")]
    EmptyProcesses,
    #[error("process id must not be empty")]
    EmptyProcessId,
    #[error("duplicate process id '{0}'")]
    DuplicateProcessId(String),
    #[error("burst time must be > 0 for process '{id}' (got {burst})")]
    InvalidBurstTime { id: String, burst: i64 },
    #[error("arrival time must be >= 0 for process '{id}' (got {arrival})")]
    NegativeArrivalTime { id: String, arrival: i64 },
    #[error("invalid process entry '{0}': expected id:arrival:burst")]
    InvalidProcessEntry(String),
    #[error("process set too long to simulate: latest arrival {latest_arrival} plus total burst {total_burst} overflows the clock")]
    TimeHorizonOverflow { latest_arrival: u64, total_burst: u128 },
    #[error("time quantum must be > 0 (got {0})")]
    InvalidTimeQuantum(i64),
    #[error("context switch time must be >= 0 (got {0})")]
    NegativeContextSwitch(i64),
    #[error("incomplete timeline for {algorithm}: {reason}")]
    IncompleteTimeline { algorithm: String, reason: String },
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("{0}")]
    Serialize(String),
    #[error("{0}")]
    Cli(String),
}

/// Coarse classification used by callers that only care about who has to fix
/// the problem.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidProcess,
    InvalidParameter,
    IncompleteTimeline,
    Input,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyProcesses
            | Error::EmptyProcessId
            | Error::DuplicateProcessId(_)
            | Error::InvalidBurstTime { .. }
            | Error::NegativeArrivalTime { .. }
            | Error::InvalidProcessEntry(_)
            | Error::TimeHorizonOverflow { .. } => ErrorKind::InvalidProcess,
            Error::InvalidTimeQuantum(_) | Error::NegativeContextSwitch(_) => {
                ErrorKind::InvalidParameter
            }
            Error::IncompleteTimeline { .. } => ErrorKind::IncompleteTimeline,
            Error::ConfigIo(_)
            | Error::ConfigParse(_)
            | Error::UnsupportedConfigFormat(_)
            | Error::Serialize(_)
            | Error::Cli(_) => ErrorKind::Input,
        }
    }

    pub(crate) fn incomplete(algorithm: impl ToString, reason: impl Into<String>) -> Self {
        Error::IncompleteTimeline {
            algorithm: algorithm.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
