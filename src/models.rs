use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw simulation request as read from the command line or a config file.
///
/// Numbers are signed so that negative values survive parsing and can be
/// rejected by validation with the offending process named.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SimConfig {
    #[serde(default = "default_time_quantum")]
    pub time_quantum: i64,
    #[serde(default)]
    pub context_switch_time: i64,
    #[serde(default = "AlgoConfig::all")]
    pub algorithms: Vec<AlgoConfig>,
    #[serde(default)]
    pub parallel: bool,
    pub processes: Vec<ProcessConfig>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProcessConfig {
    pub id: String,
    pub arrival_time: i64,
    pub burst_time: i64,
}

impl ProcessConfig {
    pub fn new(id: impl Into<String>, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlgoConfig {
    Fcfs,
    Spn,
    Hrrn,
    Rr,
    Srtf,
}

impl AlgoConfig {
    /// Canonical comparison order.
    pub const ALL: [AlgoConfig; 5] = [
        AlgoConfig::Fcfs,
        AlgoConfig::Spn,
        AlgoConfig::Hrrn,
        AlgoConfig::Rr,
        AlgoConfig::Srtf,
    ];

    pub fn all() -> Vec<AlgoConfig> {
        Self::ALL.to_vec()
    }

    /// Lowercase identifier used by the CLI and config files.
    pub fn key(&self) -> &'static str {
        match self {
            AlgoConfig::Fcfs => "fcfs",
            AlgoConfig::Spn => "spn",
            AlgoConfig::Hrrn => "hrrn",
            AlgoConfig::Rr => "rr",
            AlgoConfig::Srtf => "srtf",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AlgoConfig::Fcfs => "First-Come, First-Served",
            AlgoConfig::Spn => "Shortest Process Next",
            AlgoConfig::Hrrn => "Highest Response Ratio Next",
            AlgoConfig::Rr => "Round Robin",
            AlgoConfig::Srtf => "Shortest Remaining Time First",
        }
    }
}

impl fmt::Display for AlgoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlgoConfig::Fcfs => "FCFS",
            AlgoConfig::Spn => "SPN",
            AlgoConfig::Hrrn => "HRRN",
            AlgoConfig::Rr => "RR",
            AlgoConfig::Srtf => "SRTF",
        };
        f.write_str(label)
    }
}

pub(crate) fn default_time_quantum() -> i64 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_apply_when_fields_are_missing() {
        let config: SimConfig = serde_json::from_str(
            r#"{ "processes": [ { "id": "P1", "arrival_time": 0, "burst_time": 3 } ] }"#,
        )
        .unwrap();
        assert_eq!(config.time_quantum, 2);
        assert_eq!(config.context_switch_time, 0);
        assert_eq!(config.algorithms, AlgoConfig::all());
        assert!(!config.parallel);
    }

    #[test]
    fn algorithms_parse_from_lowercase_names() {
        let config: SimConfig = toml::from_str(
            r#"
algorithms = ["rr", "srtf"]
processes = [ { id = "a", arrival_time = 0, burst_time = 1 } ]
"#,
        )
        .unwrap();
        assert_eq!(config.algorithms, vec![AlgoConfig::Rr, AlgoConfig::Srtf]);
    }

    #[test]
    fn display_uses_upper_case_labels() {
        let labels: Vec<String> = AlgoConfig::ALL.iter().map(|a| a.to_string()).collect();
        assert_eq!(labels, vec!["FCFS", "SPN", "HRRN", "RR", "SRTF"]);
    }
}
