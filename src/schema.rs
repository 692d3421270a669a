use serde::{Deserialize, Serialize};

use crate::OutputPolicy;

/// One measurement emitted by the benchmark executable.
///
/// All six fields are mandatory; decoding fails before an incomplete
/// record can exist. Time fields are in the units the executable reports
/// (seconds for construction, microseconds per element for access).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BenchmarkRecord {
    pub vector: String,
    pub benchmark: String,
    pub construction_time: f64,
    pub space_bits_per_element: f64,
    pub random_access_time_per_element: f64,
    pub sequential_access_time_per_element: f64,
}

impl BenchmarkRecord {
    /// Canonical protocol-line form of this record. Reparsing the result
    /// yields an identical record.
    pub fn to_protocol_line(&self) -> String {
        format!(
            "RESULT Vector={} Benchmark={} ConstructionTime={} SpaceBitsPerElement={} \
             RandomAccessTimePerElement={} SequentialAccessTimePerElement={}",
            self.vector,
            self.benchmark,
            self.construction_time,
            self.space_bits_per_element,
            self.random_access_time_per_element,
            self.sequential_access_time_per_element,
        )
    }
}

/// Ordered accumulation of records across one run.
///
/// Outer order is corpus enumeration order, inner order is the order the
/// result lines appeared in a single invocation's output. Records are
/// never merged or deduplicated.
#[derive(Debug, Default)]
pub struct ResultTable {
    records: Vec<BenchmarkRecord>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb the records of one benchmark invocation, returning the
    /// sub-slice just appended for incremental reporting.
    pub fn append_run(&mut self, records: Vec<BenchmarkRecord>) -> &[BenchmarkRecord] {
        let start = self.records.len();
        self.records.extend(records);
        &self.records[start..]
    }

    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Run metadata persisted beside the result table.
#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub schema_version: u32,
    pub harness_version: String,
    pub timestamp: String,
    pub output_policy: OutputPolicy,
    pub corpus_dir: String,
    pub build_dir: String,
    pub executable: String,
    pub benchmarks: Vec<String>,
    pub total_records: usize,
}

pub const SCHEMA_VERSION: u32 = 1;
