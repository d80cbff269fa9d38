//! Payload delivered to match callbacks by the runtime.

/// A batch of record hits that satisfied a matcher.
#[derive(Debug, Clone, Default)]
pub struct Hits {
    pub count: u32,
    pub entries: Vec<Entry>,
    pub correlations: Vec<Correlation>,
    pub entity: EntityMetadata,
}

impl Hits {
    /// Timestamp of the first entry that carries one.
    pub fn timestamp(&self) -> Option<i64> {
        self.entries
            .iter()
            .find(|e| e.timestamp != 0)
            .map(|e| e.timestamp)
    }
}

/// One matched record.
#[derive(Debug, Clone, Default)]
pub struct Entry {
    pub timestamp: i64,
    pub entry: Vec<u8>,
    pub spool_idx: i64,
}

/// A correlation key value extracted alongside the hit.
#[derive(Debug, Clone, Default)]
pub struct Correlation {
    pub field: String,
    pub str_value: String,
    pub int_value: i64,
}

/// Where the hit came from.
#[derive(Debug, Clone, Default)]
pub struct EntityMetadata {
    pub process_id: u32,
    pub machine_id: String,
    pub container_id: String,
    pub pod_name: String,
    pub host_name: String,
    pub namespace: String,
    pub file_name: String,
    pub process_name: String,
    pub container_name: String,
    pub origin: bool,
}
