//! Normalized record store.
//!
//! Records live in named partitions, each indexed by normalized display
//! name. The table is immutable between reloads; a reload builds a whole
//! new table off to the side and swaps it in atomically, so readers see
//! either the fully-old or the fully-new data set, never a partial one.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::models::Record;
use crate::schema::PartitionSchema;
use crate::source::{DataSourceError, TableSource};
use crate::utils::{normalize, title_case};

/// One partition: records indexed by normalized key.
#[derive(Debug)]
pub struct Partition {
    schema: PartitionSchema,
    index: HashMap<String, Record>,
    /// Display names in lexicographic order, for listing.
    names: Vec<String>,
}

impl Partition {
    pub fn schema(&self) -> &PartitionSchema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Exact lookup by normalized key.
    pub fn get(&self, normalized_key: &str) -> Option<&Record> {
        self.index.get(normalized_key)
    }

    /// Display names, lexicographically ordered.
    pub fn display_names(&self) -> &[String] {
        &self.names
    }

    /// All (normalized key, record) entries. Iteration order is not
    /// significant; callers that show results sort them.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.index.iter().map(|(k, r)| (k.as_str(), r))
    }
}

/// An immutable snapshot of the whole table, partitions in lookup
/// priority order.
#[derive(Debug)]
pub struct RecordStore {
    partitions: Vec<Partition>,
}

impl RecordStore {
    /// Build a store from a tabular source.
    ///
    /// Fails without producing a store if any partition is absent,
    /// unreadable, or missing its key column. When several rows
    /// normalize to the same key, the last row wins.
    pub fn load(
        source: &dyn TableSource,
        schemas: &[PartitionSchema],
    ) -> Result<Self, DataSourceError> {
        let mut partitions = Vec::with_capacity(schemas.len());

        for schema in schemas {
            let rows = source.read_partition(&schema.name)?;

            if !rows.is_empty() && !rows.iter().any(|r| r.contains_key(&schema.key_column)) {
                return Err(DataSourceError::MissingColumn {
                    partition: schema.name.clone(),
                    column: schema.key_column.clone(),
                });
            }

            let mut index: HashMap<String, Record> = HashMap::with_capacity(rows.len());
            for mut row in rows {
                let Some(raw_name) = row.remove(&schema.key_column) else {
                    continue;
                };
                let key = normalize(&raw_name);
                if key.is_empty() {
                    continue;
                }
                index.insert(
                    key,
                    Record {
                        display_name: title_case(&raw_name),
                        fields: row,
                    },
                );
            }

            let mut names: Vec<String> =
                index.values().map(|r| r.display_name.clone()).collect();
            names.sort();

            info!(
                partition = %schema.name,
                records = index.len(),
                "loaded partition"
            );

            partitions.push(Partition {
                schema: schema.clone(),
                index,
                names,
            });
        }

        Ok(Self { partitions })
    }

    /// Partitions in lookup priority order.
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn partition(&self, name: &str) -> Option<&Partition> {
        self.partitions.iter().find(|p| p.schema.name == name)
    }

    /// Exact lookup by normalized key within one partition.
    pub fn lookup(&self, partition: &str, normalized_key: &str) -> Option<&Record> {
        self.partition(partition)?.get(normalized_key)
    }

    pub fn total_records(&self) -> usize {
        self.partitions.iter().map(|p| p.len()).sum()
    }

    /// Every display name across all partitions, sorted and deduplicated.
    pub fn all_display_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .partitions
            .iter()
            .flat_map(|p| p.display_names().iter().cloned())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

/// Counts reported after a successful reload.
#[derive(Debug, Clone, Copy)]
pub struct ReloadSummary {
    pub partitions: usize,
    pub records: usize,
}

/// Shared handle over the live store.
///
/// Readers take cheap `Arc` snapshots and never block on a reload; the
/// reload mutex keeps at most one rebuild in flight.
pub struct SharedStore {
    current: RwLock<Arc<RecordStore>>,
    reload_lock: Mutex<()>,
}

impl SharedStore {
    pub fn new(store: RecordStore) -> Self {
        Self {
            current: RwLock::new(Arc::new(store)),
            reload_lock: Mutex::new(()),
        }
    }

    /// The current table. Lookups against the snapshot stay valid even
    /// if a reload swaps the table out underneath.
    pub async fn snapshot(&self) -> Arc<RecordStore> {
        self.current.read().await.clone()
    }

    /// Rebuild the table from the source and swap it in. On failure the
    /// previous table stays live, untouched.
    pub async fn reload(
        &self,
        source: &dyn TableSource,
        schemas: &[PartitionSchema],
    ) -> Result<ReloadSummary, DataSourceError> {
        let _guard = self.reload_lock.lock().await;

        let store = RecordStore::load(source, schemas)?;
        let summary = ReloadSummary {
            partitions: store.partitions().len(),
            records: store.total_records(),
        };

        *self.current.write().await = Arc::new(store);
        info!(
            records = summary.records,
            partitions = summary.partitions,
            "record table reloaded"
        );

        Ok(summary)
    }
}
