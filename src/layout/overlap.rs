//! Overlap-column packing for simultaneous entities.
//!
//! Assigns each same-day entity a column index and a total-column count so
//! overlapping entities render side by side. Greedy lowest-free-column
//! assignment with a deterministic sort, then per-cluster width
//! propagation: every entity in one connected overlap cluster reports the
//! same total, otherwise columns render inconsistent widths within one
//! visual cluster.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::models::entity::ScheduledEntity;

/// Horizontal placement for one entity within its day column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnAssignment {
    pub column: usize,
    pub total_columns: usize,
}

/// The slice of an entity the packer needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackItem {
    pub id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl PackItem {
    /// Unsaved entities have no id yet and cannot be packed.
    pub fn from_entity(entity: &ScheduledEntity) -> Option<Self> {
        Some(Self {
            id: entity.id?,
            start: entity.start,
            end: entity.end,
        })
    }
}

/// Pack one day's visible entities into columns.
///
/// Always produces a total assignment; an empty input yields an empty map.
/// O(n²) worst case, fine for per-day entity counts in the tens.
pub fn pack_day(items: &[PackItem]) -> HashMap<i64, ColumnAssignment> {
    let mut assignments = HashMap::with_capacity(items.len());
    if items.is_empty() {
        return assignments;
    }

    // Sort by (start asc, end desc): among same-start entities the longer
    // one anchors column 0. Id breaks remaining ties so packing is
    // deterministic across renders.
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| {
        items[a]
            .start
            .cmp(&items[b].start)
            .then(items[b].end.cmp(&items[a].end))
            .then(items[a].id.cmp(&items[b].id))
    });

    // Greedy pass: the lowest-indexed column whose tracked end time has
    // passed takes the entity; otherwise open a new column.
    let mut column_ends: Vec<NaiveDateTime> = Vec::new();
    let mut columns = vec![0usize; items.len()];
    for &i in &order {
        let item = &items[i];
        match column_ends.iter().position(|&end| end <= item.start) {
            Some(col) => {
                column_ends[col] = item.end;
                columns[i] = col;
            }
            None => {
                columns[i] = column_ends.len();
                column_ends.push(item.end);
            }
        }
    }

    // Cluster pass: sweeping in start order, a new transitive overlap
    // cluster begins exactly when an entity starts at or after everything
    // seen so far has ended. Each cluster's width is one past its highest
    // occupied column.
    let mut cluster: Vec<usize> = Vec::new();
    let mut cluster_max_end: Option<NaiveDateTime> = None;
    for &i in &order {
        let item = &items[i];
        if let Some(max_end) = cluster_max_end {
            if item.start >= max_end {
                flush_cluster(&cluster, &columns, items, &mut assignments);
                cluster.clear();
                cluster_max_end = None;
            }
        }
        cluster_max_end = Some(match cluster_max_end {
            Some(max_end) => max_end.max(item.end),
            None => item.end,
        });
        cluster.push(i);
    }
    flush_cluster(&cluster, &columns, items, &mut assignments);

    assignments
}

fn flush_cluster(
    cluster: &[usize],
    columns: &[usize],
    items: &[PackItem],
    out: &mut HashMap<i64, ColumnAssignment>,
) {
    let total_columns = 1 + cluster.iter().map(|&i| columns[i]).max().unwrap_or(0);
    for &i in cluster {
        out.insert(
            items[i].id,
            ColumnAssignment {
                column: columns[i],
                total_columns,
            },
        );
    }
}
