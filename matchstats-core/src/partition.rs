//! Contiguous sharding of a work list.

/// Split `items` into at most `worker_count` contiguous shards.
///
/// Every shard except possibly the last holds `ceil(len / worker_count)`
/// items. Empty shards are dropped, so fewer shards than requested may come
/// back (e.g. 3 items over 8 workers gives 3 shards of one). Concatenating
/// the shards in order reproduces `items` exactly.
///
/// A `worker_count` of zero is treated as one.
pub fn partition<T: Clone>(items: &[T], worker_count: usize) -> Vec<Vec<T>> {
    if items.is_empty() {
        return Vec::new();
    }
    let workers = worker_count.max(1);
    let shard_size = items.len().div_ceil(workers);
    items.chunks(shard_size).map(<[T]>::to_vec).collect()
}

#[cfg(test)]
#[path = "tests/partition_tests.rs"]
mod tests;
