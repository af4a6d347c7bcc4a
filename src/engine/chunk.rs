//! Work partitioning for the parallel coordinator.

/// Splits `total` work units into at most `workers` contiguous chunk sizes.
///
/// Every chunk is non-empty, the sizes sum to `total`, and the last chunk
/// absorbs the division remainder. Fewer units than workers degrades to one
/// unit per chunk; zero units yields no chunks at all.
pub fn chunk_sizes(total: usize, workers: usize) -> Vec<usize> {
    if total == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, total);
    let base = total / workers;
    let remainder = total % workers;

    let mut sizes = vec![base; workers];
    if let Some(last) = sizes.last_mut() {
        *last += remainder;
    }
    sizes
}

/// Splits `items` into contiguous chunks sized by [`chunk_sizes`].
pub fn partition<T>(mut items: Vec<T>, workers: usize) -> Vec<Vec<T>> {
    let sizes = chunk_sizes(items.len(), workers);
    let mut chunks = Vec::with_capacity(sizes.len());
    for size in sizes {
        let rest = items.split_off(size);
        chunks.push(std::mem::replace(&mut items, rest));
    }
    chunks
}
