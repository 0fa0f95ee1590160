use super::*;

fn items(n: usize) -> Vec<usize> {
    (1..=n).collect()
}

#[test]
fn shards_concatenate_to_original() {
    for len in 1..40 {
        for workers in 1..10 {
            let input = items(len);
            let shards = partition(&input, workers);
            let joined: Vec<usize> = shards.concat();
            assert_eq!(joined, input, "len={len} workers={workers}");
        }
    }
}

#[test]
fn shard_sizes_are_ceil_except_last() {
    let shards = partition(&items(23), 4);
    let sizes: Vec<usize> = shards.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![6, 6, 6, 5]);
}

#[test]
fn never_more_shards_than_workers() {
    for len in 1..40 {
        for workers in 1..10 {
            assert!(partition(&items(len), workers).len() <= workers);
        }
    }
}

#[test]
fn empty_shards_are_dropped() {
    // ceil(5/4) = 2 -> [2, 2, 1], the fourth worker gets nothing
    let shards = partition(&items(5), 4);
    assert_eq!(shards, vec![vec![1, 2], vec![3, 4], vec![5]]);
}

#[test]
fn more_workers_than_items() {
    let shards = partition(&items(3), 8);
    assert_eq!(shards, vec![vec![1], vec![2], vec![3]]);
}

#[test]
fn zero_workers_means_one_shard() {
    let shards = partition(&items(4), 0);
    assert_eq!(shards, vec![items(4)]);
}

#[test]
fn empty_input_gives_no_shards() {
    assert!(partition::<usize>(&[], 4).is_empty());
}

#[test]
fn work_items_keep_sequence_numbers() {
    let work = crate::WorkItem::numbered(["a", "b", "c", "d", "e"]);
    let shards = partition(&work, 2);
    assert_eq!(shards[1][0].sequence_number, 4);
    assert_eq!(shards[1][0].page_identifier, "d");
}
