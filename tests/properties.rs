use std::collections::{BTreeSet, HashMap};

use proptest::collection::vec;
use proptest::prelude::*;

use classic_dsa::algorithms::{
    binary_search, bubble_sort, heap_sort, insertion_sort, interpolation_search, is_sorted,
    merge_sort, quick_sort, selection_sort,
};
use classic_dsa::graph::bfs_distances;
use classic_dsa::{
    AdjacencyList, AvlTree, BinarySearchTree, Container, HashTable, LinkedList, MaxHeap,
    RedBlackTree, SkipList,
};

#[derive(Debug, Clone)]
enum TableOp {
    Set(u16, u32),
    Delete(u16),
}

fn table_op() -> impl Strategy<Value = TableOp> {
    prop_oneof![
        3 => (0..200u16, any::<u32>()).prop_map(|(k, v)| TableOp::Set(k, v)),
        1 => (0..200u16).prop_map(TableOp::Delete),
    ]
}

fn tree_op() -> impl Strategy<Value = (bool, i16)> {
    (any::<bool>(), -100..100i16)
}

proptest! {
    #[test]
    fn heap_pops_in_descending_order(input in vec(any::<i32>(), 0..300)) {
        let mut heap: MaxHeap<i32> = input.iter().copied().collect();
        let mut popped = Vec::new();
        while let Ok(v) = heap.pop() {
            popped.push(v);
        }

        let mut expected = input;
        expected.sort_by(|a, b| b.cmp(a));
        prop_assert_eq!(expected, popped);
    }

    #[test]
    fn avl_stays_balanced(ops in vec(tree_op(), 0..400)) {
        let mut tree = AvlTree::new();
        let mut model = BTreeSet::new();

        for (insert, v) in ops {
            if insert {
                prop_assert_eq!(model.insert(v), tree.insert(v));
            } else {
                prop_assert_eq!(model.remove(&v), tree.remove(&v).is_ok());
            }
            prop_assert!(tree.is_valid());
        }

        prop_assert_eq!(model.iter().collect::<Vec<_>>(), tree.iter().collect::<Vec<_>>());
    }

    #[test]
    fn red_black_keeps_its_colours(ops in vec(tree_op(), 0..400)) {
        let mut tree = RedBlackTree::new();
        let mut model = BTreeSet::new();

        for (insert, v) in ops {
            if insert {
                prop_assert_eq!(model.insert(v), tree.insert(v));
            } else {
                prop_assert_eq!(model.remove(&v), tree.remove(&v).is_ok());
            }
            prop_assert!(tree.is_valid());
        }

        prop_assert_eq!(model.len(), tree.len());
        prop_assert_eq!(model.iter().collect::<Vec<_>>(), tree.iter().collect::<Vec<_>>());
    }

    #[test]
    fn hash_table_returns_the_latest_set(ops in vec(table_op(), 0..600)) {
        let mut table = HashTable::new();
        let mut model = HashMap::new();

        for op in ops {
            match op {
                TableOp::Set(k, v) => {
                    prop_assert_eq!(model.insert(k, v), table.set(k, v));
                }
                TableOp::Delete(k) => {
                    prop_assert_eq!(model.remove(&k), table.delete(&k).ok());
                }
            }
        }

        prop_assert_eq!(model.len(), table.len());
        for k in 0..200u16 {
            prop_assert_eq!(model.get(&k), table.get(&k).ok());
        }
    }

    #[test]
    fn skip_list_matches_a_sorted_map(ops in vec(table_op(), 0..400)) {
        let mut list = SkipList::new();
        let mut model = std::collections::BTreeMap::new();

        for op in ops {
            match op {
                TableOp::Set(k, v) => {
                    prop_assert_eq!(model.insert(k, v), list.insert(k, v));
                }
                TableOp::Delete(k) => {
                    prop_assert_eq!(model.remove(&k), list.remove(&k).ok());
                }
            }
        }

        prop_assert_eq!(
            model.iter().collect::<Vec<_>>(),
            list.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn insert_then_remove_round_trips(base in vec(-1000..1000i32, 0..100), extra in -2000..-1000i32) {
        let mut bst: BinarySearchTree<i32> = base.iter().copied().collect();
        let mut avl: AvlTree<i32> = base.iter().copied().collect();
        let mut rb: RedBlackTree<i32> = base.iter().copied().collect();
        let before: Vec<i32> = bst.iter().copied().collect();

        prop_assert!(bst.insert(extra));
        prop_assert!(avl.insert(extra));
        prop_assert!(rb.insert(extra));
        prop_assert_eq!(Ok(extra), bst.remove(&extra));
        prop_assert_eq!(Ok(extra), avl.remove(&extra));
        prop_assert_eq!(Ok(extra), rb.remove(&extra));

        prop_assert_eq!(&before, &bst.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(&before, &avl.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(&before, &rb.iter().copied().collect::<Vec<_>>());

        let mut list: LinkedList<i32> = base.iter().copied().collect();
        let at = base.len() / 2;
        list.insert(at, extra).unwrap();
        prop_assert_eq!(Ok(extra), list.remove(at));
        prop_assert_eq!(&base, &list.iter().copied().collect::<Vec<_>>());

        let mut heap: MaxHeap<i32> = base.iter().copied().collect();
        heap.push(i32::MAX);
        prop_assert_eq!(Ok(i32::MAX), heap.pop());
        let mut sorted = base.clone();
        sorted.sort();
        prop_assert_eq!(sorted, heap.into_sorted_vec());
    }

    #[test]
    fn sorts_agree_with_std(input in vec(any::<i16>(), 0..200)) {
        let mut expected = input.clone();
        expected.sort();

        let sorts: [fn(&mut [i16]); 6] =
            [bubble_sort, insertion_sort, selection_sort, merge_sort, quick_sort, heap_sort];
        for sort in sorts.iter() {
            let mut v = input.clone();
            sort(&mut v);
            prop_assert!(is_sorted(&v));
            prop_assert_eq!(&expected, &v);

            // sorting something sorted changes nothing
            sort(&mut v);
            prop_assert_eq!(&expected, &v);
        }
    }

    #[test]
    fn searches_find_what_is_there(mut input in vec(0..10_000u32, 1..200), probe in 0..10_000u32) {
        input.sort();
        input.dedup();

        let expected = input.iter().position(|v| *v == probe);
        prop_assert_eq!(expected, binary_search(&input, &probe));
        prop_assert_eq!(expected, interpolation_search(&input, probe));

        for (i, v) in input.iter().enumerate() {
            prop_assert_eq!(Some(i), binary_search(&input, v));
            prop_assert_eq!(Some(i), interpolation_search(&input, *v));
        }
    }

    #[test]
    fn bfs_visits_each_vertex_once_by_distance(
        n in 1..60u32,
        edges in vec((0..60u32, 0..60u32), 0..150),
    ) {
        let mut graph = AdjacencyList::undirected();
        for v in 0..n {
            graph.add_vertex(v);
        }
        for (u, v) in edges {
            if u < n && v < n {
                graph.add_edge(&u, &v, ()).unwrap();
            }
        }

        let walk = bfs_distances(&graph, &0).unwrap();
        let mut seen = BTreeSet::new();
        for (vertex, _) in &walk {
            prop_assert!(seen.insert(*vertex));
        }
        prop_assert!(walk.windows(2).all(|pair| pair[0].1 <= pair[1].1));
        prop_assert_eq!(0, walk[0].1);

        // every edge joins vertices at most one step apart
        let distances: HashMap<u32, usize> = walk.iter().copied().collect();
        for (u, du) in &distances {
            for v in graph.neighbors(u).unwrap() {
                let dv = distances[&v];
                prop_assert!(*du <= dv + 1 && dv <= *du + 1);
            }
        }
    }
}

#[test]
fn binary_search_on_the_odd_numbers() {
    let odds = [1, 3, 5, 7, 9, 11];
    assert_eq!(Some(3), binary_search(&odds, &7));
    assert_eq!(None, binary_search(&odds, &4));
}
