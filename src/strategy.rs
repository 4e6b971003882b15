//! Attack-order enumeration: every permutation of the part set is a candidate

/// Generate all orderings of the indices 0..count, lexicographically.
///
/// Every ordering is a candidate attack order; for the five-part kraken this
/// is 120 candidates. Lexicographic output keeps the pre-sort tie-break
/// order deterministic.
pub fn enumerate_orders(count: usize) -> Vec<Vec<usize>> {
    let mut orders = Vec::new();
    let mut current = Vec::with_capacity(count);
    let mut used = vec![false; count];
    backtrack(count, &mut current, &mut used, &mut orders);
    orders
}

fn backtrack(
    count: usize,
    current: &mut Vec<usize>,
    used: &mut [bool],
    orders: &mut Vec<Vec<usize>>,
) {
    if current.len() == count {
        orders.push(current.clone());
        return;
    }
    for i in 0..count {
        if used[i] {
            continue;
        }
        used[i] = true;
        current.push(i);
        backtrack(count, current, used, orders);
        current.pop();
        used[i] = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn factorial(n: usize) -> usize {
        (1..=n).product()
    }

    #[test]
    fn produces_exactly_k_factorial_distinct_orders() {
        for k in 1..=5 {
            let orders = enumerate_orders(k);
            assert_eq!(orders.len(), factorial(k));

            let distinct: HashSet<Vec<usize>> = orders.iter().cloned().collect();
            assert_eq!(distinct.len(), orders.len());

            for order in &orders {
                let mut sorted = order.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, (0..k).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn orders_are_lexicographic() {
        let orders = enumerate_orders(3);
        assert_eq!(orders[0], vec![0, 1, 2]);
        assert_eq!(orders[1], vec![0, 2, 1]);
        assert_eq!(orders[5], vec![2, 1, 0]);
        let mut sorted = orders.clone();
        sorted.sort();
        assert_eq!(orders, sorted);
    }

    #[test]
    fn empty_set_has_one_empty_order() {
        let orders = enumerate_orders(0);
        assert_eq!(orders, vec![Vec::<usize>::new()]);
    }
}
