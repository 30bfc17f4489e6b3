//! Partitioning origins and destinations into request-sized groups.

/// One batch of origins × destinations sent together in a single API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub origins: Vec<String>,
    pub destinations: Vec<String>,
}

impl Group {
    pub fn pair_count(&self) -> usize {
        self.origins.len() * self.destinations.len()
    }

    /// Iterates the group's pairs in row-major order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.origins.iter().flat_map(move |o| {
            self.destinations
                .iter()
                .map(move |d| (o.as_str(), d.as_str()))
        })
    }
}

/// Maximum origin and destination block lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSize {
    pub origins: usize,
    pub destinations: usize,
}

impl Default for BlockSize {
    fn default() -> Self {
        Self {
            origins: 3,
            destinations: 5,
        }
    }
}

/// Number of blocks of length `block` needed to cover `len` items.
///
/// A zero block size yields zero blocks.
pub fn block_count(len: usize, block: usize) -> usize {
    if block == 0 {
        return 0;
    }
    len.div_ceil(block)
}

/// Number of groups [`group_locations`] produces for the given list lengths.
pub fn group_count(origins: usize, destinations: usize, size: BlockSize) -> usize {
    block_count(origins, size.origins) * block_count(destinations, size.destinations)
}

/// Splits the cross product of `origins` and `destinations` into groups.
///
/// Groups are emitted row-major: every destination block for the first origin
/// block, then every destination block for the second, and so on. The last
/// block along each axis is shorter when the list length is not a multiple of
/// the block size. Empty input, or a zero block size, produces no groups.
pub fn group_locations(origins: &[String], destinations: &[String], size: BlockSize) -> Vec<Group> {
    if size.origins == 0 || size.destinations == 0 {
        return Vec::new();
    }

    let mut groups = Vec::with_capacity(group_count(origins.len(), destinations.len(), size));
    for origin_block in origins.chunks(size.origins) {
        for destination_block in destinations.chunks(size.destinations) {
            groups.push(Group {
                origins: origin_block.to_vec(),
                destinations: destination_block.to_vec(),
            });
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn names(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i}")).collect()
    }

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn test_block_count_boundaries() {
        assert_eq!(block_count(0, 3), 0);
        assert_eq!(block_count(3, 3), 1);
        assert_eq!(block_count(4, 3), 2);
        assert_eq!(block_count(6, 3), 2);
        assert_eq!(block_count(7, 3), 3);
        assert_eq!(block_count(5, 0), 0);
    }

    #[test]
    fn test_example_grouping() {
        let origins = s(&["A", "B", "C", "D"]);
        let destinations = s(&["X", "Y"]);
        let groups = group_locations(&origins, &destinations, BlockSize::default());

        assert_eq!(
            groups,
            vec![
                Group {
                    origins: s(&["A", "B", "C"]),
                    destinations: s(&["X", "Y"]),
                },
                Group {
                    origins: s(&["D"]),
                    destinations: s(&["X", "Y"]),
                },
            ]
        );
    }

    #[test]
    fn test_row_major_order() {
        let origins = names("o", 4);
        let destinations = names("d", 7);
        let size = BlockSize {
            origins: 2,
            destinations: 3,
        };
        let groups = group_locations(&origins, &destinations, size);

        let heads: Vec<(&str, &str)> = groups
            .iter()
            .map(|g| (g.origins[0].as_str(), g.destinations[0].as_str()))
            .collect();
        assert_eq!(
            heads,
            vec![
                ("o0", "d0"),
                ("o0", "d3"),
                ("o0", "d6"),
                ("o2", "d0"),
                ("o2", "d3"),
                ("o2", "d6"),
            ]
        );
    }

    #[test]
    fn test_partial_final_block_lengths() {
        let size = BlockSize {
            origins: 3,
            destinations: 5,
        };

        // L mod b != 0
        let groups = group_locations(&names("o", 7), &names("d", 12), size);
        assert_eq!(groups.len(), 3 * 3);
        assert_eq!(groups.last().unwrap().origins.len(), 7 % 3);
        assert_eq!(groups.last().unwrap().destinations.len(), 12 % 5);

        // L mod b == 0
        let groups = group_locations(&names("o", 6), &names("d", 10), size);
        assert_eq!(groups.len(), 2 * 2);
        assert_eq!(groups.last().unwrap().origins.len(), 3);
        assert_eq!(groups.last().unwrap().destinations.len(), 5);
    }

    #[test]
    fn test_cross_product_covered_exactly_once() {
        for l1 in 0..8 {
            for l2 in 0..8 {
                for b1 in 1..5 {
                    for b2 in 1..5 {
                        let origins = names("o", l1);
                        let destinations = names("d", l2);
                        let size = BlockSize {
                            origins: b1,
                            destinations: b2,
                        };
                        let groups = group_locations(&origins, &destinations, size);

                        assert_eq!(groups.len(), group_count(l1, l2, size));
                        assert_eq!(groups.len(), l1.div_ceil(b1) * l2.div_ceil(b2));

                        let mut seen: HashMap<(String, String), usize> = HashMap::new();
                        for g in &groups {
                            assert!(!g.origins.is_empty() && g.origins.len() <= b1);
                            assert!(!g.destinations.is_empty() && g.destinations.len() <= b2);
                            for (o, d) in g.pairs() {
                                *seen.entry((o.to_string(), d.to_string())).or_default() += 1;
                            }
                        }
                        assert_eq!(seen.len(), l1 * l2);
                        assert!(seen.values().all(|&n| n == 1));
                    }
                }
            }
        }
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        let size = BlockSize::default();
        assert!(group_locations(&[], &names("d", 3), size).is_empty());
        assert!(group_locations(&names("o", 3), &[], size).is_empty());
    }

    #[test]
    fn test_pairs_row_major() {
        let g = Group {
            origins: s(&["A", "B"]),
            destinations: s(&["X", "Y"]),
        };
        let pairs: Vec<_> = g.pairs().collect();
        assert_eq!(pairs, vec![("A", "X"), ("A", "Y"), ("B", "X"), ("B", "Y")]);
        assert_eq!(g.pair_count(), 4);
    }
}
