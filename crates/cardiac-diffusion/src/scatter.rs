//! Cell-ordered to grid-ordered scatter.

/// Write `values[k]` to `grid[indices[k]]` for every `k`.
///
/// Callers guarantee equal lengths and in-range indices. Runs serially:
/// the lookup is injective, but nothing in the type says so.
pub(crate) fn scatter(grid: &mut [f64], indices: &[usize], values: &[f64]) {
    debug_assert_eq!(indices.len(), values.len());
    for (&g, &v) in indices.iter().zip(values) {
        grid[g] = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_only_listed_indices() {
        let mut grid = vec![-1.0; 6];
        scatter(&mut grid, &[4, 0, 2], &[1.0, 2.0, 3.0]);
        assert_eq!(grid, vec![2.0, -1.0, 3.0, -1.0, 1.0, -1.0]);
    }

    #[test]
    fn empty_is_noop() {
        let mut grid = vec![0.5; 3];
        scatter(&mut grid, &[], &[]);
        assert_eq!(grid, vec![0.5; 3]);
    }
}
