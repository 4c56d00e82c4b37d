/// Sorts `data` in ascending order using selection sort.
///
/// Quadratic in the number of comparisons regardless of input order, which
/// makes it a fixed-cost baseline for cycle comparisons against the accelerator.
pub fn selection_sort(data: &mut [u16]) {
    let n = data.len();
    for i in 0..n.saturating_sub(1) {
        let mut min_idx = i;
        for j in i + 1..n {
            if data[j] < data[min_idx] {
                min_idx = j;
            }
        }
        data.swap(i, min_idx);
    }
}
