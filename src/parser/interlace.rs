/// (first row, row step) for each of the four interlace passes.
const PASSES: [(usize, usize); 4] = [(0, 8), (4, 8), (2, 4), (1, 2)];

/// Destination rows in the order interlaced rows are stored.
pub fn interlaced_rows(height: usize) -> impl Iterator<Item = usize> {
    PASSES
        .into_iter()
        .flat_map(move |(start, step)| (start..height).step_by(step))
}

/// Reorders rows stored in interlace pass order into top-to-bottom order.
/// `data` must hold exactly `width * height` bytes.
pub fn deinterlace(data: &[u8], width: usize, height: usize) -> Vec<u8> {
    debug_assert_eq!(data.len(), width * height);

    let mut output = vec![0; data.len()];
    for (row, dest) in data.chunks_exact(width).zip(interlaced_rows(height)) {
        output[dest * width..(dest + 1) * width].copy_from_slice(row);
    }
    output
}
