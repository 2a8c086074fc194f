//! Rating aggregate math.

/// Mean of `ratings` rounded to one decimal place, `0.0` when empty.
///
/// The product's displayed rating is always a full recompute over the live
/// review set; callers must never patch the aggregate incrementally.
pub fn average_to_one_decimal(ratings: &[u8]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: u32 = ratings.iter().map(|&r| u32::from(r)).sum();
    let mean = f64::from(sum) / ratings.len() as f64;
    (mean * 10.0).round() / 10.0
}
