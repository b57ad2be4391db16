const KIBIBYTE: f64 = 1024.0;
const MEBIBYTE: f64 = 1024.0 * 1024.0;
const GIBIBYTE: f64 = 1024.0 * 1024.0 * 1024.0;

const K: f64 = 1000.0;
const M: f64 = K * 1000.0;
const B: f64 = M * 1000.0;
const T: f64 = B * 1000.0;

/// Format a byte size with 1024-based scaling and one decimal (`K`, `M`,
/// `G`). With `raw` the value is passed through unscaled. Negative values
/// (counter resets) fall into the unscaled branch.
pub fn format_bytes(raw: bool, value: i64) -> String {
    let size = value as f64;
    if raw || size < KIBIBYTE {
        return format!("{size:.0}");
    }
    if size < MEBIBYTE {
        return format!("{:.1}K", size / KIBIBYTE);
    }
    if size < GIBIBYTE {
        return format!("{:.1}M", size / MEBIBYTE);
    }
    format!("{:.1}G", size / GIBIBYTE)
}

/// Format a message count with 1000-based scaling and one decimal (`K`, `M`,
/// `B`, `T`). With `raw` the value is passed through unscaled.
pub fn format_count(raw: bool, value: i64) -> String {
    let size = value as f64;
    if raw || size < K {
        return format!("{size:.0}");
    }
    if size < M {
        return format!("{:.1}K", size / K);
    }
    if size < B {
        return format!("{:.1}M", size / M);
    }
    if size < T {
        return format!("{:.1}B", size / B);
    }
    format!("{:.1}T", size / T)
}
