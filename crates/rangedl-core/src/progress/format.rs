//! Human-readable byte sizes (1024-based).

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * 1024 * 1024;

/// Formats a byte count with the largest unit it reaches: `999B`, `1.5KB`,
/// `1.0MB`, `2.0GB`. Exactly 1024 of a unit selects the next unit up.
pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{}B", bytes)
    } else if bytes < MIB {
        format!("{:.1}KB", bytes as f64 / KIB as f64)
    } else if bytes < GIB {
        format!("{:.1}MB", bytes as f64 / MIB as f64)
    } else {
        format!("{:.1}GB", bytes as f64 / GIB as f64)
    }
}
