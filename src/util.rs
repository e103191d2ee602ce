/// Whole seconds left for display, rounded up so the countdown only shows
/// 00:00 once the deadline has actually passed.
pub fn ceil_secs(ms: u64) -> u64 {
    ms.div_ceil(1000)
}

/// Countdown as zero-padded minutes:seconds
pub fn format_clock(ms: u64) -> String {
    let total = ceil_secs(ms);
    format!("{:02}:{:02}", total / 60, total % 60)
}
