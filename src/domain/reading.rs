/// Characters a reader is assumed to get through per minute.
pub const CHARS_PER_MINUTE: usize = 400;

/// Estimated reading time in whole minutes, rounded up.
///
/// Empty content yields zero.
pub fn estimate_minutes(content: &str) -> u32 {
    let chars = content.chars().count();
    u32::try_from(chars.div_ceil(CHARS_PER_MINUTE)).unwrap_or(u32::MAX)
}
