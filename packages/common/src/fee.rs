//! Registration fee policy.
//!
//! A step function over the number of registered events, not a per-event sum:
//! the third event onwards is covered by the flat 120 tier.

/// Total fee (in rupees) owed for `events_count` registrations.
pub fn calculate_amount(events_count: u32) -> u32 {
    match events_count {
        0 => 0,
        1 => 50,
        2 => 80,
        _ => 120,
    }
}
