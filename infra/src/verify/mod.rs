//! Remote verify service implementations.

pub mod messagebird;

#[cfg(test)]
mod tests;

pub use messagebird::{MessageBirdConfig, MessageBirdVerifyService};

/// Mask a phone number for logging, keeping only the last four characters.
pub fn mask_recipient(phone: &str) -> String {
    let char_count = phone.chars().count();
    if char_count <= 4 {
        return "*".repeat(char_count);
    }

    let visible_digits = 4;
    let masked_count = char_count - visible_digits;
    // Split on a char boundary; recipients are not guaranteed to be ASCII
    let split = phone
        .char_indices()
        .rev()
        .nth(visible_digits - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let last_digits = &phone[split..];

    if phone.starts_with('+') {
        format!("+{}{}", "*".repeat(masked_count - 1), last_digits)
    } else {
        format!("{}{}", "*".repeat(masked_count), last_digits)
    }
}
