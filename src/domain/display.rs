//! Derived presentation values: avatars, amounts, dashboard ratios.

use crate::models::{DistributionSlice, OfferType};

/// Avatar palette; a name always maps to the same entry.
pub const AVATAR_PALETTE: [&str; 8] = [
    "#ef4444", "#f97316", "#eab308", "#22c55e", "#14b8a6", "#3b82f6", "#8b5cf6", "#ec4899",
];

/// Up to two uppercase initials: first letter of the first and last words.
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let first = words.first().and_then(|w| w.chars().next());
    let last = if words.len() > 1 {
        words.last().and_then(|w| w.chars().next())
    } else {
        None
    };

    match (first, last) {
        (None, _) => "?".to_string(),
        (Some(a), None) => a.to_uppercase().collect(),
        (Some(a), Some(b)) => a.to_uppercase().chain(b.to_uppercase()).collect(),
    }
}

/// Stable palette color for a name
pub fn avatar_color(name: &str) -> &'static str {
    let hash = name
        .trim()
        .to_lowercase()
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
    AVATAR_PALETTE[(hash as usize) % AVATAR_PALETTE.len()]
}

/// `1234.5` → `1 234.50 MAD`
pub fn format_amount(amount: f64, currency: &str) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    format!(
        "{}{}.{:02} {}",
        if negative { "-" } else { "" },
        grouped,
        fraction,
        currency
    )
}

/// Period-over-period change in percent. `None` when there is no baseline.
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous.abs() * 100.0)
}

/// `+12.5%`, `-3.0%`, or `n/a`
pub fn format_change(change: Option<f64>) -> String {
    match change {
        Some(c) if c >= 0.0 => format!("+{:.1}%", c),
        Some(c) => format!("{:.1}%", c),
        None => "n/a".to_string(),
    }
}

/// Share of each offer type in the distribution, in percent.
/// Offer types absent from the input get a zero share.
pub fn distribution_shares(slices: &[DistributionSlice]) -> Vec<(OfferType, u64, f64)> {
    let total: u64 = slices.iter().map(|s| s.count).sum();
    OfferType::ALL
        .iter()
        .map(|offer| {
            let count: u64 = slices
                .iter()
                .filter(|s| s.offer_type == *offer)
                .map(|s| s.count)
                .sum();
            let share = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            };
            (*offer, count, share)
        })
        .collect()
}

/// Text bar for terminal charts; `width` cells at 100%.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let cells = ((value / max) * width as f64).round() as usize;
    "#".repeat(cells.clamp(1, width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("amal idrissi"), "AI");
        assert_eq!(initials("Youssef El Amrani"), "YA");
        assert_eq!(initials("Karim"), "K");
        assert_eq!(initials("   "), "?");
    }

    #[test]
    fn test_avatar_color_is_stable() {
        assert_eq!(avatar_color("Amal Idrissi"), avatar_color(" amal idrissi "));
        assert!(AVATAR_PALETTE.contains(&avatar_color("Karim")));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1234.5, "MAD"), "1 234.50 MAD");
        assert_eq!(format_amount(999.999, "MAD"), "1 000.00 MAD");
        assert_eq!(format_amount(0.0, "EUR"), "0.00 EUR");
        assert_eq!(format_amount(-1500000.0, "MAD"), "-1 500 000.00 MAD");
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(150.0, 100.0), Some(50.0));
        assert_eq!(percent_change(50.0, 100.0), Some(-50.0));
        assert_eq!(percent_change(10.0, 0.0), None);
        assert_eq!(format_change(Some(12.345)), "+12.3%");
        assert_eq!(format_change(None), "n/a");
    }

    #[test]
    fn test_distribution_shares_cover_all_offers() {
        let slices = vec![
            DistributionSlice { offer_type: OfferType::Monthly, count: 3 },
            DistributionSlice { offer_type: OfferType::Annual, count: 1 },
        ];
        let shares = distribution_shares(&slices);
        assert_eq!(shares.len(), 4);
        assert_eq!(shares[0], (OfferType::Monthly, 3, 75.0));
        assert_eq!(shares[1], (OfferType::Quarterly, 0, 0.0));
        assert_eq!(shares[3], (OfferType::Annual, 1, 25.0));
        assert!(distribution_shares(&[]).iter().all(|(_, _, s)| *s == 0.0));
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(50.0, 100.0, 10), "#####");
        assert_eq!(bar(1.0, 1000.0, 10), "#");
        assert_eq!(bar(0.0, 100.0, 10), "");
    }
}
