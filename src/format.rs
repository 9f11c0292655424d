//! Number and duration formatting shared by the sinks and offline reports.

/// Thousands-grouped with at most one decimal: 1234567 → "1,234,567",
/// 12.5 → "12.5". Non-finite values print as "0".
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "0".to_string();
    }
    let sign = if n < 0.0 { "-" } else { "" };
    let whole = n.abs().floor();
    let tenths = ((n.abs() - whole) * 10.0).round() as u8;

    let digits = (whole as u64).to_string();
    let lead = match digits.len() % 3 {
        0 => 3,
        r => r,
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    grouped.push_str(&digits[..lead]);
    for chunk in digits.as_bytes()[lead..].chunks(3) {
        grouped.push(',');
        grouped.extend(chunk.iter().map(|b| *b as char));
    }

    if (1..10).contains(&tenths) {
        format!("{}{}.{}", sign, grouped, tenths)
    } else {
        format!("{}{}", sign, grouped)
    }
}

/// Compact form for tight HUD cells: "950", "12.3k", "4.56M", "7.89B".
pub fn format_compact(n: f64) -> String {
    if !n.is_finite() {
        return "0".to_string();
    }
    let abs = n.abs();
    if abs >= 1e12 {
        format!("{:.2}T", n / 1e12)
    } else if abs >= 1e9 {
        format!("{:.2}B", n / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", n / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}k", n / 1e3)
    } else {
        format!("{}", n.floor() as i64)
    }
}

/// `HH:MM:SS` for an elapsed duration in seconds. Hours are not wrapped.
pub fn format_duration(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}
