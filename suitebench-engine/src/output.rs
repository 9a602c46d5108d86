use std::time::Duration;

/// Insert thousands separators into the integer part of a decimal string.
pub fn format_number(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Format an operations-per-second rate: two decimals below 100, none above.
pub fn format_hz(hz: f64) -> String {
    if hz < 100.0 {
        format_number(&format!("{:.2}", hz))
    } else {
        format_number(&format!("{:.0}", hz))
    }
}

pub fn format_duration_human_readable(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2}μs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", nanos as f64 / 1_000_000_000.0)
    }
}

/// Human-readable rendering of a per-call time given in seconds.
pub fn format_seconds(seconds: f64) -> String {
    Duration::try_from_secs_f64(seconds)
        .map(format_duration_human_readable)
        .unwrap_or_else(|_| "n/a".to_string())
}
