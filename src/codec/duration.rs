//! Duration literals such as `300ms`, `5s` or `2h30m`.

use std::time::Duration;

use super::CoerceError;

const NANOS_PER_SEC: u128 = 1_000_000_000;

fn unit_nanos(unit: &str) -> Option<u128> {
    Some(match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => NANOS_PER_SEC,
        "m" => 60 * NANOS_PER_SEC,
        "h" => 3_600 * NANOS_PER_SEC,
        _ => return None,
    })
}

/// Parses a duration literal: a sequence of decimal numbers, each with an
/// optional fraction and a mandatory unit (`ns`, `us`, `µs`, `ms`, `s`,
/// `m`, `h`). A bare `0` is accepted. Negative values are rejected.
pub fn parse_duration(value: &str) -> Result<Duration, CoerceError> {
    let invalid = |reason| CoerceError::duration(value, reason);

    let (negative, mut rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_digits, after_int) = rest.split_at(int_len);

        let (frac_digits, after_number) = match after_int.strip_prefix('.') {
            Some(tail) => {
                let frac_len = tail.bytes().take_while(u8::is_ascii_digit).count();
                tail.split_at(frac_len)
            }
            None => ("", after_int),
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(invalid("expected a number"));
        }

        let unit_len = after_number
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_number.len());
        if unit_len == 0 {
            return Err(invalid("missing unit"));
        }
        let (unit, tail) = after_number.split_at(unit_len);
        let scale = unit_nanos(unit).ok_or_else(|| invalid("unknown unit"))?;

        let whole: u128 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| invalid("overflow"))?
        };
        let mut part = whole.checked_mul(scale).ok_or_else(|| invalid("overflow"))?;

        // Digits past nanosecond precision cannot change the result.
        let frac_digits = &frac_digits[..frac_digits.len().min(18)];
        if !frac_digits.is_empty() {
            let numerator: u128 = frac_digits.parse().map_err(|_| invalid("overflow"))?;
            let denominator = 10u128.pow(frac_digits.len() as u32);
            part = part
                .checked_add(numerator * scale / denominator)
                .ok_or_else(|| invalid("overflow"))?;
        }

        total = total.checked_add(part).ok_or_else(|| invalid("overflow"))?;
        rest = tail;
    }

    if negative && total != 0 {
        return Err(invalid("negative duration"));
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| invalid("overflow"))?;
    Ok(Duration::new(secs, (total % NANOS_PER_SEC) as u32))
}

/// Renders `value / unit` with the fractional part trimmed of trailing zeros.
fn fraction(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let width = unit.ilog10() as usize;
    let digits = format!("{frac:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

/// Formats a duration in the literal syntax accepted by [`parse_duration`],
/// e.g. `2h30m0s`, `1.5s` or `250ms`.
pub fn format_duration(value: Duration) -> String {
    let nanos = value.as_nanos();
    match nanos {
        0 => "0s".to_string(),
        n if n < 1_000 => format!("{n}ns"),
        n if n < 1_000_000 => format!("{}µs", fraction(n, 1_000)),
        n if n < NANOS_PER_SEC => format!("{}ms", fraction(n, 1_000_000)),
        n => {
            let hours = n / (3_600 * NANOS_PER_SEC);
            let minutes = n / (60 * NANOS_PER_SEC) % 60;
            let seconds = fraction(n % (60 * NANOS_PER_SEC), NANOS_PER_SEC);
            if hours > 0 {
                format!("{hours}h{minutes}m{seconds}s")
            } else if minutes > 0 {
                format!("{minutes}m{seconds}s")
            } else {
                format!("{seconds}s")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_units() {
        assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_duration("300ms").unwrap(), Duration::from_millis(300));
        assert_eq!(parse_duration("7us").unwrap(), Duration::from_micros(7));
        assert_eq!(parse_duration("7µs").unwrap(), Duration::from_micros(7));
        assert_eq!(parse_duration("12ns").unwrap(), Duration::from_nanos(12));
        assert_eq!(parse_duration("3m").unwrap(), Duration::from_secs(180));
    }

    #[test]
    fn test_parse_compound_and_fractions() {
        assert_eq!(
            parse_duration("2h30m").unwrap(),
            Duration::from_secs(2 * 3_600 + 30 * 60)
        );
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5_400));
        assert_eq!(parse_duration(".5s").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("1m0.25s").unwrap(), Duration::from_millis(60_250));
        assert_eq!(parse_duration("+1s").unwrap(), Duration::from_secs(1));
    }

    #[test]
    fn test_parse_zero_forms() {
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("-0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("0s").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_parse_errors() {
        for text in [
            "",
            "5",
            "s",
            "5x",
            "1.s.",
            "-5s",
            "1h-5m",
            ".",
            "94522879700260684295381835.9h",
            "99999999999999999999999999999999999999999h",
        ] {
            assert!(
                matches!(parse_duration(text), Err(CoerceError::Duration { .. })),
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_format() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_nanos(15)), "15ns");
        assert_eq!(format_duration(Duration::from_nanos(1_500)), "1.5µs");
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(1_500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_duration(Duration::from_secs(9_000)), "2h30m0s");
    }

    #[test]
    fn test_format_parses_back() {
        for value in [
            Duration::from_nanos(1),
            Duration::from_nanos(123_456_789),
            Duration::from_secs(86_400 * 3 + 1),
            Duration::new(59, 999_999_999),
        ] {
            assert_eq!(parse_duration(&format_duration(value)).unwrap(), value);
        }
    }
}
