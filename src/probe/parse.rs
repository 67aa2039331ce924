/// Extract the round-trip time in milliseconds from ping output.
///
/// Accepts `time=10.5 ms`, `time=15ms` and the Windows sub-millisecond form
/// `time<1ms`, which yields the bound itself. Matching is case-insensitive and the
/// first matching field wins.
pub fn parse_round_trip_ms(output: &str) -> Option<f64> {
    let lowered = output.to_ascii_lowercase();

    for (idx, _) in lowered.match_indices("time") {
        let rest = &lowered[idx + "time".len()..];
        let Some(rest) = rest.strip_prefix('=').or_else(|| rest.strip_prefix('<')) else {
            continue;
        };

        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            continue;
        }

        let (number, unit) = rest.split_at(number_len);
        if !unit.trim_start().starts_with("ms") {
            continue;
        }

        if let Ok(value) = number.parse::<f64>() {
            return Some(value);
        }
    }

    None
}
