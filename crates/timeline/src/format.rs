//! Text helpers for timeline output.

/// Join items as English prose: `a`, `a and b`, `a, b, and c`.
///
/// With `use_and` false the last separator is a plain comma (or space for
/// two items).
pub fn comma_combine<S: AsRef<str>>(items: &[S], use_and: bool) -> String {
    let mut combined = String::new();
    for (i, item) in items.iter().enumerate() {
        if !combined.is_empty() {
            if items.len() > 2 {
                combined.push(',');
            }
            combined.push(' ');
            if use_and && i == items.len() - 1 {
                combined.push_str("and ");
            }
        }
        combined.push_str(item.as_ref());
    }
    combined
}

/// Insert thousands separators into a string of digits.
///
/// Anything after a leading run of digits (a sign is kept in front) is left
/// untouched.
pub fn group_digits(number: &str) -> String {
    let (sign, rest) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (digits, tail) = rest.split_at(end);

    let mut grouped = String::with_capacity(number.len() + digits.len() / 3);
    grouped.push_str(sign);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.push_str(tail);
    grouped
}

/// Format an unsigned count with thousands separators.
pub fn group_count(n: u64) -> String {
    group_digits(&n.to_string())
}

/// Format a whole-valued float with thousands separators.
pub fn group_float(value: f64) -> String {
    group_digits(&format!("{:.0}", value.floor()))
}
