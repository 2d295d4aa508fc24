//! Value coercions shared by projection, search and sorting.
//!
//! Every rule here is total: a value that cannot be read as a number becomes
//! `0`. That makes `"abc"` and `"0"` tie when sorted, and the console has
//! always behaved that way.

use serde_json::Value;

/// String form of a cell value.
///
/// Strings are used as-is, whole floats drop their fraction (`10.0` → `"10"`),
/// `null` renders empty and containers render as compact JSON.
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => format_number(f),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Whether the value counts as "set": not null, not `false`, not `0`, not empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Returns `value` when it is set, otherwise `fallback`.
pub fn or_default(value: Option<&Value>, fallback: Value) -> Value {
    match value {
        Some(v) if is_truthy(v) => v.clone(),
        _ => fallback,
    }
}

/// Reads the leading base-10 integer of a string, ignoring whatever follows
/// (`"12/40"` → 12, `"  -3px"` → -3). `None` when no digit leads.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude = rest[..digits].parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Reads the leading decimal number of a string (`"12.5kg"` → 12.5).
/// `None` when no number leads.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end = 1;
    }
    let int_digits = bytes[end..].iter().take_while(|b| b.is_ascii_digit()).count();
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = bytes[end + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        if frac_digits > 0 || int_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-' | b'+')) {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    s[..end].parse::<f64>().ok()
}

/// Integer reading of a value; anything unreadable is `0`.
pub fn to_integer(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => parse_int_prefix(s).unwrap_or(0),
        _ => 0,
    }
}

/// Decimal reading of a value with currency and percentage formatting
/// stripped (`"$1,234.50"` → 1234.5, `"12%"` → 12). Unreadable is `0`.
pub fn to_decimal(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| !matches!(c, '$' | ',' | '%') && !c.is_whitespace())
                .collect();
            parse_float_prefix(&cleaned)
        }
        _ => None,
    };
    parsed.filter(|f| !f.is_nan()).unwrap_or(0.0)
}

/// Numerator of an `"x/y"` ratio; plain numbers are their own numerator.
pub fn ratio_numerator(value: &Value) -> i64 {
    match value {
        Value::String(s) => s.split('/').next().and_then(parse_int_prefix).unwrap_or(0),
        other => to_integer(other),
    }
}

/// Lower-cased string form, for case-insensitive comparisons.
pub fn to_text(value: &Value) -> String {
    display(value).to_lowercase()
}

/// Shortest string form of a float; whole values print without a fraction.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Thousands-grouped form with at most three fraction digits
/// (`1234.5` → `"1,234.5"`, `1000000` → `"1,000,000"`).
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return format_number(value);
    }
    let scaled = (value.abs() * 1000.0).round() as u128;
    let whole = scaled / 1000;
    let frac = scaled % 1000;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac > 0 {
        let frac = format!("{frac:03}");
        grouped.push('.');
        grouped.push_str(frac.trim_end_matches('0'));
    }
    if value < 0.0 && scaled > 0 {
        grouped.insert(0, '-');
    }
    grouped
}
