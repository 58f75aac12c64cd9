/// One plotted entity. Coordinates may be NaN when the source row was malformed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    /// Both coordinates are non-zero numbers. Only such points are jittered,
    /// which means a point sitting exactly on an axis never moves.
    pub fn is_plottable(&self) -> bool {
        is_truthy(self.x) && is_truthy(self.y)
    }
}

/// `0`, `-0` and `NaN` are falsy; every other number is truthy.
pub fn is_truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

/// Numeric cast of a CSV field with browser unary-plus semantics: a missing
/// field is NaN, a blank field is zero, and anything unparseable is NaN.
pub fn coerce_number(field: Option<&str>) -> f64 {
    let Some(field) = field else {
        return f64::NAN;
    };
    let text = field.trim();
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = parse_radix(text) {
        return value;
    }

    let decimal = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !decimal || !text.chars().any(|c| c.is_ascii_digit()) {
        return f64::NAN;
    }
    text.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &text[2..];
    Some(
        u64::from_str_radix(digits, radix)
            .map(|v| v as f64)
            .unwrap_or(f64::NAN),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_like_unary_plus() {
        assert_eq!(coerce_number(Some("21")), 21.0);
        assert_eq!(coerce_number(Some(" 22.8 ")), 22.8);
        assert_eq!(coerce_number(Some("-3.5e2")), -350.0);
        assert_eq!(coerce_number(Some(".5")), 0.5);
        assert_eq!(coerce_number(Some("0x1A")), 26.0);
        assert_eq!(coerce_number(Some("")), 0.0);
        assert_eq!(coerce_number(Some("   ")), 0.0);
        assert_eq!(coerce_number(Some("-Infinity")), f64::NEG_INFINITY);
    }

    #[test]
    fn unparseable_fields_are_nan() {
        for field in ["abc", "inf", "nan", "NaN", "1,5", "e5", "1e", "0xZZ", "--1"] {
            assert!(coerce_number(Some(field)).is_nan(), "{field:?}");
        }
        assert!(coerce_number(None).is_nan());
    }

    #[test]
    fn truthiness_rejects_zero_and_nan() {
        assert!(!is_truthy(0.0));
        assert!(!is_truthy(-0.0));
        assert!(!is_truthy(f64::NAN));
        assert!(is_truthy(0.1));
        assert!(is_truthy(-2.0));

        assert!(Point::new("B", 25.0, 200.0).is_plottable());
        assert!(!Point::new("A", 0.0, 0.0).is_plottable());
        assert!(!Point::new("C", 12.0, f64::NAN).is_plottable());
    }
}
