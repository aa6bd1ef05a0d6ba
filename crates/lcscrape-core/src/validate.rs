//! Per-field shape validation.
//!
//! Every heuristic match goes through [`validate`] before it may be
//! assigned to a record field. The three-way [`FieldOutcome`] keeps
//! "nothing matched" distinct from "matched but wrong shape", so tests
//! can tell the two apart.

/// Result of running one field heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The heuristic matched and the text passed its shape check.
    Found(String),
    /// No candidate text matched the heuristic at all.
    Absent,
    /// A candidate matched but failed the field's shape check.
    Malformed,
}

impl FieldOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, FieldOutcome::Found(_))
    }
}

/// Expected shape of a field's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Digits only after stripping `,` and `.` separators (e.g. "1,234").
    Numeric,
    /// Exactly one `/` with numeric text on both sides (e.g. "166/3671").
    Ratio,
    /// Contains both `%` and `.` with a numeric body (e.g. "65.67%").
    Percentage,
    /// Any non-empty text.
    FreeText,
}

/// Validate trimmed text against a shape. Empty input is `Absent`.
pub fn validate(shape: Shape, raw: &str) -> FieldOutcome {
    let text = raw.trim();
    if text.is_empty() {
        return FieldOutcome::Absent;
    }
    let ok = match shape {
        Shape::Numeric => is_numeric(text),
        Shape::Ratio => is_ratio(text),
        Shape::Percentage => is_percentage(text),
        Shape::FreeText => true,
    };
    if ok {
        FieldOutcome::Found(text.to_string())
    } else {
        FieldOutcome::Malformed
    }
}

/// Digits only after stripping `,` and `.` separators.
pub fn is_numeric(text: &str) -> bool {
    let stripped: String = text.chars().filter(|c| *c != ',' && *c != '.').collect();
    !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit())
}

/// Exactly one `/`, numeric on both sides.
pub fn is_ratio(text: &str) -> bool {
    let mut parts = text.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(left), Some(right), None) => is_numeric(left.trim()) && is_numeric(right.trim()),
        _ => false,
    }
}

/// Ends with `%`, contains `.`, numeric body.
pub fn is_percentage(text: &str) -> bool {
    if !text.contains('%') || !text.contains('.') {
        return false;
    }
    let body = text.trim_end_matches('%').trim();
    !body.is_empty() && body.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
}

/// Denominator of a ratio-shaped text, with separators stripped.
pub(crate) fn ratio_denominator(text: &str) -> Option<u64> {
    let denominator = text.split('/').nth(1)?;
    let stripped: String = denominator
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .collect();
    stripped.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_accepts_digits_and_separators() {
        assert!(is_numeric("1234"));
        assert!(is_numeric("1,234"));
        assert!(is_numeric("1.234"));
        assert!(!is_numeric("12a4"));
        assert!(!is_numeric(""));
        assert!(!is_numeric(",."));
    }

    #[test]
    fn ratio_requires_exactly_one_slash() {
        assert!(is_ratio("166/3671"));
        assert!(is_ratio("1,234/3,671"));
        assert!(!is_ratio("166"));
        assert!(!is_ratio("166/36/71"));
        assert!(!is_ratio("abc/123"));
        assert!(!is_ratio("/123"));
    }

    #[test]
    fn percentage_requires_percent_and_decimal_point() {
        assert!(is_percentage("65.67%"));
        assert!(!is_percentage("65%"));
        assert!(!is_percentage("65.67"));
        assert!(!is_percentage("n/a%"));
    }

    #[test]
    fn validate_distinguishes_absent_from_malformed() {
        assert_eq!(validate(Shape::Numeric, ""), FieldOutcome::Absent);
        assert_eq!(validate(Shape::Numeric, "   "), FieldOutcome::Absent);
        assert_eq!(validate(Shape::Numeric, "beginner"), FieldOutcome::Malformed);
        assert_eq!(
            validate(Shape::Numeric, "1,234"),
            FieldOutcome::Found("1,234".into())
        );
    }

    #[test]
    fn validate_is_idempotent_on_accepted_values() {
        for (shape, raw) in [
            (Shape::Numeric, "1,234"),
            (Shape::Ratio, "81/895"),
            (Shape::Percentage, "65.67%"),
            (Shape::FreeText, "Jane Doe"),
        ] {
            let FieldOutcome::Found(accepted) = validate(shape, raw) else {
                panic!("expected {raw} to be accepted");
            };
            assert_eq!(validate(shape, &accepted), FieldOutcome::Found(accepted.clone()));
        }
    }

    #[test]
    fn ratio_denominator_strips_separators() {
        assert_eq!(ratio_denominator("166/3,671"), Some(3671));
        assert_eq!(ratio_denominator("81/895"), Some(895));
        assert_eq!(ratio_denominator("166"), None);
    }
}
