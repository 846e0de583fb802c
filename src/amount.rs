use std::fmt;

use rust_decimal::Decimal;

/// Renders an amount normalized, always with at least one fractional digit
/// (`200` as `200.0`, `200.50` as `200.5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayAmount(pub Decimal);

impl fmt::Display for DisplayAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let normalized = self.0.normalize();
        if normalized.scale() == 0 {
            write!(f, "{normalized}.0")
        } else {
            write!(f, "{normalized}")
        }
    }
}
