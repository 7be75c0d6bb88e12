use kostologio_schemas::unit::Unit;

/// Tolerance subtracted before ceiling so a derived quantity that is an
/// exact integer up to floating-point noise is not rounded one step up.
const CEIL_EPSILON: f64 = 1e-9;

/// Structured consumption rate: `per_qty per_unit` consumed per
/// `base_qty base_unit` of the driving measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsumptionRate {
    pub per_qty: f64,
    pub per_unit: Unit,
    pub base_qty: f64,
    pub base_unit: Unit,
}

/// Quantity produced by [`derive_quantity`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedQuantity {
    pub quantity: f64,
    /// Unit the quantity is expressed in; `None` when no rate applied and
    /// the quantity is simply the base measurement.
    pub unit: Option<Unit>,
    /// True when the quantity was ceiled because the unit is piece-like.
    pub rounded: bool,
}

/// Parses a consumption description of the exact shape
/// `"<number> <unit> per <number> <m2|m3|lm|sheet>"`, e.g.
/// `"7 kg per 1 m2"` or `"4 units per 100 m2"`.
///
/// Anything else returns `None`, which the deriver treats as "no rate".
/// Numbers are plain decimals; no sign, exponent or locale separators.
pub fn parse_consumption(text: &str) -> Option<ConsumptionRate> {
    let tokens: Vec<&str> = text.trim().split_whitespace().collect();
    let [per_qty, per_unit, per, base_qty, base_unit] = tokens.as_slice() else {
        return None;
    };
    if !per.eq_ignore_ascii_case("per") {
        return None;
    }
    let per_qty = parse_plain_number(per_qty)?;
    let base_qty = parse_plain_number(base_qty)?;
    let per_unit = Unit::parse_token(per_unit)?;
    let base_unit = Unit::parse_token(base_unit)?;
    if !matches!(
        base_unit,
        Unit::SquareMeter | Unit::CubicMeter | Unit::LinearMeter | Unit::Sheet
    ) {
        return None;
    }
    Some(ConsumptionRate {
        per_qty,
        per_unit,
        base_qty,
        base_unit,
    })
}

/// Computes the required quantity of a line item from its consumption rate
/// and the driving base measurement. Without a rate the base amount passes
/// through 1:1. Piece-like result units are ceiled; continuous units are
/// not rounded.
pub fn derive_quantity(rate: Option<&ConsumptionRate>, base_amount: f64) -> DerivedQuantity {
    let Some(rate) = rate else {
        return DerivedQuantity {
            quantity: base_amount,
            unit: None,
            rounded: false,
        };
    };
    let factor = rate.per_qty / rate.base_qty;
    let mut quantity = base_amount * factor;
    let rounded = rate.per_unit.is_piece_like();
    if rounded {
        quantity = (quantity - CEIL_EPSILON).ceil();
    }
    DerivedQuantity {
        quantity,
        unit: Some(rate.per_unit),
        rounded,
    }
}

// Digits with at most one decimal point, matching the original format.
fn parse_plain_number(token: &str) -> Option<f64> {
    if token.is_empty()
        || !token.chars().all(|c| c.is_ascii_digit() || c == '.')
        || token.chars().filter(|c| *c == '.').count() > 1
        || token.starts_with('.')
        || token.ends_with('.')
    {
        return None;
    }
    token.parse().ok()
}
