//! Published unit-price rounding.

/// Round a unit price for publication.
///
/// Below one dollar the price is kept to the cent; otherwise it is rounded to
/// two significant figures (`1234.5 → 1200`, `5.678 → 5.7`), never finer than
/// a cent. Non-positive and non-finite prices publish as 0.
pub fn round_unit_price(price: f64) -> f64 {
    if !price.is_finite() || price <= 0.0 {
        return 0.0;
    }
    if price < 1.0 {
        return round_cents(price);
    }
    let magnitude = price.log10().floor() as i32;
    let step = 10f64.powi(magnitude - 1);
    round_cents((price / step).round() * step)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
