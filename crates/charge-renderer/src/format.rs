//! Number formatting for reports and scene labels

/// Scientific notation with two mantissa decimals and a signed exponent of
/// at least two digits, e.g. `1.00e-06` or `-3.60e+01`.
pub fn scientific(value: f64) -> String {
    let raw = format!("{value:.2e}");

    // NaN and infinities carry no exponent
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return raw;
    };

    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.abs())
}

/// Distance label shown in the scene, e.g. `1.41m`
pub fn metres(value: f64) -> String {
    format!("{value:.2}m")
}

/// A force or position vector as `(x, y, z)` in scientific notation
pub fn scientific_vector(v: [f64; 3]) -> String {
    format!(
        "({}, {}, {})",
        scientific(v[0]),
        scientific(v[1]),
        scientific(v[2])
    )
}
