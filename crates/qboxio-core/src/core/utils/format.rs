/// Formats a float the way Python's `repr` does.
///
/// Both Rust's `Debug` and Python's `repr` emit the shortest string that
/// round-trips and switch to scientific notation below `1e-4` and from `1e16`
/// upwards. They differ only in how the exponent is spelled (`1e-5` against
/// `1e-05`, `1e16` against `1e+16`) and in the names of non-finite values,
/// which is what this function normalizes.
pub fn python_float_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}
