/// Formats `value` the way C's `%.{precision}g` does: at most `precision`
/// significant digits, trailing zeros removed, scientific notation only for
/// very small or very large magnitudes.
pub fn format_g(value: f32, precision: usize) -> String {
    let value = value as f64;
    let precision = precision.max(1);

    if value == 0.0 {
        return "0".to_owned();
    }
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".to_owned() } else { "-inf".to_owned() };
    }

    // the exponent must be taken after rounding to `precision` digits
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, value)).to_owned()
    }
}

fn trim_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Splits `length` items into `pagecount` pages and returns the half-open
/// index range `[min, max)` of the 1-based `page`.
///
/// Out of range arguments yield an empty range.
#[cfg_attr(not(feature = "profiler"), allow(dead_code))]
pub fn paging(length: usize, page: u32, pagecount: u32) -> (usize, usize) {
    if length < 1 || pagecount < 1 || page < 1 || page > pagecount {
        return (0, 0);
    }

    let (page, pagecount) = (page as usize, pagecount as usize);
    let min = (length * (page - 1) + (pagecount - 1)) / pagecount;
    let max = (length * page + (pagecount - 1)) / pagecount;
    (min, max)
}
