/// Largest board the points field accepts, bigger values are capped.
pub(crate) const MAX_POINT_INPUT: u32 = 10_000;

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Reads the points field, anything that is not a positive integer becomes an empty board.
pub(crate) fn parse_point_count(value: &str) -> u32 {
    value
        .trim()
        .parse::<i64>()
        .map_or(0, |count| count.clamp(0, MAX_POINT_INPUT.into()) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_count_input_degrades_to_empty_board() {
        assert_eq!(parse_point_count("5"), 5);
        assert_eq!(parse_point_count(" 12 "), 12);
        assert_eq!(parse_point_count(""), 0);
        assert_eq!(parse_point_count("-4"), 0);
        assert_eq!(parse_point_count("abc"), 0);
        assert_eq!(parse_point_count("99999999"), MAX_POINT_INPUT);
    }
}
