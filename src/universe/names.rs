//! Client-visible names for bodies the SDE does not name directly

const ROMAN_NUMERALS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Greedy subtractive Roman numeral; zero yields an empty string
pub fn roman(mut n: u32) -> String {
    let mut out = String::new();
    for (value, numeral) in ROMAN_NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

pub fn star_name(system_name: &str) -> String {
    system_name.to_string()
}

pub fn planet_name(system_name: &str, celestial_index: u32) -> String {
    format!("{} {}", system_name, roman(celestial_index))
}

pub fn moon_name(planet_name: &str, orbit_index: u32) -> String {
    format!("{} - Moon {}", planet_name, roman(orbit_index))
}

pub fn belt_name(planet_name: &str, orbit_index: u32) -> String {
    format!("{} - Asteroid Belt {}", planet_name, roman(orbit_index))
}

pub fn stargate_name(system_name: &str) -> String {
    format!("Stargate ({})", system_name)
}

/// Station name from the orbited body, the owner and an optional operation.
///
/// A missing orbited body renders as the empty string, so the name keeps
/// its leading `"- "` or `" "` separator.
pub fn station_name(
    orbit_name: Option<&str>,
    corp_name: &str,
    operation_name: Option<&str>,
    use_operation_name: bool,
) -> String {
    let orbit = orbit_name.unwrap_or("");
    match operation_name {
        Some(op) if use_operation_name => format!("{} {} {}", orbit, corp_name, op),
        _ if orbit.is_empty() => format!("- {}", corp_name),
        _ => format!("{} - {}", orbit, corp_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Independent decoder used to check the encoder
    fn decode_roman(s: &str) -> u32 {
        let value = |c: char| match c {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            _ => panic!("not a numeral: {}", c),
        };
        let digits: Vec<u32> = s.chars().map(value).collect();
        let mut total = 0;
        for (i, d) in digits.iter().enumerate() {
            match digits.get(i + 1) {
                Some(next) if next > d => total -= *d as i64,
                _ => total += *d as i64,
            }
        }
        total as u32
    }

    #[test]
    fn test_roman_round_trip() {
        for n in 1..4000 {
            assert_eq!(decode_roman(&roman(n)), n, "n = {}", n);
        }
    }

    #[test]
    fn test_roman_known_values() {
        assert_eq!(roman(0), "");
        assert_eq!(roman(4), "IV");
        assert_eq!(roman(9), "IX");
        assert_eq!(roman(14), "XIV");
        assert_eq!(roman(1994), "MCMXCIV");
        assert_eq!(roman(3999), "MMMCMXCIX");
    }

    #[test]
    fn test_celestial_names() {
        assert_eq!(star_name("Jita"), "Jita");
        assert_eq!(planet_name("Jita", 4), "Jita IV");
        assert_eq!(moon_name("Jita IV", 1), "Jita IV - Moon I");
        assert_eq!(belt_name("Jita IV", 2), "Jita IV - Asteroid Belt II");
        assert_eq!(stargate_name("Jita"), "Stargate (Jita)");
    }

    #[test]
    fn test_station_name_with_orbit() {
        assert_eq!(
            station_name(Some("Jita IV - Moon 4"), "Caldari Navy", None, false),
            "Jita IV - Moon 4 - Caldari Navy"
        );
    }

    #[test]
    fn test_station_name_with_operation() {
        assert_eq!(
            station_name(Some("Jita IV - Moon IV"), "Caldari Navy", Some("Assembly Plant"), true),
            "Jita IV - Moon IV Caldari Navy Assembly Plant"
        );
        // Flag unset: the operation label is ignored
        assert_eq!(
            station_name(Some("Jita IV"), "Caldari Navy", Some("Assembly Plant"), false),
            "Jita IV - Caldari Navy"
        );
        // Flag set but no label known
        assert_eq!(
            station_name(Some("Jita IV"), "Caldari Navy", None, true),
            "Jita IV - Caldari Navy"
        );
    }

    #[test]
    fn test_station_name_without_orbit_keeps_leading_separator() {
        assert_eq!(station_name(None, "Caldari Navy", None, false), "- Caldari Navy");
        assert_eq!(
            station_name(None, "Caldari Navy", Some("Assembly Plant"), true),
            " Caldari Navy Assembly Plant"
        );
    }
}
