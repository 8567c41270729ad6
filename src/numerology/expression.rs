//! Pythagorean name-expression number.

use super::life_path::reduce;

/// Computes the expression number of a full name.
///
/// Letters are uppercased and stripped of diacritics before lookup in the
/// Pythagorean table, so `José` and `JOSE` produce the same number. Any
/// character outside A-Z (and Ñ) contributes nothing.
#[must_use]
pub fn expression(name: &str) -> u32 {
    let sum = name
        .chars()
        .flat_map(char::to_uppercase)
        .map(fold_diacritic)
        .filter_map(letter_value)
        .sum();

    reduce(sum)
}

/// Maps accented Spanish vowels onto their base letter. Ñ is a letter of
/// its own, not a diacritic, and passes through.
const fn fold_diacritic(c: char) -> char {
    match c {
        'Á' | 'À' | 'Â' | 'Ä' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Ö' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        other => other,
    }
}

/// The fixed Pythagorean letter table. Ñ shares the value of N.
const fn letter_value(c: char) -> Option<u32> {
    match c {
        'A' | 'J' | 'S' => Some(1),
        'B' | 'K' | 'T' => Some(2),
        'C' | 'L' | 'U' => Some(3),
        'D' | 'M' | 'V' => Some(4),
        'E' | 'N' | 'Ñ' | 'W' => Some(5),
        'F' | 'O' | 'X' => Some(6),
        'G' | 'P' | 'Y' => Some(7),
        'H' | 'Q' | 'Z' => Some(8),
        'I' | 'R' => Some(9),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_ana_lopez() {
        // A1 N5 A1 + L3 O6 P7 E5 Z8 = 36 -> 9
        assert_eq!(expression("Ana Lopez"), 9);
    }

    #[test]
    fn test_expression_case_insensitive() {
        assert_eq!(expression("ana lopez"), expression("ANA LOPEZ"));
        assert_eq!(expression("Jose"), expression("jOsE"));
    }

    #[test]
    fn test_expression_accent_invariant() {
        assert_eq!(expression("José"), expression("JOSE"));
        assert_eq!(expression("María Núñez"), expression("MARIA NUÑEZ"));
    }

    #[test]
    fn test_expression_enye_counts_as_n() {
        assert_eq!(expression("Ñ"), expression("N"));
    }

    #[test]
    fn test_expression_ignores_non_letters() {
        assert_eq!(expression("Ana  Lopez!!"), expression("Ana Lopez"));
        assert_eq!(expression("A-na Lo.pez"), expression("Ana Lopez"));
    }

    #[test]
    fn test_expression_empty_input() {
        assert_eq!(expression(""), 0);
        assert_eq!(expression("123 !?"), 0);
    }

    #[test]
    fn test_letter_table_covers_alphabet() {
        for c in 'A'..='Z' {
            assert!(letter_value(c).is_some(), "missing letter {c}");
        }
        assert_eq!(letter_value('Ñ'), Some(5));
    }
}
