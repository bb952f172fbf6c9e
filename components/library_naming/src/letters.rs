// components/library_naming/src/letters.rs
const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Name for the `index`-th entry using spreadsheet-column letters.
///
/// The sequence is bijective base-26: A, B, ..., Z, AA, AB, ..., ZZ, AAA, ...
///
/// # Examples
/// ```
/// use library_naming::letter_name;
/// assert_eq!(letter_name(0), "A");
/// assert_eq!(letter_name(26), "AA");
/// assert_eq!(letter_name(52), "BA");
/// ```
pub fn letter_name(index: usize) -> String {
    let radix = LETTERS.len();
    let mut remaining = index;
    let mut name = Vec::new();

    loop {
        name.push(LETTERS[remaining % radix]);
        remaining /= radix;
        if remaining == 0 {
            break;
        }
        // No zero digit in this numbering, so 26 must become AA rather than BA
        remaining -= 1;
    }

    name.reverse();
    // Every byte comes from LETTERS
    name.into_iter().map(char::from).collect()
}

/// How many whole copies of a name are needed so that `component_count`
/// components together reach `min_length` characters.
pub fn repetitions(min_length: usize, component_count: usize) -> usize {
    if component_count == 0 {
        return 1;
    }
    min_length.div_ceil(component_count).max(1)
}

/// Repeat `name` until a path of `component_count` such names has at least
/// `min_length` non-separator characters.
///
/// Repeating the whole string keeps names unique: two different names
/// repeated the same number of times never collide.
pub fn pad(name: &str, min_length: usize, component_count: usize) -> String {
    name.repeat(repetitions(min_length, component_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    #[case(0, "A")]
    #[case(1, "B")]
    #[case(25, "Z")]
    #[case(26, "AA")]
    #[case(27, "AB")]
    #[case(51, "AZ")]
    #[case(52, "BA")]
    #[case(26 + 26 * 25, "ZA")]
    #[case(26 + 26 * 25 + 25, "ZZ")]
    #[case(26 + 26 * 26, "AAA")]
    fn letter_name_matches_spreadsheet_columns(#[case] index: usize, #[case] expected: &str) {
        assert_eq!(letter_name(index), expected);
    }

    #[test]
    fn letter_names_strictly_increase() {
        // Shorter names sort first, equal lengths sort alphabetically
        for i in 0..20_000 {
            let current = letter_name(i);
            let next = letter_name(i + 1);
            assert!(
                (current.len(), &current) < (next.len(), &next),
                "{} ({}) should sort before {} ({})",
                current,
                i,
                next,
                i + 1
            );
        }
    }

    #[test]
    fn letter_names_are_unique() {
        let names: HashSet<_> = (0..50_000).map(letter_name).collect();
        assert_eq!(names.len(), 50_000);
    }

    #[rstest]
    #[case(3, 3, 1)]
    #[case(4, 3, 2)]
    #[case(6, 3, 2)]
    #[case(7, 3, 3)]
    #[case(0, 3, 1)]
    #[case(5, 0, 1)]
    fn repetitions_round_up(
        #[case] min_length: usize,
        #[case] components: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(repetitions(min_length, components), expected);
    }

    #[test]
    fn pad_repeats_whole_name() {
        assert_eq!(pad("A", 3, 3), "A");
        assert_eq!(pad("AB", 6, 3), "ABAB");
        assert_eq!(pad("Z", 9, 3), "ZZZ");
    }

    #[test]
    fn padded_names_stay_unique() {
        let names: HashSet<_> = (0..5_000).map(|i| pad(&letter_name(i), 12, 3)).collect();
        assert_eq!(names.len(), 5_000);
    }
}
