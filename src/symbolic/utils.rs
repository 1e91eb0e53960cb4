// the collection of utility functions mainly for bracket parsing and sampling

/// Byte position of the first occurrence of `c` at bracket depth zero, if
/// any. Byte offsets keep the result usable for slicing when the input
/// contains multi-byte characters.
pub fn find_char_positions_outside_brackets(s: &str, c: char) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in s.char_indices() {
        if ch == '(' {
            depth += 1;
        } else if ch == ')' {
            depth = depth.saturating_sub(1);
        } else if ch == c && depth == 0 {
            return Some(i);
        }
    }
    None
}

/// Byte position of the rightmost occurrence of any of `operators` at
/// bracket depth zero. Splitting at the last operator keeps left
/// associativity for same-precedence chains like "x - 1 - 2".
pub fn find_rightmost_operator_outside_brackets(
    input: &str,
    operators: &[char],
) -> Option<(usize, char)> {
    let mut depth = 0usize;
    let mut last: Option<(usize, char)> = None;

    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 && operators.contains(&c) => {
                last = Some((i, c));
            }
            _ => {}
        }
    }
    last
}

/// Finds the closing bracket matching the opening bracket at byte offset
/// `bracket_start`. Returns a byte offset as well.
pub fn find_pair_to_this_bracket(input: &str, bracket_start: usize) -> Option<usize> {
    let mut stack = 0usize;
    for (i, c) in input[bracket_start..].char_indices() {
        if c == '(' {
            stack += 1;
        } else if c == ')' {
            stack = stack.saturating_sub(1);
            if stack == 0 {
                return Some(bracket_start + i);
            }
        }
    }
    None
}

/// Linearly spaced values over [start, end], inclusive of both endpoints.
pub fn linspace(start: f64, end: f64, num_values: usize) -> Vec<f64> {
    let mut values = Vec::with_capacity(num_values);
    let step = (end - start) / (num_values as f64 - 1.0);
    for i in 0..num_values {
        values.push(start + i as f64 * step);
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_outside_brackets() {
        assert_eq!(find_char_positions_outside_brackets("(a+b)+c", '+'), Some(5));
        assert_eq!(find_char_positions_outside_brackets("(a+b)", '+'), None);
    }

    #[test]
    fn test_rightmost_operator() {
        let (pos, op) = find_rightmost_operator_outside_brackets("x-1-2", &['+', '-']).unwrap();
        assert_eq!((pos, op), (3, '-'));
    }

    #[test]
    fn test_positions_are_byte_offsets() {
        // 'π' is two bytes; the returned position must slice cleanly
        let input = "π+1";
        let pos = find_char_positions_outside_brackets(input, '+').unwrap();
        assert_eq!(&input[..pos], "π");
        assert_eq!(&input[pos + 1..], "1");
        let (pos, op) = find_rightmost_operator_outside_brackets("π*2", &['*', '/']).unwrap();
        assert_eq!((&"π*2"[..pos], op), ("π", '*'));
    }

    #[test]
    fn test_pair_bracket() {
        assert_eq!(find_pair_to_this_bracket("sin(x+(y))", 3), Some(9));
        assert_eq!(find_pair_to_this_bracket("(x", 0), None);
    }

    #[test]
    fn test_linspace() {
        let xs = linspace(-5.0, 5.0, 11);
        assert_eq!(xs.len(), 11);
        assert_relative_eq!(xs[0], -5.0);
        assert_relative_eq!(xs[10], 5.0);
        assert_relative_eq!(xs[5], 0.0);
    }
}
