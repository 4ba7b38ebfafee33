/// Splits a line on runs of whitespace and/or commas and returns every
/// token that parses as a finite float. Anything else is dropped.
pub fn tokenize_numeric_line(line: &str) -> Vec<f64> {
    line.split(|character: char| character.is_whitespace() || character == ',')
        .filter(|token| !token.is_empty())
        .filter_map(parse_numeric_token)
        .collect()
}

fn parse_numeric_token(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::tokenize_numeric_line;

    #[test]
    fn splits_on_whitespace_and_commas() {
        assert_eq!(
            tokenize_numeric_line("0, 5.5\t10 ,,  -2.5e1"),
            vec![0.0, 5.5, 10.0, -25.0]
        );
    }

    #[test]
    fn empty_and_separator_only_lines_yield_nothing() {
        assert!(tokenize_numeric_line("").is_empty());
        assert!(tokenize_numeric_line(" , ,\t ,").is_empty());
    }

    #[test]
    fn invalid_and_non_finite_tokens_are_skipped() {
        assert_eq!(
            tokenize_numeric_line("12 abc 7.5x 3 NaN inf -infinity 4"),
            vec![12.0, 3.0, 4.0]
        );
    }
}
