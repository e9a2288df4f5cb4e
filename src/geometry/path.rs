/// Extract every number from an SVG path description
///
/// Commands and separators are skipped; a `-` always starts a new number and
/// so does a second `.`, matching how SVG packs coordinates (`M10-5.5.5`
/// reads as 10, -5.5, 0.5). Exponents are not supported.
pub fn path_numbers(d: &str) -> Vec<f64> {
    let mut numbers = Vec::new();
    let mut token = String::new();

    for c in d.chars() {
        match c {
            '0'..='9' => token.push(c),
            '.' if !token.contains('.') => token.push(c),
            '.' | '-' => {
                flush(&mut token, &mut numbers);
                token.push(c);
            }
            _ => flush(&mut token, &mut numbers),
        }
    }
    flush(&mut token, &mut numbers);

    numbers
}

fn flush(token: &mut String, numbers: &mut Vec<f64>) {
    if let Ok(value) = token.parse::<f64>() {
        numbers.push(value);
    }
    token.clear();
}

/// Pair consecutive path numbers into (x, y) coordinates
///
/// Exact for paths built from move/line/curve commands, which is what the
/// polygon generator emits. A trailing unpaired number is dropped.
pub fn path_coordinates(d: &str) -> Vec<(f64, f64)> {
    path_numbers(d)
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}
