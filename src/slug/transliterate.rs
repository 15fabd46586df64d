/// Map a Turkish letter to its closest ASCII Latin letter.
///
/// Case is preserved (`Ş` becomes `S`), so the result still needs
/// lowercasing. Characters outside the Turkish alphabet pass through.
pub fn transliterate_char(c: char) -> char {
    match c {
        'ı' => 'i',
        'ğ' => 'g',
        'ü' => 'u',
        'ş' => 's',
        'ö' => 'o',
        'ç' => 'c',
        'İ' => 'I',
        'Ğ' => 'G',
        'Ü' => 'U',
        'Ş' => 'S',
        'Ö' => 'O',
        'Ç' => 'C',
        other => other,
    }
}

/// Transliterate every Turkish letter in `text`
pub fn transliterate(text: &str) -> String {
    text.chars().map(transliterate_char).collect()
}
