//! URL slug generation for public content.

/// Generate a URL slug from a title.
///
/// Lowercases, folds Latin diacritics to plain ASCII, collapses every run of
/// non-alphanumeric characters into a single hyphen, and trims leading and
/// trailing hyphens. Characters with no ASCII fold are dropped.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true;

    for ch in title.chars() {
        for folded in fold_char(ch) {
            if folded.is_ascii_alphanumeric() {
                slug.push(folded.to_ascii_lowercase());
                last_was_hyphen = false;
            } else if folded.is_whitespace() || folded.is_ascii_punctuation() {
                if !last_was_hyphen {
                    slug.push('-');
                    last_was_hyphen = true;
                }
            }
            // Anything else (unmapped non-ASCII) is dropped
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Fold a single character to its ASCII equivalent(s).
fn fold_char(ch: char) -> std::vec::IntoIter<char> {
    let folded: Vec<char> = match ch {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => vec!['a'],
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => vec!['A'],
        'é' | 'è' | 'ê' | 'ë' => vec!['e'],
        'É' | 'È' | 'Ê' | 'Ë' => vec!['E'],
        'í' | 'ì' | 'î' | 'ï' => vec!['i'],
        'Í' | 'Ì' | 'Î' | 'Ï' => vec!['I'],
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => vec!['o'],
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => vec!['O'],
        'ú' | 'ù' | 'û' | 'ü' => vec!['u'],
        'Ú' | 'Ù' | 'Û' | 'Ü' => vec!['U'],
        'ñ' => vec!['n'],
        'Ñ' => vec!['N'],
        'ç' => vec!['c'],
        'Ç' => vec!['C'],
        'ß' => vec!['s', 's'],
        'æ' => vec!['a', 'e'],
        'Æ' => vec!['A', 'E'],
        'ø' => vec!['o'],
        'Ø' => vec!['O'],
        other => vec![other],
    };
    folded.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_title() {
        assert_eq!(slugify("Test"), "test");
    }

    #[test]
    fn test_spaces_become_hyphens() {
        assert_eq!(slugify("New Office Opening"), "new-office-opening");
    }

    #[test]
    fn test_diacritics_are_folded() {
        assert_eq!(slugify("Título con Ñ"), "titulo-con-n");
        assert_eq!(slugify("Sucesión y herencias"), "sucesion-y-herencias");
    }

    #[test]
    fn test_punctuation_collapses() {
        assert_eq!(slugify("Hello, world!  (again)"), "hello-world-again");
    }

    #[test]
    fn test_leading_trailing_separators_trimmed() {
        assert_eq!(slugify("  ¿Qué hacemos?  "), "que-hacemos");
    }

    #[test]
    fn test_unmapped_characters_dropped() {
        assert_eq!(slugify("法律 firm"), "firm");
    }

    #[test]
    fn test_empty_title() {
        assert_eq!(slugify(""), "");
    }
}
