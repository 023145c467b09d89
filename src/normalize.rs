use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fold a course name into a comparison key.
///
/// Decomposes to NFD and drops combining marks, lowercases, and collapses
/// whitespace, so `"Matemática  Inicial"` and `"matematica inicial"` compare
/// equal.
pub fn normalize_course_name(name: &str) -> String {
    let folded: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn same_course_name(a: &str, b: &str) -> bool {
    normalize_course_name(a) == normalize_course_name(b)
}
