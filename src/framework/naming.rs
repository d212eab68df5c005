//! Resource naming conventions shared with the remote API.
//!
//! The API embeds a parent's child ids under the plural snake_case name of the
//! child resource (`question_sets`), and children point back at their parent
//! through `<parent>_id` (`person_id`).

/// Irregular singular/plural pairs the API uses.
const IRREGULAR: &[(&str, &str)] = &[("person", "people"), ("child", "children")];

/// Converts `questionSet` / `QuestionSet` / `question-set` to `question_set`.
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c == '-' || c == ' ' {
            out.push('_');
            prev_lower = false;
        } else if c.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }
    out
}

/// Plural form of a resource name, e.g. `question_set` -> `question_sets`.
///
/// Only the last `_`-separated word is inflected.
pub fn pluralize(name: &str) -> String {
    let snake = to_snake_case(name);
    let (head, word) = match snake.rfind('_') {
        Some(idx) => snake.split_at(idx + 1),
        None => ("", snake.as_str()),
    };
    format!("{head}{}", pluralize_word(word))
}

fn pluralize_word(word: &str) -> String {
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return (*plural).to_string();
    }
    if word.is_empty() {
        return String::new();
    }
    if let Some(stem) = word.strip_suffix('y') {
        let before = stem.chars().last();
        if !matches!(before, Some('a' | 'e' | 'i' | 'o' | 'u') | None) {
            return format!("{stem}ies");
        }
    }
    if ["s", "x", "z", "ch", "sh"].iter().any(|suffix| word.ends_with(suffix)) {
        return format!("{word}es");
    }
    format!("{word}s")
}

/// Name of the attribute on a child that references its parent.
pub fn foreign_key(parent_name: &str) -> String {
    format!("{}_id", to_snake_case(parent_name))
}
