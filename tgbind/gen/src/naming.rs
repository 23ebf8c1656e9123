//! Case conversion for schema identifiers.
//!
//! Schema field names are snake_case (`chat_id`), method names are lowerCamel
//! (`sendPhoto`), and type names are UpperCamel (`InlineKeyboardMarkup`).
//! Bindings need each of these in the other conventions.

/// Splits a CamelCase string into individual words.
///
/// Handles various CamelCase patterns:
/// - "sendPhoto" -> ["send", "Photo"]
/// - "InlineKeyboardMarkup" -> ["Inline", "Keyboard", "Markup"]
/// - "HTTPClient" -> ["HTTP", "Client"]
/// - "getMe" -> ["get", "Me"]
pub fn split_camel_case(s: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut word_start = 0;
    let chars: Vec<(usize, char)> = s.char_indices().collect();

    for i in 1..chars.len() {
        let (byte_idx, current) = chars[i];
        let prev = chars[i - 1].1;

        // Split before uppercase that follows lowercase or a digit:
        // "sendPhoto" -> "send", "Photo"
        // Split before uppercase followed by lowercase when preceded by uppercase:
        // "HTTPClient" -> "HTTP", "Client"
        let is_new_word = current.is_uppercase()
            && (prev.is_lowercase()
                || prev.is_ascii_digit()
                || (i + 1 < chars.len() && chars[i + 1].1.is_lowercase() && prev.is_uppercase()));

        if is_new_word {
            if byte_idx > word_start {
                words.push(&s[word_start..byte_idx]);
            }
            word_start = byte_idx;
        }
    }

    if word_start < s.len() {
        words.push(&s[word_start..]);
    }

    words
}

/// Converts a camel-cased identifier to snake_case.
///
/// ## Examples
///
/// ```
/// use tgbind_gen::naming::snake_case;
///
/// assert_eq!(snake_case("sendPhoto"), "send_photo");
/// assert_eq!(snake_case("InlineKeyboardMarkup"), "inline_keyboard_markup");
/// assert_eq!(snake_case("chat_id"), "chat_id");
/// ```
pub fn snake_case(s: &str) -> String {
    s.split('_')
        .filter(|part| !part.is_empty())
        .flat_map(split_camel_case)
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Converts a snake_case or lowerCamel identifier to UpperCamel.
///
/// Each underscore-separated part gets its first character uppercased; the
/// rest of the part is kept as-is, so `sendPhoto` becomes `SendPhoto`.
///
/// ## Examples
///
/// ```
/// use tgbind_gen::naming::upper_camel;
///
/// assert_eq!(upper_camel("chat_id"), "ChatId");
/// assert_eq!(upper_camel("sendPhoto"), "SendPhoto");
/// ```
pub fn upper_camel(s: &str) -> String {
    s.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Converts a snake_case identifier to lowerCamel.
///
/// ## Examples
///
/// ```
/// use tgbind_gen::naming::lower_camel;
///
/// assert_eq!(lower_camel("chat_id"), "chatId");
/// assert_eq!(lower_camel("photo"), "photo");
/// ```
pub fn lower_camel(s: &str) -> String {
    let upper = upper_camel(s);
    let mut chars = upper.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
