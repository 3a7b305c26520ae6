//! Reply keyboard builders for the onboarding conversation.

use serde::Serialize;

/// Telegram `ReplyKeyboardMarkup`. Always resized and persistent — the
/// keyboard IS the conversation UI.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub resize_keyboard: bool,
    pub is_persistent: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeyboardButton {
    pub text: String,
}

/// Lay options out in rows of `row_size`, optionally appending a dedicated
/// back-button row.
pub fn reply_keyboard<S: AsRef<str>>(
    options: &[S],
    back_button: Option<&str>,
    row_size: usize,
) -> ReplyKeyboardMarkup {
    let row_size = row_size.max(1);
    let mut keyboard: Vec<Vec<KeyboardButton>> = options
        .chunks(row_size)
        .map(|row| {
            row.iter()
                .map(|text| KeyboardButton {
                    text: text.as_ref().to_string(),
                })
                .collect()
        })
        .collect();
    if let Some(back) = back_button {
        keyboard.push(vec![KeyboardButton { text: back.into() }]);
    }
    ReplyKeyboardMarkup {
        keyboard,
        resize_keyboard: true,
        is_persistent: true,
    }
}
