//! Canned reply payloads. Everything except the text of `sendMessage` is fixed.

use super::ChatId;
use serde::Serialize;

pub const PHOTO_URL: &str =
    "https://i.pinimg.com/originals/c2/cf/70/c2cf70612bcdcafbd892b8aaca092221.jpg";
pub const PHOTO_CAPTION: &str = "This is a sample image";
pub const AUDIO_URL: &str = "http://www.largesound.com/ashborytour/sound/brobob.mp3";
pub const VIDEO_URL: &str = "https://www.appsloveworld.com/wp-content/uploads/2018/10/640.mp4";

pub const POLL_QUESTION: &str = "In which direction does the sun rise ?";
pub const POLL_OPTIONS: [&str; 4] = ["North", "South", "East", "West"];
pub const POLL_CORRECT_OPTION_ID: u32 = 2;

pub const BUTTON_PROMPT: &str = "What is this ?";
pub const BUTTON_LABELS: [&str; 2] = ["Rizki", "Juju"];

/// sendMessage body.
#[derive(Debug, Serialize)]
pub struct TextMessage<'a> {
    pub chat_id: ChatId,
    pub text: &'a str,
}

/// sendPoll body (quiz, non-anonymous).
#[derive(Debug, Serialize)]
pub struct Poll {
    pub chat_id: ChatId,
    pub question: &'static str,
    pub options: [&'static str; 4],
    pub is_anonymous: bool,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub correct_option_id: u32,
}

impl Poll {
    pub fn quiz(chat_id: ChatId) -> Self {
        Self {
            chat_id,
            question: POLL_QUESTION,
            options: POLL_OPTIONS,
            is_anonymous: false,
            kind: "quiz",
            correct_option_id: POLL_CORRECT_OPTION_ID,
        }
    }
}

/// sendMessage body with a one-row reply keyboard.
#[derive(Debug, Serialize)]
pub struct KeyboardMessage {
    pub chat_id: ChatId,
    pub text: &'static str,
    pub reply_markup: ReplyKeyboard,
}

#[derive(Debug, Serialize)]
pub struct ReplyKeyboard {
    pub keyboard: Vec<Vec<KeyboardButton>>,
}

#[derive(Debug, Serialize)]
pub struct KeyboardButton {
    pub text: &'static str,
}

impl KeyboardMessage {
    pub fn buttons(chat_id: ChatId) -> Self {
        let row = BUTTON_LABELS
            .iter()
            .map(|&text| KeyboardButton { text })
            .collect();
        Self {
            chat_id,
            text: BUTTON_PROMPT,
            reply_markup: ReplyKeyboard {
                keyboard: vec![row],
            },
        }
    }
}

/// Form fields for sendPhoto.
pub fn photo_form(chat_id: ChatId) -> Vec<(&'static str, String)> {
    vec![
        ("chat_id", chat_id.to_string()),
        ("photo", PHOTO_URL.to_string()),
        ("caption", PHOTO_CAPTION.to_string()),
    ]
}

/// Form fields for sendAudio.
pub fn audio_form(chat_id: ChatId) -> Vec<(&'static str, String)> {
    vec![
        ("chat_id", chat_id.to_string()),
        ("audio", AUDIO_URL.to_string()),
    ]
}

/// Form fields for sendVideo.
pub fn video_form(chat_id: ChatId) -> Vec<(&'static str, String)> {
    vec![
        ("chat_id", chat_id.to_string()),
        ("video", VIDEO_URL.to_string()),
    ]
}
