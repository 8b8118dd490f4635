//! Properties of the dispatch router
//!
//! The router is a pure function, so these tests run without any network
//! or mock server: feed updates in, assert on the directives out.

use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use teloxide::types::{ChatId, MessageId, UserId};
use trustbot::content::{ContentTable, MenuKey};
use trustbot::dispatch::{dispatch, ResponseDirective, Update};

const CHAT: ChatId = ChatId(123456789);
const MESSAGE: MessageId = MessageId(42);

fn callback(data: &str, has_photo: bool) -> Update {
    Update::CallbackQuery {
        data: data.to_string(),
        chat_id: CHAT,
        message_id: MESSAGE,
        has_photo,
    }
}

fn start() -> Update {
    Update::Command {
        name: "start".to_string(),
        chat_id: CHAT,
        user_id: Some(UserId(123456789)),
    }
}

fn table(tag: &'static str) -> ContentTable {
    ContentTable::new(tag, None)
}

#[test]
fn every_known_key_produces_body_and_keyboard() {
    for tag in ["en", "ar", "fr"] {
        let content = table(tag);
        for key in MenuKey::SECTIONS.iter().chain([MenuKey::Back].iter()) {
            let directive = dispatch(&callback(key.as_str(), false), &content);
            assert!(
                !directive.body().is_empty(),
                "{}/{}: empty body",
                tag,
                key.as_str()
            );
            assert!(
                !directive.keyboard().is_empty(),
                "{}/{}: empty keyboard",
                tag,
                key.as_str()
            );
        }
    }
}

#[test]
fn unknown_keys_map_to_deterministic_fallback() {
    let content = table("en");

    let first = dispatch(&callback("subscribe:premium", false), &content);
    let second = dispatch(&callback("subscribe:premium", false), &content);
    assert_eq!(first, second);

    // Any unknown key yields the same directive as any other.
    let other = dispatch(&callback("definitely-not-a-key", false), &content);
    assert_eq!(first, other);

    // The fallback keeps the user on the root menu.
    assert_eq!(first.keyboard(), &content.main_menu());
    match first {
        ResponseDirective::EditText { body, .. } => {
            assert_eq!(body, "Invalid option. Returning to main menu.");
        }
        other => panic!("expected EditText, got {:?}", other),
    }
}

#[test]
fn photo_messages_are_never_edited() {
    let content = table("fr");

    let mut keys: Vec<String> = MenuKey::SECTIONS.iter().map(|k| k.as_str().to_string()).collect();
    keys.push("back".to_string());
    keys.push("unknown-key".to_string());

    for key in keys {
        let directive = dispatch(&callback(&key, true), &content);
        assert!(
            !matches!(directive, ResponseDirective::EditText { .. }),
            "{}: attempted to edit a photo message",
            key
        );
    }
}

#[test]
fn start_prefers_photo_when_asset_is_readable() {
    let mut logo = tempfile::NamedTempFile::new().unwrap();
    logo.write_all(b"\x89PNG fake").unwrap();

    let content = ContentTable::new("en", Some(logo.path().to_path_buf()));
    let directive = dispatch(&start(), &content);

    match directive {
        ResponseDirective::SendPhoto { photo, caption, keyboard, .. } => {
            assert_eq!(photo, logo.path().to_path_buf());
            assert_eq!(caption, content.welcome());
            assert_eq!(keyboard, content.main_menu());
        }
        other => panic!("expected SendPhoto, got {:?}", other),
    }
}

#[test]
fn start_degrades_to_text_when_asset_is_missing() {
    let content = ContentTable::new("en", Some(PathBuf::from("/nonexistent/logo.png")));
    let directive = dispatch(&start(), &content);

    match directive {
        ResponseDirective::SendText { body, keyboard, .. } => {
            // Same body and keyboard as the photo rendition.
            assert_eq!(body, content.welcome());
            assert_eq!(keyboard, content.main_menu());
        }
        other => panic!("expected SendText, got {:?}", other),
    }
}

#[test]
fn start_renders_ten_unique_section_buttons() {
    let expected: HashSet<&str> = [
        "overview",
        "points",
        "missions",
        "referral",
        "roadmap",
        "download",
        "security",
        "faq",
        "social",
        "language_groups",
    ]
    .into_iter()
    .collect();

    for tag in ["en", "ar", "fr"] {
        let directive = dispatch(&start(), &table(tag));
        let keys: Vec<&str> = directive.keyboard().callback_keys();

        assert_eq!(keys.len(), 10, "{}: ten section buttons expected", tag);
        let unique: HashSet<&str> = keys.iter().copied().collect();
        assert_eq!(unique, expected, "{}: key set mismatch", tag);
    }
}

#[test]
fn link_sections_answer_with_url_keyboards() {
    let content = table("en");

    for key in [MenuKey::Download, MenuKey::Social, MenuKey::LanguageGroups] {
        let directive = dispatch(&callback(key.as_str(), false), &content);
        // Only "back" fires a callback; everything else opens a URL.
        assert_eq!(directive.keyboard().callback_keys(), vec!["back"], "{}", key.as_str());
    }
}
