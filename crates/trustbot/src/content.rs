//! Localized menu content
//!
//! The content table is an immutable view over the fluent locale bundle
//! for one language: every dispatch key maps to a message body and a
//! keyboard layout. The router treats it as opaque render data: adding
//! a menu section means adding a `MenuKey` variant and its locale
//! entries, not extending a conditional chain.

use std::path::{Path, PathBuf};

use unic_langid::LanguageIdentifier;

use crate::dispatch::{Button, Keyboard};
use crate::i18n;

/// App store and community URLs shared by every language instance.
mod links {
    pub const IOS_APP: &str = "https://apps.apple.com/app/trustcoin";
    pub const ANDROID_APP: &str = "https://play.google.com/store/apps/details?id=com.trustcoin";
    pub const WEBSITE: &str = "https://www.trust-coin.site";
    pub const FACEBOOK: &str = "https://www.facebook.com/people/TrustCoin/61579302546502/";
    pub const TELEGRAM_GROUP: &str = "https://t.me/+djORe9HGRi45ZDdk";
    pub const TIKTOK: &str = "https://www.tiktok.com/@trusrcoin";
    pub const TWITTER: &str = "https://x.com/TBNTrustCoin";
    pub const GROUP_EN: &str = "https://t.me/tructcoin_bot";
    pub const GROUP_AR: &str = "https://t.me/trustcoin_arabic_bot";
    pub const GROUP_FR: &str = "https://t.me/trustcoin_fr_bot";
}

/// The fixed set of dispatch keys carried by menu buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Overview,
    Points,
    Missions,
    Referral,
    Roadmap,
    Download,
    Security,
    Faq,
    Social,
    LanguageGroups,
    Back,
}

impl MenuKey {
    /// The ten sections of the root menu, in display order.
    pub const SECTIONS: [MenuKey; 10] = [
        MenuKey::Overview,
        MenuKey::Points,
        MenuKey::Missions,
        MenuKey::Referral,
        MenuKey::Roadmap,
        MenuKey::Download,
        MenuKey::Security,
        MenuKey::Faq,
        MenuKey::Social,
        MenuKey::LanguageGroups,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MenuKey::Overview => "overview",
            MenuKey::Points => "points",
            MenuKey::Missions => "missions",
            MenuKey::Referral => "referral",
            MenuKey::Roadmap => "roadmap",
            MenuKey::Download => "download",
            MenuKey::Security => "security",
            MenuKey::Faq => "faq",
            MenuKey::Social => "social",
            MenuKey::LanguageGroups => "language_groups",
            MenuKey::Back => "back",
        }
    }

    /// Resolves callback data to a dispatch key. Unknown data returns
    /// `None` and is handled by the router's invalid-option fallback.
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "overview" => Some(MenuKey::Overview),
            "points" => Some(MenuKey::Points),
            "missions" => Some(MenuKey::Missions),
            "referral" => Some(MenuKey::Referral),
            "roadmap" => Some(MenuKey::Roadmap),
            "download" => Some(MenuKey::Download),
            "security" => Some(MenuKey::Security),
            "faq" => Some(MenuKey::Faq),
            "social" => Some(MenuKey::Social),
            "language_groups" => Some(MenuKey::LanguageGroups),
            "back" => Some(MenuKey::Back),
            _ => None,
        }
    }
}

/// Immutable localized content for one bot instance.
pub struct ContentTable {
    lang: LanguageIdentifier,
    tag: &'static str,
    logo: Option<PathBuf>,
}

impl ContentTable {
    pub fn new(tag: &'static str, logo: Option<PathBuf>) -> Self {
        Self {
            lang: i18n::lang_from_code(tag),
            tag,
            logo,
        }
    }

    pub fn lang_tag(&self) -> &'static str {
        self.tag
    }

    pub fn logo(&self) -> Option<&Path> {
        self.logo.as_deref()
    }

    fn text(&self, key: &str) -> String {
        i18n::t(&self.lang, key)
    }

    /// The `/start` welcome text.
    pub fn welcome(&self) -> String {
        self.text("welcome")
    }

    /// The root menu: one button per section, one section per row.
    pub fn main_menu(&self) -> Keyboard {
        let rows = MenuKey::SECTIONS
            .iter()
            .map(|key| {
                vec![Button::callback(
                    self.text(&format!("menu.{}", key.as_str())),
                    key.as_str(),
                )]
            })
            .collect();
        Keyboard::new(rows)
    }

    /// Body and keyboard for a dispatch key.
    pub fn render(&self, key: MenuKey) -> (String, Keyboard) {
        match key {
            MenuKey::Back => (self.text("menu.title"), self.main_menu()),
            MenuKey::Download => (self.text("section.download"), self.download_keyboard()),
            MenuKey::Social => (self.text("social.prompt"), self.social_keyboard()),
            MenuKey::LanguageGroups => (self.text("groups.prompt"), self.groups_keyboard()),
            section => (self.text(&format!("section.{}", section.as_str())), self.main_menu()),
        }
    }

    /// The deterministic fallback for unknown callback data.
    pub fn invalid_option(&self) -> (String, Keyboard) {
        (self.text("menu.invalid"), self.main_menu())
    }

    fn back_button(&self) -> Button {
        Button::callback(self.text("menu.back"), MenuKey::Back.as_str())
    }

    fn download_keyboard(&self) -> Keyboard {
        Keyboard::new(vec![
            vec![Button::url(self.text("download.ios"), links::IOS_APP)],
            vec![Button::url(self.text("download.android"), links::ANDROID_APP)],
            vec![Button::url(self.text("download.website"), links::WEBSITE)],
            vec![self.back_button()],
        ])
    }

    fn social_keyboard(&self) -> Keyboard {
        Keyboard::new(vec![
            vec![Button::url(self.text("social.website"), links::WEBSITE)],
            vec![Button::url(self.text("social.facebook"), links::FACEBOOK)],
            vec![Button::url(self.text("social.telegram"), links::TELEGRAM_GROUP)],
            vec![Button::url(self.text("social.tiktok"), links::TIKTOK)],
            vec![Button::url(self.text("social.twitter"), links::TWITTER)],
            vec![self.back_button()],
        ])
    }

    fn groups_keyboard(&self) -> Keyboard {
        Keyboard::new(vec![
            vec![Button::url(self.text("groups.english"), links::GROUP_EN)],
            vec![Button::url(self.text("groups.arabic"), links::GROUP_AR)],
            vec![Button::url(self.text("groups.french"), links::GROUP_FR)],
            vec![self.back_button()],
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn table(tag: &'static str) -> ContentTable {
        ContentTable::new(tag, None)
    }

    #[test]
    fn parse_round_trips_every_key() {
        for key in MenuKey::SECTIONS.iter().chain([MenuKey::Back].iter()) {
            assert_eq!(MenuKey::parse(key.as_str()), Some(*key));
        }
        assert_eq!(MenuKey::parse("subscribe"), None);
        assert_eq!(MenuKey::parse(""), None);
    }

    #[test]
    fn main_menu_has_ten_unique_callback_keys() {
        for tag in ["en", "ar", "fr"] {
            let menu = table(tag).main_menu();

            let keys = menu.callback_keys();
            assert_eq!(keys.len(), 10, "{}: ten section buttons expected", tag);

            let unique: HashSet<_> = keys.iter().collect();
            assert_eq!(unique.len(), keys.len(), "{}: duplicate callback key", tag);
        }
    }

    #[test]
    fn every_key_renders_non_empty_body_in_every_language() {
        for tag in ["en", "ar", "fr"] {
            let content = table(tag);
            for key in MenuKey::SECTIONS.iter().chain([MenuKey::Back].iter()) {
                let (body, keyboard) = content.render(*key);
                assert!(!body.is_empty(), "{}/{}: empty body", tag, key.as_str());
                assert!(!body.contains("\\n"), "{}/{}: unconverted newline", tag, key.as_str());
                assert!(!keyboard.is_empty(), "{}/{}: empty keyboard", tag, key.as_str());
            }
        }
    }

    #[test]
    fn link_sections_keep_a_way_back() {
        let content = table("en");
        for key in [MenuKey::Download, MenuKey::Social, MenuKey::LanguageGroups] {
            let (_, keyboard) = content.render(key);
            assert_eq!(keyboard.callback_keys(), vec!["back"], "{}", key.as_str());
        }
    }

    #[test]
    fn invalid_option_carries_root_keyboard() {
        let content = table("fr");
        let (body, keyboard) = content.invalid_option();
        assert!(!body.is_empty());
        assert_eq!(keyboard, content.main_menu());
    }
}
