//! # Azonbot Onboarding
//! The guided location-selection conversation: province → district → mosque,
//! driven over Telegram reply keyboards, plus the small main menu.
//!
//! One long-poll loop owns all conversation state (a per-chat `Step` map) —
//! no locks, no persistence. Validation is re-prompting only; anything the
//! directory rejects surfaces as a generic error text and the user tries
//! again.

pub mod flow;
pub mod regions;

use std::collections::HashMap;
use std::sync::Arc;

use azonbot_core::types::Registration;
use azonbot_directory::DirectoryClient;
use azonbot_telegram::keyboard::ReplyKeyboardMarkup;
use azonbot_telegram::{TelegramBot, reply_keyboard};

use crate::flow::Step;

const POLL_ERROR_BACKOFF_SECS: u64 = 5;

/// The onboarding conversation driver.
pub struct Onboarding {
    bot: Arc<TelegramBot>,
    directory: Arc<DirectoryClient>,
    sessions: HashMap<i64, Step>,
}

impl Onboarding {
    pub fn new(bot: Arc<TelegramBot>, directory: Arc<DirectoryClient>) -> Self {
        Self {
            bot,
            directory,
            sessions: HashMap::new(),
        }
    }

    /// Consume updates forever. Poll failures back off briefly and resume —
    /// nothing here is allowed to take the process down.
    pub async fn run(mut self, update_timeout_secs: u64) {
        tracing::info!("💬 Onboarding loop started");
        let mut offset = 0i64;

        loop {
            match self.bot.get_updates(offset, update_timeout_secs).await {
                Ok(updates) => {
                    for update in updates {
                        offset = offset.max(update.update_id + 1);
                        let Some(message) = update.message else { continue };
                        if message.from.as_ref().is_some_and(|u| u.is_bot) {
                            continue;
                        }
                        let Some(text) = message.text else { continue };
                        self.handle(message.chat.id, text.trim()).await;
                    }
                }
                Err(e) => {
                    tracing::warn!("⚠️ Update polling failed, backing off: {e}");
                    tokio::time::sleep(std::time::Duration::from_secs(POLL_ERROR_BACKOFF_SECS))
                        .await;
                }
            }
        }
    }

    async fn handle(&mut self, chat_id: i64, text: &str) {
        if flow::is_start(text) {
            self.handle_start(chat_id).await;
            return;
        }
        if flow::wants_location_change(text) {
            self.begin_flow(chat_id).await;
            return;
        }
        if flow::wants_mosque_info(text) {
            self.show_mosque_card(chat_id).await;
            return;
        }

        match self.sessions.get(&chat_id).cloned() {
            Some(Step::ChoosingProvince) => self.choose_province(chat_id, text).await,
            Some(Step::ChoosingDistrict { province }) => {
                self.choose_district(chat_id, &province, text).await;
            }
            Some(Step::ChoosingMosque { province, district }) => {
                self.choose_mosque(chat_id, &province, &district, text).await;
            }
            None => tracing::debug!("Ignoring message from {chat_id} outside any flow"),
        }
    }

    /// `/start`: returning subscribers get the menu, newcomers the flow.
    async fn handle_start(&mut self, chat_id: i64) {
        match self.directory.check_user(chat_id).await {
            Ok(true) => self.show_main_menu(chat_id).await,
            Ok(false) => self.begin_flow(chat_id).await,
            Err(e) => {
                tracing::warn!("⚠️ check-user failed for {chat_id}: {e}");
                self.reply(chat_id, flow::TEXT_ERROR).await;
            }
        }
    }

    async fn begin_flow(&mut self, chat_id: i64) {
        self.sessions.insert(chat_id, Step::ChoosingProvince);
        let markup = reply_keyboard(&regions::province_names(), None, 3);
        self.prompt(chat_id, flow::TEXT_CHOOSE_PROVINCE, &markup).await;
    }

    async fn choose_province(&mut self, chat_id: i64, text: &str) {
        let Some(districts) = regions::districts_of(text) else {
            self.reply(chat_id, flow::TEXT_INVALID_PROVINCE).await;
            return;
        };
        self.sessions.insert(
            chat_id,
            Step::ChoosingDistrict {
                province: text.to_string(),
            },
        );
        let markup = reply_keyboard(districts, Some(flow::BACK), 3);
        self.prompt(chat_id, flow::TEXT_CHOOSE_DISTRICT, &markup).await;
    }

    async fn choose_district(&mut self, chat_id: i64, province: &str, text: &str) {
        if flow::is_back(text) {
            self.begin_flow(chat_id).await;
            return;
        }
        let valid = regions::districts_of(province)
            .is_some_and(|districts| districts.contains(&text));
        if !valid {
            self.reply(chat_id, flow::TEXT_INVALID_DISTRICT).await;
            return;
        }

        let names: Vec<String> = match self.directory.mosques(province, text).await {
            Ok(mosques) if !mosques.is_empty() => {
                mosques.into_iter().map(|m| m.name).collect()
            }
            Ok(_) => vec![flow::TEXT_NO_MOSQUES.to_string()],
            Err(e) => {
                tracing::warn!("⚠️ Mosque list fetch failed for {province}/{text}: {e}");
                vec![flow::TEXT_NO_MOSQUES.to_string()]
            }
        };

        self.sessions.insert(
            chat_id,
            Step::ChoosingMosque {
                province: province.to_string(),
                district: text.to_string(),
            },
        );
        let markup = reply_keyboard(&names, Some(flow::BACK), 3);
        self.prompt(chat_id, flow::TEXT_CHOOSE_MOSQUE, &markup).await;
    }

    async fn choose_mosque(&mut self, chat_id: i64, province: &str, district: &str, text: &str) {
        if flow::is_back(text) {
            // Step back to the district prompt of the remembered province.
            if let Some(districts) = regions::districts_of(province) {
                self.sessions.insert(
                    chat_id,
                    Step::ChoosingDistrict {
                        province: province.to_string(),
                    },
                );
                let markup = reply_keyboard(districts, Some(flow::BACK), 3);
                self.prompt(chat_id, flow::TEXT_CHOOSE_DISTRICT, &markup).await;
            } else {
                self.begin_flow(chat_id).await;
            }
            return;
        }

        let registration = Registration {
            telegram_id: chat_id,
            province: province.to_string(),
            district: district.to_string(),
            masjid: text.to_string(),
        };
        match self.directory.register(&registration).await {
            Ok(()) => {
                self.sessions.remove(&chat_id);
                self.show_main_menu(chat_id).await;
            }
            Err(e) => {
                tracing::warn!("⚠️ Registration failed for {chat_id}: {e}");
                self.reply(chat_id, flow::TEXT_ERROR).await;
            }
        }
    }

    async fn show_main_menu(&self, chat_id: i64) {
        let markup = reply_keyboard(
            &[flow::MENU_CHANGE_LOCATION, flow::MENU_MOSQUE_INFO],
            None,
            3,
        );
        self.prompt(chat_id, flow::TEXT_MAIN_MENU, &markup).await;
    }

    async fn show_mosque_card(&self, chat_id: i64) {
        match self.directory.user_mosque(chat_id).await {
            Ok(info) => {
                let card = flow::mosque_card(&info);
                if let Err(e) = self.bot.send_card(chat_id, &card).await {
                    tracing::warn!("⚠️ Mosque card delivery to {chat_id} failed: {e}");
                }
            }
            Err(e) => {
                tracing::warn!("⚠️ Mosque lookup failed for {chat_id}: {e}");
                self.reply(chat_id, flow::TEXT_ERROR).await;
            }
        }
    }

    async fn reply(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.bot.send_message(chat_id, text).await {
            tracing::warn!("⚠️ Reply to {chat_id} failed: {e}");
        }
    }

    async fn prompt(&self, chat_id: i64, text: &str, markup: &ReplyKeyboardMarkup) {
        if let Err(e) = self.bot.send_with_keyboard(chat_id, text, markup).await {
            tracing::warn!("⚠️ Prompt to {chat_id} failed: {e}");
        }
    }
}
