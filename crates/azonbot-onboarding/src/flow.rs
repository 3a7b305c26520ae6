//! Conversation state, the fixed Uzbek texts, and the mosque-card renderer.

use azonbot_core::types::MosqueInfo;

pub const BACK: &str = "🔙 Orqaga";
pub const MENU_CHANGE_LOCATION: &str = "🏠 Manzilni o‘zgartirish";
pub const MENU_MOSQUE_INFO: &str = "🏛 Masjid ma'lumotlari";
/// The menu button label has drifted between "ma'lumotlar" and
/// "ma'lumotlari" across clients, so matching is prefix-based.
pub const MENU_MOSQUE_INFO_PREFIX: &str = "🏛 Masjid ma'lumotlar";

pub const TEXT_MAIN_MENU: &str = "📋 Bosh menyu:";
pub const TEXT_CHOOSE_PROVINCE: &str = "🇺🇿 Iltimos, viloyatingizni tanlang:";
pub const TEXT_CHOOSE_DISTRICT: &str = "📍 Hududingizni tanlang:";
pub const TEXT_CHOOSE_MOSQUE: &str = "🏛 Masjidni tanlang:";
pub const TEXT_INVALID_PROVINCE: &str = "❌ Noto‘g‘ri viloyat tanlandi. Qayta urinib ko‘ring.";
pub const TEXT_INVALID_DISTRICT: &str = "❌ Noto‘g‘ri hudud tanlandi. Qayta urinib ko‘ring.";
pub const TEXT_NO_MOSQUES: &str = "❌ Ma'lumot topilmadi";
pub const TEXT_ERROR: &str = "⚠️ Xatolik yuz berdi. Qayta urinib ko‘ring.";

/// Where one chat currently is in the linear selection flow. Absence of a
/// step means the chat is at the main menu (or has never talked to us).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    ChoosingProvince,
    ChoosingDistrict { province: String },
    ChoosingMosque { province: String, district: String },
}

pub fn is_start(text: &str) -> bool {
    text == "/start"
}

pub fn is_back(text: &str) -> bool {
    text == BACK
}

pub fn wants_location_change(text: &str) -> bool {
    text == MENU_CHANGE_LOCATION
}

pub fn wants_mosque_info(text: &str) -> bool {
    text.starts_with(MENU_MOSQUE_INFO_PREFIX)
}

/// The Markdown mosque card shown from the main menu.
pub fn mosque_card(info: &MosqueInfo) -> String {
    let time = |t: &Option<String>| t.clone().unwrap_or_else(|| "-".into());
    format!(
        "📍 *{name}*  \n\
         🏙 *Hudud:* {province} viloyati, {district} tumani\n\
         📞 *Aloqa:* {contact}\n\
         📌 *Manzil:* [Xaritada ko‘rish]({location})\n\n\
         🕌 *Namoz vaqtlari:*\n  \
         - 🌅 *Bomdod:* {bomdod}\n  \
         - ☀ *Quyosh:* {quyosh}\n  \
         - 🕛 *Peshin:* {peshin}\n  \
         - 🌇 *Asr:* {asr}\n  \
         - 🌆 *Shom:* {shom}\n  \
         - 🌙 *Xufton:* {xufton}",
        name = info.name,
        province = info.province,
        district = info.district,
        contact = info.contact,
        location = info.location_url,
        bomdod = time(&info.times.bomdod),
        quyosh = time(&info.times.quyosh),
        peshin = time(&info.times.peshin),
        asr = time(&info.times.asr),
        shom = time(&info.times.shom),
        xufton = time(&info.times.xufton),
    )
}
