//! The 14 provinces and their districts, as the directory knows them.

pub const PROVINCES: &[(&str, &[&str])] = &[
    (
        "Toshkent",
        &[
            "Bektemir", "Mirobod", "Mirzo Ulug‘bek", "Olmazor", "Sirg‘ali", "Uchtepa",
            "Chilonzor", "Shayxontohur", "Yunusobod", "Yakkasaroy",
        ],
    ),
    (
        "Toshkent viloyati",
        &[
            "Bekobod", "Bo‘ka", "Bo‘stonliq", "Chinoz", "Oqqo‘rg‘on", "Ohangaron", "Parkent",
            "Piskent", "Quyichirchiq", "Yuqorichirchiq",
        ],
    ),
    (
        "Andijon",
        &[
            "Andijon shahri", "Asaka", "Baliqchi", "Bo‘z", "Buloqboshi", "Jalaquduq",
            "Izboskan", "Marhamat", "Oltinko‘l", "Paxtaobod", "Xo‘jaobod",
        ],
    ),
    (
        "Farg‘ona",
        &[
            "Farg‘ona shahri", "Bag‘dod", "Beshariq", "Buvayda", "Dang‘ara", "Furqat",
            "Qo‘qon", "Quva", "Quvasoy", "Oltiariq", "Rishton",
        ],
    ),
    (
        "Namangan",
        &[
            "Namangan shahri", "Chortoq", "Chust", "Kosonsoy", "Mingbuloq", "Norin", "Pop",
            "To‘raqo‘rg‘on", "Uychi", "Yangiqo‘rg‘on",
        ],
    ),
    (
        "Buxoro",
        &[
            "Buxoro shahri", "G‘ijduvon", "Jondor", "Kogon", "Olot", "Peshku", "Qorako‘l",
            "Qorovulbozor", "Romitan", "Shofirkon", "Vobkent",
        ],
    ),
    (
        "Samarqand",
        &[
            "Samarqand shahri", "Bulung‘ur", "Ishtixon", "Jomboy", "Kattaqo‘rg‘on", "Narpay",
            "Nurobod", "Oqdaryo", "Paxtachi", "Payariq", "Toyloq", "Urgut",
        ],
    ),
    (
        "Qashqadaryo",
        &[
            "Qarshi", "Chiroqchi", "Dehqonobod", "G‘uzor", "Kasbi", "Kitob", "Koson",
            "Mirishkor", "Muborak", "Nishon", "Shahrisabz", "Yakkabog‘",
        ],
    ),
    (
        "Surxondaryo",
        &[
            "Termiz", "Angor", "Bandixon", "Boysun", "Denov", "Jarqo‘rg‘on", "Muzrabot",
            "Oltinsoy", "Sariosiyo", "Sherobod", "Sho‘rchi", "Uzun",
        ],
    ),
    (
        "Xorazm",
        &[
            "Urganch", "Bog‘ot", "Gurlan", "Qo‘shko‘pir", "Shovot", "Xiva", "Yangiariq",
            "Yangibozor",
        ],
    ),
    (
        "Navoiy",
        &[
            "Navoiy shahri", "Karmana", "Konimex", "Navbahor", "Nurota", "Qiziltepa", "Tomdi",
            "Uchquduq",
        ],
    ),
    (
        "Jizzax",
        &[
            "Jizzax shahri", "Arnasoy", "Baxmal", "Do‘stlik", "Forish", "G‘allaorol",
            "Mirzacho‘l", "Paxtakor", "Yangiobod", "Zomin", "Zafarobod", "Zarbdor",
        ],
    ),
    (
        "Sirdaryo",
        &[
            "Guliston", "Baxt", "Boyovut", "Hovos", "Mirzaobod", "Oqoltin", "Sardoba",
            "Sayxunobod", "Sirdaryo", "Yangiyer",
        ],
    ),
    (
        "Qoraqalpog‘iston",
        &[
            "Nukus", "Amudaryo", "Beruniy", "Chimboy", "Ellikqal‘a", "Kegeyli", "Mo‘ynoq",
            "Qonliko‘l", "Qorao‘zak", "Shumanay", "Taxtako‘pir", "To‘rtko‘l", "Xo‘jayli",
        ],
    ),
];

/// Province names in table order, for the first keyboard.
pub fn province_names() -> Vec<&'static str> {
    PROVINCES.iter().map(|(name, _)| *name).collect()
}

/// Districts of one province, or `None` for an unknown name.
pub fn districts_of(province: &str) -> Option<&'static [&'static str]> {
    PROVINCES
        .iter()
        .find(|(name, _)| *name == province)
        .map(|(_, districts)| *districts)
}
