//! Main menu catalog.
//!
//! The table below is the whole menu: button order, row grouping and callback
//! identifiers. It is the same for every user and every render.

/// Account features reachable from the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feature {
    SwitchAccount,
    MyPackages,
    HotPackages,
    HotPackages2,
    OptionCode,
    FamilyCode,
    FamilyCodeLoop,
    TransactionHistory,
    FamilyPlan,
    Circle,
    Segments,
    FamilyList,
    StorePackages,
    Redeem,
    Register,
    Notifications,
    ValidateMsisdn,
    Bookmarks,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Feature(Feature),
    Refresh,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuAction {
    /// Callback data sent back by Telegram when the button is pressed.
    pub id: &'static str,
    pub label: &'static str,
    pub target: Target,
}

pub type MenuRow = &'static [MenuAction];

pub const REFRESH_ID: &str = "refresh_menu";

const fn feature(id: &'static str, label: &'static str, kind: Feature) -> MenuAction {
    MenuAction {
        id,
        label,
        target: Target::Feature(kind),
    }
}

pub const MAIN_MENU: &[MenuRow] = &[
    &[feature("menu_1", "1. Login/Ganti Akun", Feature::SwitchAccount)],
    &[feature("menu_2", "2. Lihat Paket Saya", Feature::MyPackages)],
    &[feature("menu_3", "3. Beli Paket 🔥 HOT 🔥", Feature::HotPackages)],
    &[feature("menu_4", "4. Beli Paket 🔥 HOT-2 🔥", Feature::HotPackages2)],
    &[
        feature("menu_5", "5. Option Code", Feature::OptionCode),
        feature("menu_6", "6. Family Code", Feature::FamilyCode),
    ],
    &[feature("menu_7", "7. Loop Family Code", Feature::FamilyCodeLoop)],
    &[feature("menu_8", "8. Riwayat Transaksi", Feature::TransactionHistory)],
    &[feature("menu_9", "9. Family Plan/Akrab", Feature::FamilyPlan)],
    &[feature("menu_10", "10. Circle", Feature::Circle)],
    &[
        feature("menu_11", "11. Segments", Feature::Segments),
        feature("menu_12", "12. Fam List", Feature::FamilyList),
    ],
    &[
        feature("menu_13", "13. Store Pkg", Feature::StorePackages),
        feature("menu_14", "14. Redeem", Feature::Redeem),
    ],
    &[
        feature("menu_R", "R. Register", Feature::Register),
        feature("menu_N", "N. Notifikasi", Feature::Notifications),
    ],
    &[feature("menu_V", "V. Validate MSISDN", Feature::ValidateMsisdn)],
    &[feature("menu_00", "00. Bookmark", Feature::Bookmarks)],
    &[MenuAction {
        id: REFRESH_ID,
        label: "🔄 Refresh Data",
        target: Target::Refresh,
    }],
];

/// Finds the catalog entry for a callback identifier.
pub fn lookup(id: &str) -> Option<&'static MenuAction> {
    MAIN_MENU.iter().flat_map(|row| row.iter()).find(|a| a.id == id)
}

impl Feature {
    /// Button label of the feature, as shown in the catalog.
    pub fn label(self) -> &'static str {
        MAIN_MENU
            .iter()
            .flat_map(|row| row.iter())
            .find(|a| a.target == Target::Feature(self))
            .map(|a| a.label)
            .unwrap_or("?")
    }
}
