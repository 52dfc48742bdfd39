//! Localized status strings printed to the player's chat.
//!
//! Keys fall back to English for unknown keys or languages without a
//! translation.

use nael_core::language::ClientLanguage;

/// Display name of the plugin.
pub const PLUGIN_NAME: &str = "Big Nael Quotes";

/// Return a localized static string for `key` in the given `lang`.
pub fn t(key: &str, lang: ClientLanguage) -> &'static str {
    use ClientLanguage::*;
    match key {
        "enabled" => match lang {
            French => "activé",
            German => "aktiviert",
            Japanese => "有効",
            Chinese => "已启用",
            _ => "enabled",
        },
        "disabled" => match lang {
            French => "désactivé",
            German => "deaktiviert",
            Japanese => "無効",
            Chinese => "已禁用",
            _ => "disabled",
        },
        "settings_saved" => match lang {
            French => "Paramètres enregistrés",
            German => "Einstellungen gespeichert",
            Japanese => "設定を保存しました",
            Chinese => "设置已保存",
            _ => "Settings saved",
        },
        "test_header" => match lang {
            French => "Test de toutes les citations",
            German => "Alle Zitate testen",
            Japanese => "全セリフをテスト",
            Chinese => "测试所有台词",
            _ => "Testing all quotes",
        },
        "unknown_command" => match lang {
            French => "Commande inconnue",
            German => "Unbekannter Befehl",
            Japanese => "不明なコマンド",
            Chinese => "未知命令",
            _ => "Unknown command",
        },
        _ => "",
    }
}

/// `"Big Nael Quotes enabled"` / `"... disabled"`.
pub fn format_status(enabled: bool, lang: ClientLanguage) -> String {
    let state = if enabled { "enabled" } else { "disabled" };
    format!("{PLUGIN_NAME} {}", t(state, lang))
}
