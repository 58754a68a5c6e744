use dvrescue_core::ui_bridge::ResourceBundle;

const MAIN_UI: &str = include_str!("../resources/main.ui.json");

/// Descriptions reachable through `qrc:` URLs.
pub fn bundle() -> ResourceBundle {
    let mut bundle = ResourceBundle::new();
    bundle.insert("main.ui.json", MAIN_UI);
    bundle
}
