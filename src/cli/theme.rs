use super::ui::{self, StyleType};
use crate::core::theme::Theme;
use crate::store::{PreferenceStore, load_theme, save_theme, toggle_theme};
use anyhow::Result;

/// Shows, sets or toggles the stored theme. `action` is `toggle`, a theme
/// name, or `None` to show the current one.
pub fn run(store: &dyn PreferenceStore, action: Option<&str>) -> Result<()> {
    let theme = match action.map(str::trim) {
        None | Some("") => {
            println!("Current theme: {}", load_theme(store));
            return Ok(());
        }
        Some(a) if a.eq_ignore_ascii_case("toggle") => toggle_theme(store)?,
        Some(name) => match name.parse::<Theme>() {
            Ok(theme) => {
                save_theme(store, theme)?;
                theme
            }
            Err(e) => {
                ui::print_error(&e);
                return Ok(());
            }
        },
    };
    println!(
        "{}",
        ui::style_text(&format!("Theme set to {theme}"), StyleType::Success)
    );
    Ok(())
}
