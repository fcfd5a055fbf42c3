use serde::{Deserialize, Serialize};

/// UI preferences kept between runs through eframe's storage.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct Settings {
    pub dark_mode: bool,
    /// Show the report in a monospace font so the rulers line up.
    pub monospace: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            monospace: true,
        }
    }
}

impl Settings {
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default()
    }

    pub fn store(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    pub fn visuals(&self) -> egui::Visuals {
        if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        }
    }

    pub fn report_text(&self, text: &str) -> egui::RichText {
        let text = egui::RichText::new(text);
        if self.monospace {
            text.monospace()
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "dark_mode": false }"#).unwrap();
        assert!(!settings.dark_mode);
        assert!(settings.monospace);
    }

    #[test]
    fn stale_fields_from_older_versions_are_ignored() {
        let settings: Settings =
            serde_json::from_str(r#"{ "monospace": false, "report_window_size": [1.0, 2.0] }"#)
                .unwrap();
        assert!(settings.dark_mode);
        assert!(!settings.monospace);
    }

    #[test]
    fn no_storage_means_defaults() {
        assert_eq!(Settings::load(None), Settings::default());
    }

    #[test]
    fn visuals_follow_dark_mode() {
        let mut settings = Settings::default();
        assert!(settings.visuals().dark_mode);
        settings.dark_mode = false;
        assert!(!settings.visuals().dark_mode);
    }
}
