use serde::{Deserialize, Serialize};

use crate::progress::KeyValueStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sound_enabled: bool,
    pub music_enabled: bool,
    pub haptics_enabled: bool,
    pub notifications_enabled: bool,
    pub has_completed_onboarding: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            sound_enabled: true,
            music_enabled: true,
            haptics_enabled: true,
            notifications_enabled: false,
            has_completed_onboarding: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    Sound,
    Music,
    Haptics,
    Notifications,
}

impl Preference {
    pub const ALL: [Preference; 4] = [
        Preference::Sound,
        Preference::Music,
        Preference::Haptics,
        Preference::Notifications,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Preference::Sound => "Sound effects",
            Preference::Music => "Music",
            Preference::Haptics => "Haptics",
            Preference::Notifications => "Daily reminders",
        }
    }
}

impl Settings {
    const STORAGE_KEY: &'static str = "settings";

    fn flag_mut(&mut self, preference: Preference) -> &mut bool {
        match preference {
            Preference::Sound => &mut self.sound_enabled,
            Preference::Music => &mut self.music_enabled,
            Preference::Haptics => &mut self.haptics_enabled,
            Preference::Notifications => &mut self.notifications_enabled,
        }
    }

    pub fn is_enabled(&self, preference: Preference) -> bool {
        match preference {
            Preference::Sound => self.sound_enabled,
            Preference::Music => self.music_enabled,
            Preference::Haptics => self.haptics_enabled,
            Preference::Notifications => self.notifications_enabled,
        }
    }

    /// Flips one preference and saves. Returns the new state.
    pub fn toggle(&mut self, preference: Preference, storage: &mut dyn KeyValueStore) -> bool {
        let flag = self.flag_mut(preference);
        *flag = !*flag;
        let enabled = *flag;
        self.save(storage);
        enabled
    }

    pub fn load(storage: &dyn KeyValueStore) -> Self {
        match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("unreadable settings, using defaults: {}", e);
                Settings::default()
            }),
            Ok(None) => Settings::default(),
            Err(e) => {
                log::warn!("could not read settings: {}", e);
                Settings::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if let Err(e) = storage.set(Self::STORAGE_KEY, json) {
                    log::error!("error saving settings: {}", e);
                }
            }
            Err(e) => log::error!("error encoding settings: {}", e),
        }
    }

    pub fn complete_onboarding(&mut self, storage: &mut dyn KeyValueStore) {
        self.has_completed_onboarding = true;
        self.save(storage);
    }

    pub fn reset_onboarding(&mut self, storage: &mut dyn KeyValueStore) {
        self.has_completed_onboarding = false;
        self.save(storage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::MemoryStore;

    #[test]
    fn defaults_when_absent_or_corrupt() {
        let mut storage = MemoryStore::new();
        assert_eq!(Settings::load(&storage), Settings::default());

        storage.set("settings", "{{".into()).unwrap();
        assert_eq!(Settings::load(&storage), Settings::default());
    }

    #[test]
    fn onboarding_flag_persists() {
        let mut storage = MemoryStore::new();
        let mut settings = Settings::load(&storage);
        settings.music_enabled = false;
        settings.complete_onboarding(&mut storage);

        let loaded = Settings::load(&storage);
        assert!(loaded.has_completed_onboarding);
        assert!(!loaded.music_enabled);

        settings.reset_onboarding(&mut storage);
        assert!(!Settings::load(&storage).has_completed_onboarding);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let mut storage = MemoryStore::new();
        storage
            .set("settings", "{\"sound_enabled\": false}".into())
            .unwrap();
        let loaded = Settings::load(&storage);
        assert!(!loaded.sound_enabled);
        assert!(loaded.haptics_enabled);
    }

    #[test]
    fn toggle_flips_and_saves() {
        let mut storage = MemoryStore::new();
        let mut settings = Settings::load(&storage);
        assert!(settings.is_enabled(Preference::Music));

        assert!(!settings.toggle(Preference::Music, &mut storage));
        assert!(settings.toggle(Preference::Notifications, &mut storage));

        let loaded = Settings::load(&storage);
        assert!(!loaded.is_enabled(Preference::Music));
        assert!(loaded.is_enabled(Preference::Notifications));
        assert!(loaded.is_enabled(Preference::Sound));

        assert!(settings.toggle(Preference::Music, &mut storage));
        assert!(Settings::load(&storage).music_enabled);
    }
}
