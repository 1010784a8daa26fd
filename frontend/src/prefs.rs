use docugenie_core::i18n::{PreferenceStore, LANGUAGE_STORAGE_KEY};
use web_sys::Storage;

/// Language preference kept in `localStorage`.
pub struct LocalStoragePreference;

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl PreferenceStore for LocalStoragePreference {
    fn load(&self) -> Option<String> {
        storage()?.get_item(LANGUAGE_STORAGE_KEY).ok().flatten()
    }

    fn save(&self, value: &str) {
        match storage() {
            Some(s) => {
                if let Err(e) = s.set_item(LANGUAGE_STORAGE_KEY, value) {
                    log::warn!("Could not persist language preference: {e:?}");
                }
            }
            None => log::warn!("localStorage unavailable; language preference not saved"),
        }
    }
}
