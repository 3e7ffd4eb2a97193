// Encoded sound files, read once and shared between plays

use log::warn;
use std::collections::HashMap;
use std::sync::Arc;

use crate::engine::assets::{AssetLoader, AssetType};

/// Sounds by identifier. A sound that fails to load is remembered as
/// missing so the warning is logged once.
pub struct SoundBank {
    loader: AssetLoader,
    sounds: HashMap<String, Option<Arc<[u8]>>>,
}

impl SoundBank {
    pub fn new(loader: AssetLoader) -> Self {
        Self {
            loader,
            sounds: HashMap::new(),
        }
    }

    /// Encoded bytes of `<assets>/sounds/<id>.ogg`, or `None` if the file
    /// could not be read
    pub fn get(&mut self, id: &str) -> Option<Arc<[u8]>> {
        if let Some(sound) = self.sounds.get(id) {
            return sound.clone();
        }

        let sound = match self.loader.load_bytes(AssetType::Sound, id) {
            Ok(bytes) => Some(Arc::from(bytes)),
            Err(e) => {
                warn!("{}; '{}' stays silent", e, id);
                None
            }
        };
        self.sounds.insert(id.to_string(), sound.clone());
        sound
    }
}
