use doorstep_boundary as json;
use doorstep_core::{
    entities::*,
    store::{PersistencePort, Result, StoreError},
};
use jfs::Store;
use serde::{de::DeserializeOwned, Serialize};
use std::{io, path::Path};

const ACTIVE_KEY: &str = "active";

/// Durable storage with one JSON file per key in a directory.
pub struct JsonFileStore {
    json_store: Store,
}

impl JsonFileStore {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let json_store = Store::new(directory)?;
        Ok(Self { json_store })
    }

    pub fn path(&self) -> &Path {
        self.json_store.path()
    }

    fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.json_store.get(key) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + DeserializeOwned,
    {
        self.json_store.save_with_id(value, key)?;
        Ok(())
    }
}

fn slot_key(slot_type: SlotType) -> String {
    format!("slot-{slot_type}")
}

impl PersistencePort for JsonFileStore {
    fn load_slot(&self, slot_type: SlotType) -> Result<Option<AddressSlot>> {
        let Some(slot) = self.get::<json::AddressSlot>(&slot_key(slot_type))? else {
            return Ok(None);
        };
        let slot = AddressSlot::try_from(slot)
            .map_err(|err| StoreError::Other(anyhow::Error::from(err)))?;
        Ok(Some(slot))
    }

    fn save_slot(&self, slot: &AddressSlot) -> Result<()> {
        self.save(
            &slot_key(slot.slot_type),
            &json::AddressSlot::from(slot.clone()),
        )
    }

    fn load_active(&self) -> Result<Option<SlotType>> {
        Ok(self
            .get::<json::ActiveSelection>(ACTIVE_KEY)?
            .and_then(|selection| selection.into()))
    }

    fn save_active(&self, slot_type: Option<SlotType>) -> Result<()> {
        self.save(ACTIVE_KEY, &json::ActiveSelection::from(slot_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doorstep_entities::builders::*;
    use std::{fs, path::PathBuf};

    fn file_path(store: &JsonFileStore, key: &str) -> PathBuf {
        store.path().join(format!("{key}.json"))
    }

    #[test]
    fn load_from_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::try_new(dir.path()).unwrap();
        assert_eq!(None, store.load_slot(SlotType::Home).unwrap());
        assert_eq!(None, store.load_active().unwrap());
    }

    #[test]
    fn survive_a_restart() {
        let dir = tempfile::tempdir().unwrap();
        let slot = AddressSlot::build()
            .slot_type(SlotType::Current)
            .formatted_address("Park Street, Kolkata")
            .coordinate(22.55, 88.35)
            .finish();
        {
            let store = JsonFileStore::try_new(dir.path()).unwrap();
            store.save_slot(&slot).unwrap();
            store.save_active(Some(SlotType::Current)).unwrap();
        }
        let store = JsonFileStore::try_new(dir.path()).unwrap();
        assert_eq!(Some(slot), store.load_slot(SlotType::Current).unwrap());
        assert_eq!(Some(SlotType::Current), store.load_active().unwrap());
    }

    #[test]
    fn clear_active_selection() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::try_new(dir.path()).unwrap();
        store.save_active(Some(SlotType::Work)).unwrap();
        store.save_active(None).unwrap();
        assert_eq!(None, store.load_active().unwrap());
    }

    #[test]
    fn report_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::try_new(dir.path()).unwrap();
        fs::write(file_path(&store, ACTIVE_KEY), "{ not json").unwrap();
        assert!(store.load_active().is_err());
        fs::write(
            file_path(&store, &slot_key(SlotType::Home)),
            r#"{"slotType":"home","formattedAddress":"x","latitude":1.0}"#,
        )
        .unwrap();
        assert!(matches!(
            store.load_slot(SlotType::Home),
            Err(StoreError::Other(_))
        ));
    }
}
