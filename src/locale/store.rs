use crate::{
    disk::Disk,
    error::{Error, Result},
};

/// Where locale documents are persisted, keyed by locale identifier.
pub trait LocaleStore {
    /// Raw text of the document, `None` if it does not exist yet.
    fn load(&self, locale: &str) -> Result<Option<String>>;

    fn save(&self, locale: &str, text: &str) -> Result<()>;
}

/// Stores `<locale>.json` files in the lang directory.
#[derive(Debug, Clone)]
pub struct DiskLocaleStore {
    disk: Disk,
}

impl DiskLocaleStore {
    pub fn new(disk: Disk) -> Self {
        Self { disk }
    }

    pub fn disk(&self) -> &Disk {
        &self.disk
    }

    pub fn file_name(locale: &str) -> String {
        if locale.ends_with(".json") {
            locale.to_string()
        } else {
            format!("{}.json", locale)
        }
    }
}

impl LocaleStore for DiskLocaleStore {
    fn load(&self, locale: &str) -> Result<Option<String>> {
        let Some(bytes) = self.disk.read(&Self::file_name(locale))? else {
            return Ok(None);
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| Error::InvalidDocument {
                locale: locale.to_string(),
                reason: format!("not valid UTF-8: {}", e),
            })
    }

    fn save(&self, locale: &str, text: &str) -> Result<()> {
        self.disk.write(&Self::file_name(locale), text.as_bytes())
    }
}
