use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage tier a disk path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageMedium {
    Hdd,
    Ssd,
}

impl StorageMedium {
    pub const ALL: [Self; 2] = [Self::Hdd, Self::Ssd];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hdd => "HDD",
            Self::Ssd => "SSD",
        }
    }
}

impl fmt::Display for StorageMedium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for StorageMedium {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_ascii_lowercase().as_str() {
            "hdd" => Ok(Self::Hdd),
            "ssd" => Ok(Self::Ssd),
            _ => Err(format!("invalid storage medium: {s}")),
        }
    }
}

/// One slot per known medium.
///
/// Used instead of a `HashMap<StorageMedium, _>` so every medium always has
/// an entry and iteration order is fixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct PerMedium<T> {
    pub hdd: T,
    pub ssd: T,
}

impl<T> PerMedium<T> {
    pub fn from_fn(mut f: impl FnMut(StorageMedium) -> T) -> Self {
        Self { hdd: f(StorageMedium::Hdd), ssd: f(StorageMedium::Ssd) }
    }

    pub const fn get(&self, medium: StorageMedium) -> &T {
        match medium {
            StorageMedium::Hdd => &self.hdd,
            StorageMedium::Ssd => &self.ssd,
        }
    }

    pub fn get_mut(&mut self, medium: StorageMedium) -> &mut T {
        match medium {
            StorageMedium::Hdd => &mut self.hdd,
            StorageMedium::Ssd => &mut self.ssd,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (StorageMedium, &T)> {
        StorageMedium::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}
