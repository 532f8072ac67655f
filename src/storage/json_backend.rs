use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    core::errors::{PacingError, Result},
    domain::{Brand, Campaign, CampaignStatus, DaypartingSchedule, Identifiable, Spend, Versioned},
};

use super::BudgetStore;

const TMP_SUFFIX: &str = "tmp";

pub const STORE_SCHEMA_VERSION: u32 = 1;

/// Everything the store persists, serialized as one JSON document so a
/// mutation either lands completely or not at all.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Document {
    #[serde(default = "schema_version_default")]
    schema_version: u32,
    #[serde(default)]
    brands: Vec<Brand>,
    #[serde(default)]
    campaigns: Vec<Campaign>,
    #[serde(default)]
    schedules: Vec<DaypartingSchedule>,
    #[serde(default)]
    spends: Vec<Spend>,
}

fn schema_version_default() -> u32 {
    STORE_SCHEMA_VERSION
}

/// File-backed store keeping the working document in memory behind a mutex.
/// Every mutation runs against a copy, persists it with a tmp-file + rename
/// write, and only then replaces the in-memory document, so a failed write
/// leaves no partial state.
pub struct JsonStore {
    path: Option<PathBuf>,
    doc: Mutex<Document>,
}

impl JsonStore {
    /// Opens the store at `path`, loading the existing document if present.
    /// The file is only created on the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let doc = if path.exists() {
            let data = fs::read_to_string(&path)?;
            let doc: Document = serde_json::from_str(&data)?;
            if doc.schema_version > STORE_SCHEMA_VERSION {
                return Err(PacingError::StorageError(format!(
                    "store `{}` is from a newer schema version",
                    path.display()
                )));
            }
            doc
        } else {
            Document {
                schema_version: STORE_SCHEMA_VERSION,
                ..Document::default()
            }
        };
        Ok(Self {
            path: Some(path),
            doc: Mutex::new(doc),
        })
    }

    /// Store with no backing file; state lives for the process lifetime.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            doc: Mutex::new(Document {
                schema_version: STORE_SCHEMA_VERSION,
                ..Document::default()
            }),
        }
    }

    fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> Result<R> {
        let guard = self
            .doc
            .lock()
            .map_err(|_| PacingError::StorageError("store mutex poisoned".into()))?;
        Ok(f(&guard))
    }

    /// Runs `f` against a copy of the document, persists the copy, then swaps
    /// it in. Errors from `f` or from persistence leave the store untouched.
    fn mutate<R>(&self, f: impl FnOnce(&mut Document) -> Result<R>) -> Result<R> {
        let mut guard = self
            .doc
            .lock()
            .map_err(|_| PacingError::StorageError("store mutex poisoned".into()))?;
        let mut next = guard.clone();
        let out = f(&mut next)?;
        self.persist(&next)?;
        *guard = next;
        Ok(out)
    }

    fn persist(&self, doc: &Document) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(doc)?;
        let tmp = tmp_path(path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl BudgetStore for JsonStore {
    fn brand(&self, id: Uuid) -> Result<Brand> {
        self.read(|doc| doc.brands.iter().find(|b| b.id == id).cloned())?
            .ok_or(PacingError::BrandNotFound(id))
    }

    fn campaign(&self, id: Uuid) -> Result<Campaign> {
        self.read(|doc| doc.campaigns.iter().find(|c| c.id == id).cloned())?
            .ok_or(PacingError::CampaignNotFound(id))
    }

    fn brands(&self) -> Result<Vec<Brand>> {
        self.read(|doc| doc.brands.clone())
    }

    fn campaigns(&self) -> Result<Vec<Campaign>> {
        self.read(|doc| doc.campaigns.clone())
    }

    fn active_campaigns(&self) -> Result<Vec<Campaign>> {
        self.read(|doc| {
            doc.campaigns
                .iter()
                .filter(|c| c.is_active)
                .cloned()
                .collect()
        })
    }

    fn paused_campaigns(&self) -> Result<Vec<Campaign>> {
        self.read(|doc| {
            doc.campaigns
                .iter()
                .filter(|c| c.status == CampaignStatus::Paused)
                .cloned()
                .collect()
        })
    }

    fn schedules(&self, campaign_id: Uuid) -> Result<Vec<DaypartingSchedule>> {
        self.read(|doc| {
            doc.schedules
                .iter()
                .filter(|s| s.campaign_id == campaign_id && s.is_active)
                .cloned()
                .collect()
        })
    }

    fn spends(&self, campaign_id: Uuid) -> Result<Vec<Spend>> {
        self.read(|doc| {
            doc.spends
                .iter()
                .filter(|s| s.campaign_id == campaign_id)
                .cloned()
                .collect()
        })
    }

    fn insert_brand(&self, brand: Brand) -> Result<Brand> {
        self.mutate(|doc| {
            if doc.brands.iter().any(|b| b.id == brand.id) {
                return Err(PacingError::StorageError(format!(
                    "brand {} already exists",
                    brand.id
                )));
            }
            doc.brands.push(brand.clone());
            Ok(brand)
        })
    }

    fn insert_campaign(&self, campaign: Campaign) -> Result<Campaign> {
        self.mutate(|doc| {
            if !doc.brands.iter().any(|b| b.id == campaign.brand_id) {
                return Err(PacingError::BrandNotFound(campaign.brand_id));
            }
            if doc.campaigns.iter().any(|c| c.id == campaign.id) {
                return Err(PacingError::StorageError(format!(
                    "campaign {} already exists",
                    campaign.id
                )));
            }
            doc.campaigns.push(campaign.clone());
            Ok(campaign)
        })
    }

    fn insert_schedule(&self, schedule: DaypartingSchedule) -> Result<DaypartingSchedule> {
        self.mutate(|doc| {
            if !doc.campaigns.iter().any(|c| c.id == schedule.campaign_id) {
                return Err(PacingError::CampaignNotFound(schedule.campaign_id));
            }
            doc.schedules.push(schedule.clone());
            Ok(schedule)
        })
    }

    fn save_brand(&self, brand: &Brand) -> Result<Brand> {
        self.mutate(|doc| cas_replace(&mut doc.brands, brand, PacingError::BrandNotFound))
    }

    fn save_campaign(&self, campaign: &Campaign) -> Result<Campaign> {
        self.mutate(|doc| {
            cas_replace(&mut doc.campaigns, campaign, PacingError::CampaignNotFound)
        })
    }

    fn commit_spend(&self, spend: &Spend, campaign: &Campaign) -> Result<Campaign> {
        self.mutate(|doc| {
            let saved = cas_replace(&mut doc.campaigns, campaign, PacingError::CampaignNotFound)?;
            doc.spends.push(spend.clone());
            Ok(saved)
        })
    }
}

/// Replaces the stored copy of `incoming` if the caller's snapshot is still
/// current, bumping the version. A version mismatch means a concurrent writer
/// got there first.
fn cas_replace<T: Identifiable + Versioned + Clone>(
    items: &mut [T],
    incoming: &T,
    not_found: impl FnOnce(Uuid) -> PacingError,
) -> Result<T> {
    let current = items
        .iter_mut()
        .find(|item| item.id() == incoming.id())
        .ok_or_else(|| not_found(incoming.id()))?;
    if current.version() != incoming.version() {
        return Err(PacingError::Conflict(format!(
            "entity {} was modified concurrently (stored version {}, snapshot version {})",
            incoming.id(),
            current.version(),
            incoming.version()
        )));
    }
    let mut next = incoming.clone();
    next.bump_version();
    *current = next.clone();
    Ok(next)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
