use std::{fs, path::Path};

use ::serde::{Deserialize, Serialize};

use crate::{error::{Result, TaggerError}, tagger::corpus::Vocabulary};

/// Vocabulary snapshot encoding
///
/// Both encodings store the same shape:
/// `{"tags": [...], "pairs": [[token, tag], ...]}`.
/// `tags` carries every known tag in first-seen order, so tags whose pairs
/// were superseded and the tie-break order both survive a save/load cycle.
/// A bare `[[token, tag], ...]` list (the root token table as dumped by the
/// storage layer) is accepted on load as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Cbor,
}

impl SnapshotFormat {
    /// Pick the format from the file extension (`.json` / `.cbor`)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let ext = path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(SnapshotFormat::Json),
            "cbor" => Ok(SnapshotFormat::Cbor),
            _ => Err(TaggerError::UnknownFormat(path.as_ref().display().to_string())),
        }
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    tags: Vec<&'a str>,
    pairs: Vec<(&'a str, &'a str)>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotData {
    Full {
        tags: Vec<String>,
        pairs: Vec<(String, String)>,
    },
    Pairs(Vec<(String, String)>),
}

impl SnapshotData {
    fn into_vocabulary(self) -> Vocabulary {
        match self {
            SnapshotData::Full { tags, pairs } => Vocabulary::from_tags_and_pairs(tags, pairs),
            SnapshotData::Pairs(pairs) => Vocabulary::from_pairs(pairs),
        }
    }
}

impl Vocabulary {
    fn snapshot_ref(&self) -> SnapshotRef<'_> {
        SnapshotRef {
            tags: self.tags().collect(),
            pairs: self.pairs().collect(),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Self::from_json_slice(raw.as_bytes())
    }

    /// Invalid UTF-8 is a `TaggerError::Json`, never replaced silently
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let data: SnapshotData = serde_json::from_slice(bytes)?;
        Ok(data.into_vocabulary())
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot_ref())?)
    }

    pub fn from_cbor_slice(bytes: &[u8]) -> Result<Self> {
        let data: SnapshotData = serde_cbor::from_slice(bytes)?;
        Ok(data.into_vocabulary())
    }

    pub fn to_cbor_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_cbor::to_vec(&self.snapshot_ref())?)
    }

    /// Load a snapshot, format chosen by extension
    pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Self> {
        let format = SnapshotFormat::from_path(&path)?;
        let bytes = fs::read(&path)?;
        let vocab = match format {
            SnapshotFormat::Json => Self::from_json_slice(&bytes)?,
            SnapshotFormat::Cbor => Self::from_cbor_slice(&bytes)?,
        };
        tracing::info!(
            path = %path.as_ref().display(),
            tokens = vocab.len(),
            tags = vocab.tag_num(),
            "loaded vocabulary snapshot"
        );
        Ok(vocab)
    }

    /// Save a snapshot, format chosen by extension
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = match SnapshotFormat::from_path(&path)? {
            SnapshotFormat::Json => self.to_json_string()?.into_bytes(),
            SnapshotFormat::Cbor => self.to_cbor_vec()?,
        };
        fs::write(path, bytes)?;
        Ok(())
    }
}
