//! Stabile Bezeichner: Marker-IDs, Gruppen-Schlüssel und ungerichtete Kanten-Schlüssel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stabile, wertgleiche ID einer visuellen Entität (z.B. Organisationsname).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(String);

impl MarkerId {
    /// Erstellt eine neue ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Sentinel-ID leerer Handles.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Gibt die ID als String-Slice zurück.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` für die Sentinel-ID.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MarkerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MarkerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for MarkerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Schlüssel einer Aggregationsgruppe (z.B. Land einer Organisation).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    /// Erstellt einen neuen Gruppen-Schlüssel.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Gibt den Schlüssel als String-Slice zurück.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for GroupKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Ungeordnetes Paar zweier Marker-IDs.
///
/// Die Konstruktion normalisiert immer (kleinere ID zuerst), daher sind
/// `(A, B)` und `(B, A)` derselbe Schlüssel mit identischem Hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(MarkerId, MarkerId)", into = "(MarkerId, MarkerId)")]
pub struct EdgeKey {
    first: MarkerId,
    second: MarkerId,
}

impl EdgeKey {
    /// Erstellt einen normalisierten Kanten-Schlüssel.
    pub fn new(a: impl Into<MarkerId>, b: impl Into<MarkerId>) -> Self {
        let a = a.into();
        let b = b.into();
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    /// Erster Endpunkt (in Normalform).
    pub fn first(&self) -> &MarkerId {
        &self.first
    }

    /// Zweiter Endpunkt (in Normalform).
    pub fn second(&self) -> &MarkerId {
        &self.second
    }

    /// `true`, wenn beide Endpunkte identisch sind.
    pub fn is_loop(&self) -> bool {
        self.first == self.second
    }

    /// Prüft ob `id` einer der beiden Endpunkte ist.
    pub fn touches(&self, id: &MarkerId) -> bool {
        &self.first == id || &self.second == id
    }
}

impl From<(MarkerId, MarkerId)> for EdgeKey {
    fn from((a, b): (MarkerId, MarkerId)) -> Self {
        Self::new(a, b)
    }
}

impl From<EdgeKey> for (MarkerId, MarkerId) {
    fn from(key: EdgeKey) -> Self {
        (key.first, key.second)
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.first, self.second)
    }
}
