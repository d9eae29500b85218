//! Manifest classification
//!
//! Documents are decoded in two steps: a minimal kind-tagged envelope first,
//! then the kind-specific payload once the tag is known. Anything that is
//! not recognizably a Kustomization, Application or ApplicationSet is
//! skipped, not an error.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CheckError, CheckResult};
use crate::store::FileStore;

/// Recognized kustomization file names, probed in order
pub const KUSTOMIZATION_FILE_NAMES: [&str; 3] =
    ["kustomization.yaml", "kustomization.yml", "Kustomization"];

/// A classified manifest document
#[derive(Debug)]
pub enum Manifest {
    Kustomization(Box<Kustomization>),
    /// An Argo CD Application with its declared source directory
    Application { source_path: String },
    /// An Argo CD ApplicationSet with its templated source directory
    ApplicationSet { source_path: String },
    Unrecognized,
}

/// Kustomization document, restricted to the fields the checks consume
///
/// Unknown fields are ignored so the checker keeps working as kustomize
/// grows its schema.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kustomization {
    #[serde(default)]
    pub resources: Vec<String>,

    #[serde(default)]
    pub config_map_generator: Vec<GeneratorArgs>,

    #[serde(default)]
    pub secret_generator: Vec<GeneratorArgs>,

    #[serde(default)]
    pub patches_strategic_merge: Vec<String>,

    #[serde(default)]
    pub patches: Vec<Patch>,

    #[serde(default)]
    pub transformers: Vec<String>,
}

/// One configMapGenerator/secretGenerator entry
#[derive(Debug, Default, Clone, Deserialize)]
pub struct GeneratorArgs {
    #[serde(default)]
    pub name: Option<String>,

    /// File sources, each `name` or `alias=name`
    #[serde(default)]
    pub files: Vec<String>,
}

/// One `patches` entry; inline patches carry no path
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Patch {
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApplicationDoc {
    spec: ApplicationSpec,
}

#[derive(Debug, Deserialize)]
struct ApplicationSpec {
    source: SourceRef,
}

#[derive(Debug, Deserialize)]
struct SourceRef {
    path: String,
}

#[derive(Debug, Deserialize)]
struct ApplicationSetDoc {
    spec: ApplicationSetSpec,
}

#[derive(Debug, Deserialize)]
struct ApplicationSetSpec {
    template: ApplicationTemplate,
}

#[derive(Debug, Deserialize)]
struct ApplicationTemplate {
    spec: ApplicationSpec,
}

/// Classify raw document bytes
///
/// A document that fails the envelope decode or carries an unknown kind is
/// [`Manifest::Unrecognized`]. A recognized kind whose payload cannot be
/// decoded is an error: [`CheckError::ManifestDecode`] for Kustomization,
/// [`CheckError::FieldExtraction`] for the Application kinds, which only
/// need one nested string field.
pub fn classify(path: &Path, data: &[u8]) -> CheckResult<Manifest> {
    let Ok(envelope) = serde_yaml::from_slice::<Envelope>(data) else {
        return Ok(Manifest::Unrecognized);
    };
    match envelope.kind.as_deref() {
        Some("Kustomization") => {
            let kustomization = decode_kustomization(path, data)?;
            Ok(Manifest::Kustomization(Box::new(kustomization)))
        }
        Some("Application") => {
            let doc: ApplicationDoc =
                serde_yaml::from_slice(data).map_err(|_| CheckError::FieldExtraction {
                    path: path.to_path_buf(),
                    field: "spec.source.path",
                })?;
            Ok(Manifest::Application {
                source_path: doc.spec.source.path,
            })
        }
        Some("ApplicationSet") => {
            let doc: ApplicationSetDoc =
                serde_yaml::from_slice(data).map_err(|_| CheckError::FieldExtraction {
                    path: path.to_path_buf(),
                    field: "spec.template.spec.source.path",
                })?;
            Ok(Manifest::ApplicationSet {
                source_path: doc.spec.template.spec.source.path,
            })
        }
        _ => Ok(Manifest::Unrecognized),
    }
}

/// Decode a kustomization manifest; malformed content is always fatal
pub(crate) fn decode_kustomization(path: &Path, data: &[u8]) -> CheckResult<Kustomization> {
    // a manifest that declares nothing decodes to the all-defaults document
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(Kustomization::default());
    }
    serde_yaml::from_slice(data).map_err(|source| CheckError::ManifestDecode {
        path: path.to_path_buf(),
        source,
    })
}

/// Probe a directory for a kustomization file; the first recognized name wins
pub fn lookup_kustomization_file(store: &dyn FileStore, dir: &Path) -> Option<PathBuf> {
    KUSTOMIZATION_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| store.exists(path))
}
