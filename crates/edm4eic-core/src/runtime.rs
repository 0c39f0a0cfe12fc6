//! The explicit initialization lifecycle for the native collaborator artifacts.
//!
//! Before any column is registered with a dataframe engine, the data model dictionary, the
//! dataframe support library and the kinematics headers must be present. A [`Runtime`] verifies
//! them once, in order, and either hands out a [`Context`] proving they were found or records the
//! first failure. A failure is fatal: the runtime never probes again and every later
//! [`Runtime::init`] returns the same [`Edm4eicError::LoadError`].
//!
//! Columns are registered with an engine only through a [`Context`], so nothing can be defined
//! once initialization has failed.
//!
//! Applications normally use the process-wide runtime through [`init`] and [`finalize`]. Tests and
//! embedders that need isolation can own a [`Runtime`] directly.

use std::{
    fmt::Display,
    fs::File,
    path::{Path, PathBuf},
    str::FromStr,
    sync::{Arc, OnceLock},
};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    data::Dataset,
    utils::{
        dataframe::{Column, Definition},
        enums::Kinematic,
    },
    Edm4eicError, Edm4eicResult,
};

/// Environment variable naming the directory holding the shared libraries.
pub const LIBRARY_PATH_ENV: &str = "EDM4EIC_LIBRARY_PATH";
/// Environment variable naming the include directory holding the headers.
pub const INCLUDE_PATH_ENV: &str = "EDM4EIC_INCLUDE_PATH";

/// The kind of a native artifact.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactKind {
    /// A shared library such as the data model dictionary
    SharedLibrary,
    /// A header declaring the registered functions
    Header,
}

impl Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::SharedLibrary => write!(f, "shared library"),
            ArtifactKind::Header => write!(f, "header"),
        }
    }
}

/// A native artifact which was found during initialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    /// The kind of artifact
    pub kind: ArtifactKind,
    /// The name it was requested by
    pub name: String,
    /// Where it was found
    pub path: PathBuf,
}

/// Where to find the native artifacts and which ones are required.
///
/// Libraries are resolved relative to `library_dir` and headers relative to `include_dir`. Both
/// directories may contain `~` and environment variables, which are expanded at initialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Directory holding the shared libraries
    pub library_dir: PathBuf,
    /// Include directory holding the headers
    pub include_dir: PathBuf,
    /// Shared libraries to verify, in load order
    pub libraries: Vec<String>,
    /// Headers to verify, in load order
    pub headers: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            library_dir: PathBuf::from("lib"),
            include_dir: PathBuf::from("include"),
            libraries: vec![
                "libedm4eicDict.so".to_string(),
                "libedm4eicRDF.so".to_string(),
            ],
            headers: vec![
                "edm4eic/utils/kinematics.h".to_string(),
                "edm4eic/utils/dataframe.h".to_string(),
            ],
        }
    }
}

impl RuntimeConfig {
    /// The default configuration with the directories overridden by [`LIBRARY_PATH_ENV`] and
    /// [`INCLUDE_PATH_ENV`] when they are set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = std::env::var_os(LIBRARY_PATH_ENV) {
            config.library_dir = PathBuf::from(dir);
        }
        if let Some(dir) = std::env::var_os(INCLUDE_PATH_ENV) {
            config.include_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn with_library_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.library_dir = dir.into();
        self
    }

    pub fn with_include_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.include_dir = dir.into();
        self
    }

    /// Every required artifact with the path it is expected at, in probing order (libraries
    /// first, then headers).
    pub fn artifacts(&self) -> Edm4eicResult<Vec<Artifact>> {
        let library_dir = expand_path(&self.library_dir)?;
        let include_dir = expand_path(&self.include_dir)?;
        let libraries = self.libraries.iter().map(|name| Artifact {
            kind: ArtifactKind::SharedLibrary,
            name: name.clone(),
            path: library_dir.join(name),
        });
        let headers = self.headers.iter().map(|name| Artifact {
            kind: ArtifactKind::Header,
            name: name.clone(),
            path: include_dir.join(name),
        });
        Ok(libraries.chain(headers).collect())
    }
}

fn expand_path(path: &Path) -> Edm4eicResult<PathBuf> {
    let raw = path.to_string_lossy();
    Ok(PathBuf::from(shellexpand::full(&raw)?.as_ref()))
}

fn verify(artifact: &Artifact) -> Edm4eicResult<()> {
    let load_error = || Edm4eicError::LoadError {
        kind: artifact.kind,
        name: artifact.name.clone(),
        searched: artifact.path.clone(),
    };
    let metadata = File::open(&artifact.path)
        .and_then(|file| file.metadata())
        .map_err(|_| load_error())?;
    if !metadata.is_file() {
        return Err(load_error());
    }
    Ok(())
}

/// Proof that the native artifacts were verified. Cheap to clone.
#[derive(Clone, Debug)]
pub struct Context {
    artifacts: Arc<Vec<Artifact>>,
}

impl Context {
    /// The verified artifacts, in the order they were probed.
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Resolve a registered function by its qualified or short name.
    pub fn function(&self, name: &str) -> Edm4eicResult<Kinematic> {
        Kinematic::from_str(name)
    }

    /// Every function available to a dataframe engine through this context.
    pub fn functions(&self) -> &'static [Kinematic] {
        &Kinematic::ALL
    }

    /// Register a column on `dataset`, like `Define(name, expression)` in a dataframe engine.
    pub fn define(&self, dataset: &Dataset, definition: &Definition) -> Edm4eicResult<Column> {
        debug!(%definition, "registering column");
        dataset.evaluate(definition)
    }

    /// Register several columns on `dataset`, in order.
    pub fn define_all(
        &self,
        dataset: &Dataset,
        definitions: &[Definition],
    ) -> Edm4eicResult<Vec<Column>> {
        definitions
            .iter()
            .map(|definition| self.define(dataset, definition))
            .collect()
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Uninitialized,
    Ready(Context),
    Failed(Edm4eicError),
}

/// Owner of the initialization state.
#[derive(Debug, Default)]
pub struct Runtime {
    state: RwLock<State>,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify every artifact named by `config`, stopping at the first one which is missing.
    ///
    /// A missing artifact is recorded as a fatal failure. Errors expanding the configured
    /// directories are returned without being recorded.
    ///
    /// Calling this again after success returns the existing [`Context`] without probing, even if
    /// `config` differs. Calling it again after a failure returns the recorded error.
    pub fn init(&self, config: &RuntimeConfig) -> Edm4eicResult<Context> {
        if let Some(result) = self.current() {
            return result;
        }
        let mut state = self.state.write();
        // another thread may have finished while we waited for the lock
        match &*state {
            State::Ready(context) => return Ok(context.clone()),
            State::Failed(err) => return Err(err.clone()),
            State::Uninitialized => {}
        }
        match Self::load(config) {
            Ok(context) => {
                info!(
                    artifacts = context.artifacts().len(),
                    "edm4eic runtime initialized"
                );
                *state = State::Ready(context.clone());
                Ok(context)
            }
            Err(err @ Edm4eicError::LoadError { .. }) => {
                error!(%err, "edm4eic runtime failed to initialize");
                *state = State::Failed(err.clone());
                Err(err)
            }
            // configuration errors happen before anything is probed and are not recorded
            Err(err) => Err(err),
        }
    }

    fn current(&self) -> Option<Edm4eicResult<Context>> {
        match &*self.state.read() {
            State::Uninitialized => None,
            State::Ready(context) => Some(Ok(context.clone())),
            State::Failed(err) => Some(Err(err.clone())),
        }
    }

    fn load(config: &RuntimeConfig) -> Edm4eicResult<Context> {
        let artifacts = config.artifacts()?;
        for artifact in &artifacts {
            debug!(kind = %artifact.kind, path = %artifact.path.display(), "probing artifact");
            verify(artifact)?;
        }
        Ok(Context {
            artifacts: Arc::new(artifacts),
        })
    }

    /// The current context, or the recorded load failure, or [`Edm4eicError::NotInitialized`].
    pub fn require(&self) -> Edm4eicResult<Context> {
        self.current().unwrap_or(Err(Edm4eicError::NotInitialized))
    }

    /// Fails with the recorded load failure once initialization has failed. An uninitialized
    /// runtime is usable for the pure kinematics functions.
    pub fn ensure_usable(&self) -> Edm4eicResult<()> {
        match &*self.state.read() {
            State::Failed(err) => Err(err.clone()),
            _ => Ok(()),
        }
    }

    /// Register columns on `dataset` through the current context.
    pub fn define_all(
        &self,
        dataset: &Dataset,
        definitions: &[Definition],
    ) -> Edm4eicResult<Vec<Column>> {
        self.require()?.define_all(dataset, definitions)
    }

    /// The current context, if initialization has succeeded.
    pub fn context(&self) -> Option<Context> {
        match &*self.state.read() {
            State::Ready(context) => Some(context.clone()),
            _ => None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(&*self.state.read(), State::Ready(_))
    }

    /// Whether a previous initialization failed.
    pub fn has_failed(&self) -> bool {
        matches!(&*self.state.read(), State::Failed(_))
    }

    /// Release the context so a later [`Runtime::init`] probes again. A recorded failure is kept.
    pub fn finalize(&self) {
        let mut state = self.state.write();
        if matches!(&*state, State::Ready(_)) {
            info!("edm4eic runtime finalized");
            *state = State::Uninitialized;
        }
    }
}

static GLOBAL_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// The process-wide [`Runtime`].
pub fn global() -> &'static Runtime {
    GLOBAL_RUNTIME.get_or_init(Runtime::new)
}

/// Initialize the process-wide runtime from [`RuntimeConfig::from_env`].
pub fn init() -> Edm4eicResult<Context> {
    global().init(&RuntimeConfig::from_env())
}

/// Initialize the process-wide runtime from an explicit configuration.
pub fn init_with(config: &RuntimeConfig) -> Edm4eicResult<Context> {
    global().init(config)
}

/// Finalize the process-wide runtime.
pub fn finalize() {
    global().finalize()
}

/// Whether the process-wide runtime holds a context.
pub fn is_initialized() -> bool {
    global().is_initialized()
}

/// See [`Runtime::ensure_usable`].
pub fn ensure_usable() -> Edm4eicResult<()> {
    global().ensure_usable()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_dataset;
    use std::fs;
    use tempfile::TempDir;

    fn install(config: &RuntimeConfig, skip: &[&str]) {
        for artifact in config.artifacts().unwrap() {
            if skip.contains(&artifact.name.as_str()) {
                continue;
            }
            fs::create_dir_all(artifact.path.parent().unwrap()).unwrap();
            fs::write(&artifact.path, b"").unwrap();
        }
    }

    fn config_in(dir: &TempDir) -> RuntimeConfig {
        RuntimeConfig::default()
            .with_library_dir(dir.path().join("lib"))
            .with_include_dir(dir.path().join("include"))
    }

    #[test]
    fn test_init_succeeds_when_all_artifacts_present() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        install(&config, &[]);
        let runtime = Runtime::new();
        assert!(!runtime.is_initialized());
        let context = runtime.init(&config).unwrap();
        assert!(runtime.is_initialized());
        assert_eq!(context.artifacts().len(), 4);
        assert_eq!(context.artifacts()[0].name, "libedm4eicDict.so");
        assert_eq!(context.artifacts()[3].kind, ArtifactKind::Header);
        assert_eq!(
            context.function("edm4eic::utils::pt").unwrap(),
            Kinematic::Pt
        );
        assert!(context.function("edm4eic::utils::rapidity").is_err());
        assert_eq!(context.functions().len(), Kinematic::ALL.len());
    }

    #[test]
    fn test_init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        install(&config, &[]);
        let runtime = Runtime::new();
        let first = runtime.init(&config).unwrap();
        // artifacts are not probed again
        fs::remove_dir_all(dir.path().join("lib")).unwrap();
        let second = runtime.init(&config).unwrap();
        assert!(Arc::ptr_eq(&first.artifacts, &second.artifacts));
    }

    #[test]
    fn test_missing_library_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        install(&config, &["libedm4eicDict.so"]);
        let runtime = Runtime::new();
        let err = runtime.init(&config).unwrap_err();
        match &err {
            Edm4eicError::LoadError {
                kind,
                name,
                searched,
            } => {
                assert_eq!(*kind, ArtifactKind::SharedLibrary);
                assert_eq!(name, "libedm4eicDict.so");
                assert_eq!(searched, &dir.path().join("lib").join("libedm4eicDict.so"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("libedm4eicDict.so"));
        assert!(!runtime.is_initialized());
        assert!(runtime.has_failed());
        assert!(runtime.context().is_none());
    }

    #[test]
    fn test_failure_is_not_retried() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let runtime = Runtime::new();
        assert!(runtime.init(&config).is_err());
        install(&config, &[]);
        let err = runtime.init(&config).unwrap_err();
        assert!(matches!(
            err,
            Edm4eicError::LoadError {
                kind: ArtifactKind::SharedLibrary,
                ..
            }
        ));
        runtime.finalize();
        assert!(runtime.init(&config).is_err());
    }

    #[test]
    fn test_definitions_refused_after_failed_init() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        install(&config, &["libedm4eicRDF.so"]);
        let runtime = Runtime::new();
        let dataset = test_dataset();
        let definitions = [Definition::new("MCParticles_pt", Kinematic::Pt, "MCParticles")];
        assert!(matches!(
            runtime.define_all(&dataset, &definitions),
            Err(Edm4eicError::NotInitialized)
        ));
        assert!(runtime.ensure_usable().is_ok());
        assert!(runtime.init(&config).is_err());
        for result in [
            runtime.define_all(&dataset, &definitions).map(|_| ()),
            runtime.require().map(|_| ()),
            runtime.ensure_usable(),
        ] {
            assert!(matches!(
                result,
                Err(Edm4eicError::LoadError { ref name, .. }) if name == "libedm4eicRDF.so"
            ));
        }
    }

    #[test]
    fn test_definitions_registered_through_context() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        install(&config, &[]);
        let runtime = Runtime::new();
        let context = runtime.init(&config).unwrap();
        let dataset = test_dataset();
        let definition = Definition::parse("MCParticles_pt", "edm4eic::utils::pt(MCParticles)")
            .unwrap();
        let column = context.define(&dataset, &definition).unwrap();
        assert_eq!(column.values[0], vec![5.0, 0.0]);
        let columns = runtime
            .define_all(&dataset, std::slice::from_ref(&definition))
            .unwrap();
        assert_eq!(columns, vec![column]);
        runtime.finalize();
        assert!(matches!(
            runtime.define_all(&dataset, &[definition]),
            Err(Edm4eicError::NotInitialized)
        ));
    }

    #[test]
    fn test_missing_header() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        install(&config, &["edm4eic/utils/dataframe.h"]);
        let err = Runtime::new().init(&config).unwrap_err();
        assert!(matches!(
            err,
            Edm4eicError::LoadError {
                kind: ArtifactKind::Header,
                ref name,
                ..
            } if name == "edm4eic/utils/dataframe.h"
        ));
    }

    #[test]
    fn test_directory_is_not_an_artifact() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        install(&config, &["libedm4eicRDF.so"]);
        fs::create_dir_all(dir.path().join("lib").join("libedm4eicRDF.so")).unwrap();
        let err = Runtime::new().init(&config).unwrap_err();
        assert!(err.to_string().contains("libedm4eicRDF.so"));
    }

    #[test]
    fn test_finalize_allows_reinitialization() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        install(&config, &[]);
        let runtime = Runtime::new();
        runtime.init(&config).unwrap();
        runtime.finalize();
        assert!(!runtime.is_initialized());
        runtime.finalize();
        runtime.init(&config).unwrap();
        assert!(runtime.is_initialized());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: RuntimeConfig =
            serde_json::from_str(r#"{"library_dir": "/opt/edm4eic/lib"}"#).unwrap();
        assert_eq!(config.library_dir, PathBuf::from("/opt/edm4eic/lib"));
        assert_eq!(config.include_dir, PathBuf::from("include"));
        assert_eq!(config.libraries.len(), 2);
        assert_eq!(config.headers[0], "edm4eic/utils/kinematics.h");
    }

    #[test]
    fn test_config_rejects_undefined_variables() {
        let config =
            RuntimeConfig::default().with_library_dir("$EDM4EIC_TEST_UNDEFINED_VARIABLE/lib");
        assert!(matches!(
            config.artifacts(),
            Err(Edm4eicError::LookupError(_))
        ));
        let runtime = Runtime::new();
        assert!(matches!(
            runtime.init(&config),
            Err(Edm4eicError::LookupError(_))
        ));
        assert!(!runtime.has_failed());
    }
}
