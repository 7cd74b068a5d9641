use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::{ActivatedBranch, Refs};
use crate::areas::workspace::{WIT_DIR_NAME, Workspace};
use crate::artifacts::core::config::Config;
use crate::artifacts::core::error::WitError;
use crate::artifacts::objects::commit_id::{IdGenerator, RandomIdGenerator};
use crate::artifacts::status::status_info::Status;
use anyhow::Context;
use file_guard::{FileGuard, Lock};
use std::cell::{Ref, RefCell, RefMut};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

const IMAGES_DIR_NAME: &str = "images";
const STAGING_DIR_NAME: &str = "staging_area";
const LOCK_FILE_NAME: &str = "lock";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    config: Config,
    id_generator: Box<dyn IdGenerator>,
    /// Session copy of `activated.txt`, loaded once and persisted by the commands that move it
    activated: RefCell<ActivatedBranch>,
}

/// Exclusive lock on `.wit/lock`, released on drop
pub struct RepositoryLock {
    _guard: FileGuard<Box<File>>,
}

impl Repository {
    /// Open (or prepare to initialize) the repository rooted at `path`
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory {:?}", path))?;
        }
        let path = path.canonicalize()?;
        let wit_path = path.join(WIT_DIR_NAME);

        let index = Index::new(wit_path.join(STAGING_DIR_NAME).into_boxed_path());
        let database = Database::new(wit_path.join(IMAGES_DIR_NAME).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(wit_path.into_boxed_path());
        let activated = refs.read_activated()?;

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
            config: Config::load_from_env()?,
            id_generator: Box::new(RandomIdGenerator),
            activated: RefCell::new(activated),
        })
    }

    /// Find the repository containing `start` by walking up to the first directory holding `.wit`
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let start = start
            .canonicalize()
            .with_context(|| format!("The specified path does not exist: {:?}", start))?;

        let root = start
            .ancestors()
            .find(|dir| dir.join(WIT_DIR_NAME).is_dir())
            .ok_or_else(|| WitError::RepositoryNotFound {
                start: start.clone(),
            })?;
        tracing::debug!(root = ?root, "discovered repository");

        Self::new(&root.to_string_lossy(), writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn wit_path(&self) -> PathBuf {
        self.path.join(WIT_DIR_NAME)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn id_generator(&self) -> &dyn IdGenerator {
        self.id_generator.as_ref()
    }

    pub fn set_id_generator(&mut self, id_generator: Box<dyn IdGenerator>) {
        self.id_generator = id_generator;
    }

    pub fn inspect_status(&'_ self) -> Status<'_> {
        Status::new(self)
    }

    pub fn activated(&self) -> Ref<'_, ActivatedBranch> {
        self.activated.borrow()
    }

    pub fn set_activated(&self, activated: ActivatedBranch) {
        *self.activated.borrow_mut() = activated;
    }

    /// Write the session's activated branch back to `activated.txt`
    pub fn persist_session(&self) -> anyhow::Result<()> {
        self.refs.write_activated(&self.activated.borrow())
    }

    /// Serialize mutating commands across processes
    pub fn lock(&self) -> anyhow::Result<RepositoryLock> {
        let lock_path = self.wit_path().join(LOCK_FILE_NAME);
        let lock_file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .with_context(|| format!("Unable to open lock file {:?}", lock_path))?;

        let guard = file_guard::lock(Box::new(lock_file), Lock::Exclusive, 0, 1)
            .with_context(|| format!("Unable to lock {:?}", lock_path))?;

        Ok(RepositoryLock { _guard: guard })
    }
}
