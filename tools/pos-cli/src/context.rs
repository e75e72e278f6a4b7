//! CLI execution context.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use pos_auth::SessionContext;
use pos_commerce::checkout::Sale;
use pos_commerce::Currency;
use pos_store::FileStore;

use crate::config::PosConfig;
use crate::output::Output;
use crate::seed::Datasets;

/// Config file names, in lookup order.
pub const CONFIG_NAMES: [&str; 3] = ["pos.toml", ".pos.toml", "pos.json"];

/// Session store key holding completed sales.
pub const SALES_KEY: &str = "pos-sales";

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: PosConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            PosConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<PosConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = PosConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Open the persisted session and restore any saved login.
    pub fn open_session(&self) -> Result<SessionContext<FileStore>> {
        let path = self.resolve_path(&self.config.session.store_path);
        let store = FileStore::open(&path)
            .with_context(|| format!("Failed to open session store: {}", path.display()))?;

        let mut session = SessionContext::new(store)
            .with_login_delay(Duration::from_millis(self.config.session.login_delay_ms));
        if session.restore()? {
            self.output.debug(&format!("Restored session from {}", path.display()));
        }
        Ok(session)
    }

    /// Sales completed so far, oldest first.
    pub fn sales(&self, session: &SessionContext<FileStore>) -> Result<Vec<Sale>> {
        Ok(session.cache().get::<Vec<Sale>>(SALES_KEY)?.unwrap_or_default())
    }

    /// Append a completed sale to the session store.
    pub fn record_sale(&self, session: &SessionContext<FileStore>, sale: &Sale) -> Result<()> {
        let mut sales = self.sales(session)?;
        sales.push(sale.clone());
        session
            .cache()
            .set(SALES_KEY, &sales)
            .context("Failed to record sale")?;
        Ok(())
    }

    /// Load the record collections.
    pub fn datasets(&self) -> Result<Datasets> {
        let dir = self.config.data.dir.as_ref().map(|d| self.resolve_path(d));
        Datasets::load(dir.as_deref())
    }

    pub fn currency(&self) -> Result<Currency> {
        self.config.currency()
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}
