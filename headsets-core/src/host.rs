use crate::audio::apply_to_catalog;
use crate::items::DatabaseTables;
use crate::{HeadsetError, Result};

/// Logging sink owned by the host. Mirrors the host's full logger surface
/// even though this hook itself only reports at `debug` and `success`.
pub trait HostLogger {
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);
}

/// Routes host log calls into `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl HostLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn success(&self, message: &str) {
        tracing::info!(success = true, "{}", message);
    }

    fn warning(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }

    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }
}

/// Database service handing out the loaded tables.
pub trait DatabaseServer {
    fn get_tables(&mut self) -> Result<&mut DatabaseTables>;
}

impl DatabaseServer for DatabaseTables {
    fn get_tables(&mut self) -> Result<&mut DatabaseTables> {
        Ok(self)
    }
}

/// `None` stands for a server whose database has not been loaded yet.
impl DatabaseServer for Option<DatabaseTables> {
    fn get_tables(&mut self) -> Result<&mut DatabaseTables> {
        self.as_mut().ok_or_else(|| {
            HeadsetError::CatalogUnavailable("database tables have not been loaded".to_string())
        })
    }
}

/// Hook the host invokes once, after the database is loaded and before any
/// client reads item templates.
pub trait PostDbLoadMod {
    fn post_db_load(&self, db: &mut dyn DatabaseServer, logger: &dyn HostLogger) -> Result<()>;
}

/// Boosts and crunches every headset in `templates.items`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeepFriedHeadsets;

impl PostDbLoadMod for DeepFriedHeadsets {
    fn post_db_load(&self, db: &mut dyn DatabaseServer, logger: &dyn HostLogger) -> Result<()> {
        let tables = db.get_tables()?;
        let summary = apply_to_catalog(&mut tables.templates.items);

        logger.debug(&format!(
            "Scanned {} item templates, rewrote {} audio properties",
            summary.scanned, summary.properties
        ));
        logger.success(&format!("Deep-fried {} headsets", summary.headsets));
        Ok(())
    }
}
