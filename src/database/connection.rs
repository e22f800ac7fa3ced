//! Conexión a PostgreSQL
//!
//! Este módulo abre el pool de conexiones y aplica las migraciones al arrancar.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Conexión compartida a la base de datos
#[derive(Clone)]
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Conectar usando la configuración indicada
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("🗄️ Conectando a PostgreSQL: {}", mask_database_url(&config.url));
        let pool = config.create_pool().await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        info!("✅ PostgreSQL conectado");
        Ok(Self { pool })
    }

    /// Conectar leyendo DATABASE_URL del entorno
    pub async fn new_default() -> Result<Self> {
        let config = DatabaseConfig::from_env()?;
        Self::new(&config).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Ejecutar migraciones de la base de datos
    pub async fn run_migrations(&self) -> Result<()> {
        info!("📜 Aplicando migraciones...");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("✅ Migraciones aplicadas");
        Ok(())
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at_pos)) if at_pos > scheme_end => {
            format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
