use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use itasha_wraps::cache::{CacheConfig, RedisClient};
use itasha_wraps::config::EnvironmentConfig;
use itasha_wraps::create_app;
use itasha_wraps::database::DatabaseConnection;
use itasha_wraps::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("itasha_wraps=debug,tower_http=info")),
        )
        .init();

    info!("🎌 Itasha Wraps - API de la tienda");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;
    if config.is_production() {
        info!("🏭 Modo producción");
    }

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    db_connection.run_migrations().await?;
    let pool = db_connection.pool().clone();

    // Redis es opcional: sin él se sirve todo desde la base
    let redis = match config.redis_url.as_deref() {
        Some(url) => match RedisClient::new(CacheConfig::from_url(url)).await {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("⚠️ Redis no disponible, se continúa sin cache: {}", e);
                None
            }
        },
        None => None,
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::new(pool, config, redis);
    info!("💳 Proveedor de pagos: {}", app_state.payments.name());

    let app = create_app(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("💰 Precios (públicos):");
    info!("   GET  /api/pricing/options - Opciones del calculador");
    info!("   GET  /api/pricing/vehicles/makes - Marcas");
    info!("   GET  /api/pricing/vehicles/models?make= - Modelos de una marca");
    info!("   GET  /api/pricing/vehicles/categories - Categorías");
    info!("   POST /api/pricing/quote - Calcular presupuesto");
    info!("🛒 Tienda (públicos):");
    info!("   GET  /api/products - Productos activos");
    info!("   GET  /api/portfolio/images - Portfolio (imágenes)");
    info!("   GET  /api/portfolio/videos - Portfolio (vídeos)");
    info!("   GET  /api/vehicles?make= - Vehículos");
    info!("   GET  /api/vehicles/stats - Estadísticas de vehículos");
    info!("   POST /api/quotes - Solicitar presupuesto");
    info!("   POST /api/customers - Alta de cliente");
    info!("   POST /api/checkout - Checkout del depósito");
    info!("📬 Webhooks:");
    info!("   POST /api/webhooks/stripe - Stripe");
    info!("   POST /api/webhooks/square - Square");
    info!("👤 Portal del cliente (token):");
    info!("   POST /api/revisions - Solicitar revisión");
    info!("   GET  /api/portal/data?type= - Proyectos o pedidos");
    info!("   GET  /api/portal/dashboard - Panel del cliente");
    info!("🔐 Administración (token + admin):");
    info!("   GET  /api/admin/dashboard - Panel");
    info!("   *    /api/admin/quotes - Presupuestos");
    info!("   GET  /api/admin/customers - Clientes");
    info!("   *    /api/admin/orders - Pedidos");
    info!("   *    /api/admin/projects - Proyectos");
    info!("   *    /api/admin/revisions - Revisiones");
    info!("   POST /api/admin/vehicles/upload - Importar vehículos (.xlsx)");
    info!("   DELETE /api/admin/vehicles/:id - Eliminar vehículo");
    info!("   GET  /api/admin/status-history/:entity/:id - Historial de estados");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
