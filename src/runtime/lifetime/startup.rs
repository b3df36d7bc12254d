use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::jobs::{JobContext, TaskQueue, mailer::create_mailer};
use crate::models::admins::requests::CreateAdminRequest;
use crate::models::auth::UserRole;
use crate::models::seasons::requests::CreateSeasonRequest;
use crate::storage::Storage;
use crate::utils::password::{generate_random_password, hash_password};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub queue: TaskQueue,
}

/// 创建缓存实例
async fn create_cache() -> Result<Arc<dyn ObjectCache>, Box<dyn std::error::Error>> {
    let config = AppConfig::get();
    let cache_type = &config.cache.cache_type;

    warn!("Attempting to create {} cache backend", cache_type);

    // 根据配置选择缓存后端
    if let Some(constructor) = get_object_cache_plugin(cache_type) {
        match constructor().await {
            Ok(cache) => {
                warn!("Successfully created {} cache backend", cache_type);
                return Ok(Arc::from(cache));
            }
            Err(e) => {
                warn!("Failed to create {} cache: {}", cache_type, e);

                // 如果配置的缓存失败，尝试回退策略
                if cache_type == "redis" {
                    warn!("Falling back to memory cache");
                    if let Some(fallback_constructor) = get_object_cache_plugin("moka") {
                        match fallback_constructor().await {
                            Ok(cache) => {
                                warn!(
                                    "Successfully created fallback Moka (in-memory) cache backend"
                                );
                                return Ok(Arc::from(cache));
                            }
                            Err(fallback_e) => {
                                warn!("Failed to create fallback Moka cache: {}", fallback_e);
                            }
                        }
                    }
                }
            }
        }
    } else {
        warn!("Cache backend '{}' not found in registry", cache_type);

        // 如果找不到配置的缓存类型，尝试默认的内存缓存
        if cache_type != "moka" {
            warn!("Falling back to default memory cache");
            if let Some(fallback_constructor) = get_object_cache_plugin("moka") {
                match fallback_constructor().await {
                    Ok(cache) => {
                        warn!("Successfully created fallback Moka (in-memory) cache backend");
                        return Ok(Arc::from(cache));
                    }
                    Err(fallback_e) => {
                        warn!("Failed to create fallback Moka cache: {}", fallback_e);
                    }
                }
            }
        }
    }

    Err(format!("No cache backend available (tried: {cache_type})").into())
}

/// 确保存在当前学期
async fn seed_season(storage: &Arc<dyn Storage>) {
    match storage.get_current_season().await {
        Ok(Some(season)) => {
            debug!("Current season is {}, skipping season seed", season.season);
            return;
        }
        Ok(None) => {
            info!("No current season configured, creating the initial season...");
        }
        Err(e) => {
            warn!("Failed to load current season: {}, skipping season seed", e);
            return;
        }
    }

    let season = AppConfig::get().app.initial_season;
    // 学期已存在但未设为当前时直接切换
    let result = match storage.get_season(season).await {
        Ok(Some(_)) => storage.set_current_season(season).await.map(|_| ()),
        Ok(None) => storage
            .create_season(CreateSeasonRequest {
                season,
                name: format!("Season {season}"),
                academic_year: None,
                set_current: true,
            })
            .await
            .map(|_| ()),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => info!("Season {} is now the current season", season),
        Err(e) => warn!("Failed to seed season {}: {}", season, e),
    }
}

/// 初始化超级管理员账号
/// 如果数据库中没有任何管理员，则创建一个默认的 super_admin 账号
async fn seed_admin(storage: &Arc<dyn Storage>) {
    // 检查是否已有管理员
    match storage.count_admins().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} admin(s), skipping admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No admins found in database, creating default super admin account...");
        }
        Err(e) => {
            warn!("Failed to count admins: {}, skipping admin seed", e);
            return;
        }
    }

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    // 哈希密码
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin_request = CreateAdminRequest {
        email: std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@trainhub.local".to_string()),
        password: password_hash,
        full_name: "Administrator".to_string(),
        phone: None,
        role: UserRole::SuperAdmin,
    };

    match storage.create_admin(admin_request).await {
        Ok(admin) => {
            info!(
                "Default super admin created successfully (ID: {}, email: {})",
                admin.id, admin.email
            );
        }
        Err(e) => {
            warn!("Failed to create super admin account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储、种子数据、缓存和后台任务队列
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 初始化当前学期与超级管理员（如果需要）
    seed_season(&storage).await;
    seed_admin(&storage).await;

    // 创建缓存实例
    let cache = create_cache().await.expect("Failed to create cache");
    warn!("Cache backend initialized");

    let mailer = create_mailer().expect("Failed to create mail transport");
    let (queue, _dispatcher) = TaskQueue::from_config(JobContext {
        storage: storage.clone(),
        mailer,
    });
    warn!("Task queue started");

    StartupContext {
        storage,
        cache,
        queue,
    }
}
