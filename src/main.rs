//! # Kongres 웹 서버 진입점
//!
//! 학술대회 등록 사이트 백엔드의 **시작점(entry point)**입니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. 관리자 계정 시드 (환경변수가 있을 때만)
//! 6. API 라우터 설정
//! 7. HTTP 서버 시작

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use kongres::config::Config;
use kongres::db;
use kongres::models::UserRole;
use kongres::routes::{self, registrations::AppState, *};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG 환경변수가 없으면 기본 필터를 사용합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kongres=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting Kongres server on {}:{}", config.host, config.port);

    // ── 4단계: SQLite 연결 풀 생성 ──
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    // ── 5단계: 데이터베이스 마이그레이션 실행 ──
    // 스키마와 기본 요금표를 ./migrations의 SQL 파일로 관리합니다.
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    // ── 6단계: 관리자 계정 시드 ──
    // ADMIN_EMAIL / ADMIN_PASSWORD가 설정되어 있고 해당 계정이 없을 때만 생성합니다.
    // 공개 회원가입 엔드포인트가 없으므로 관리자 계정은 이 경로로만 만들어집니다.
    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        seed_admin(&pool, email, password).await?;
    }

    // ── 7단계: 애플리케이션 상태(State) 생성 ──
    let state = AppState {
        pool: pool.clone(),
        jwt_secret: config.jwt_secret.clone(),
    };

    // ── 8단계: API 라우터 설정 ──

    // 인증 관련 라우트 (로그인, 토큰 갱신, 로그아웃, 내 정보)
    let auth_routes = Router::new()
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/refresh", post(routes::auth::refresh))
        .route("/auth/logout", post(routes::auth::logout))
        .route("/auth/me", get(routes::auth::me));

    let api_routes = Router::new()
        .merge(auth_routes)
        // 요금표: 공개 조회/미리보기, 관리자 편집
        .route("/fees", get(list_fees))
        .route("/fees/quote", get(quote_fee))
        .route("/fees/{registration_type}", put(upsert_fee))
        // 얼리버드 기간 관리 (관리자)
        .route("/early-bird", get(list_periods).post(create_period))
        .route("/early-bird/{id}", put(update_period).delete(delete_period))
        // 등록: 공개 제출, 관리자 목록/상태 관리
        .route("/registrations", get(list_registrations).post(submit_registration))
        .route("/registrations/export", get(export_registrations))
        .route("/registrations/{id}", delete(delete_registration))
        .route("/registrations/{id}/payment-status", patch(update_payment_status))
        .route("/presenter-registrations/{id}/paper-status", patch(update_paper_status))
        .route("/presenters/{id}/comment", patch(update_presenter_comment))
        // 헬스체크
        .route("/health", get(health_check))
        .with_state(state);

    // ── 9단계: CORS 미들웨어 설정 ──
    // 개발 환경에서는 모두 허용합니다. 프로덕션에서는 특정 도메인만 허용해야 합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // ── 10단계: 프론트엔드 정적 파일 서빙 설정 ──
    // 빌드된 프론트엔드가 있으면 같은 서버에서 서빙합니다.
    // SPA이므로 찾을 수 없는 경로는 index.html로 돌려보냅니다.
    let frontend_dist = Path::new("../frontend/dist");
    let app = if frontend_dist.exists() {
        tracing::info!("Serving frontend static files from ../frontend/dist");

        let serve_dir = ServeDir::new("../frontend/dist")
            .not_found_service(ServeFile::new("../frontend/dist/index.html"));

        Router::new()
            .nest("/api/v1", api_routes)
            .fallback_service(serve_dir)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    } else {
        tracing::warn!("Frontend dist directory not found, serving API only");

        Router::new()
            .nest("/api/v1", api_routes)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    };

    // ── 11단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// 관리자 계정을 시드합니다. 이미 같은 이메일의 계정이 있으면 건너뜁니다.
async fn seed_admin(pool: &SqlitePool, email: &str, password: &str) -> Result<()> {
    if db::users::find_by_email(pool, email).await?.is_some() {
        return Ok(());
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Password hashing failed: {}", e))?
        .to_string();

    db::users::create_user(
        pool,
        &uuid::Uuid::now_v7().to_string(),
        email,
        "Administrator",
        &password_hash,
        UserRole::Admin,
        &db::periods::now_utc(),
    )
    .await?;

    tracing::info!("Seeded admin account for {}", email);
    Ok(())
}
