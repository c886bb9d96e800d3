use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::FmtSubscriber;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use ledger_service::{
    api::routes::{routes, AppState},
    infrastructure::{
        locking::keyed_lock::KeyedLockManager,
        persistence::{
            credit_type_repository::PostgresCreditTypeRepository,
            transaction_repository::PostgresTransactionRepository,
            wallet_repository::PostgresWalletRepository,
        },
    },
    use_cases::{
        create_credit_type::CreateCreditTypeUseCase, create_wallet::CreateWalletUseCase,
        delete_credit_type::DeleteCreditTypeUseCase, delete_wallet::DeleteWalletUseCase,
        get_credit_type::GetCreditTypeUseCase, get_transaction::GetTransactionUseCase,
        get_wallet::GetWalletUseCase, list_credit_types::ListCreditTypesUseCase,
        list_transactions::ListTransactionsUseCase, list_wallets::ListWalletsUseCase,
        process_transaction::ProcessTransactionUseCase,
        update_credit_type::UpdateCreditTypeUseCase, update_wallet::UpdateWalletUseCase,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        ledger_service::api::wallet_routes::create_wallet,
        ledger_service::api::wallet_routes::get_wallet,
        ledger_service::api::wallet_routes::list_wallets,
        ledger_service::api::wallet_routes::update_wallet,
        ledger_service::api::wallet_routes::delete_wallet,
        ledger_service::api::credit_type_routes::create_credit_type,
        ledger_service::api::credit_type_routes::get_credit_type,
        ledger_service::api::credit_type_routes::list_credit_types,
        ledger_service::api::credit_type_routes::update_credit_type,
        ledger_service::api::credit_type_routes::delete_credit_type,
        ledger_service::api::transaction_routes::create_deposit_transaction,
        ledger_service::api::transaction_routes::create_debit_transaction,
        ledger_service::api::transaction_routes::create_hold_transaction,
        ledger_service::api::transaction_routes::create_release_transaction,
        ledger_service::api::transaction_routes::create_adjust_transaction,
        ledger_service::api::transaction_routes::get_transaction,
        ledger_service::api::transaction_routes::list_transactions
    ),
    components(schemas(
        ledger_service::api::wallet_routes::CreateWalletRequest,
        ledger_service::api::wallet_routes::UpdateWalletRequest,
        ledger_service::api::credit_type_routes::CreateCreditTypeRequest,
        ledger_service::api::credit_type_routes::UpdateCreditTypeRequest,
        ledger_service::api::transaction_routes::TransactionRequestDto
    ))
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Cargar variables de entorno
    dotenv().ok();

    // 2. Configurar Logging/Tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting Credit Ledger Service...");

    // 3. Configurar Conexión a Base de Datos
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    info!("Connected to Database");

    // 4. Instanciar Dependencias (Infraestructura)
    let wallet_repo = Arc::new(PostgresWalletRepository::new(pool.clone()));
    let credit_type_repo = Arc::new(PostgresCreditTypeRepository::new(pool.clone()));
    let transaction_repo = Arc::new(PostgresTransactionRepository::new(pool.clone()));
    let lock_manager = KeyedLockManager::new();

    // 5. Instanciar Casos de Uso
    let create_wallet_use_case = CreateWalletUseCase::new(wallet_repo.clone());
    let get_wallet_use_case = GetWalletUseCase::new(wallet_repo.clone());
    let list_wallets_use_case = ListWalletsUseCase::new(wallet_repo.clone());
    let update_wallet_use_case = UpdateWalletUseCase::new(wallet_repo.clone());
    let delete_wallet_use_case = DeleteWalletUseCase::new(wallet_repo.clone());
    let create_credit_type_use_case = CreateCreditTypeUseCase::new(credit_type_repo.clone());
    let get_credit_type_use_case = GetCreditTypeUseCase::new(credit_type_repo.clone());
    let list_credit_types_use_case = ListCreditTypesUseCase::new(credit_type_repo.clone());
    let update_credit_type_use_case = UpdateCreditTypeUseCase::new(credit_type_repo.clone());
    let delete_credit_type_use_case = DeleteCreditTypeUseCase::new(credit_type_repo.clone());
    let process_transaction_use_case = ProcessTransactionUseCase::new(
        pool.clone(),
        wallet_repo.clone(),
        transaction_repo.clone(),
        lock_manager.clone(),
    );
    let get_transaction_use_case = GetTransactionUseCase::new(transaction_repo.clone());
    let list_transactions_use_case = ListTransactionsUseCase::new(transaction_repo.clone());

    // 6. Configurar Estado de la App Axum
    let app_state = Arc::new(AppState {
        create_wallet_use_case,
        get_wallet_use_case,
        list_wallets_use_case,
        update_wallet_use_case,
        delete_wallet_use_case,
        create_credit_type_use_case,
        get_credit_type_use_case,
        list_credit_types_use_case,
        update_credit_type_use_case,
        delete_credit_type_use_case,
        process_transaction_use_case,
        get_transaction_use_case,
        list_transactions_use_case,
    });

    // 7. Configurar Rutas y Servidor
    let app = routes(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
