use axum_finanzas_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        categories::{CreateCategoryRequest, UpdateCategoryRequest},
        movements::CreateMovementRequest,
        products::CreateProductRequest,
    },
    entity::users::ActiveModel as UserActive,
    error::AppError,
    middleware::auth::AuthUser,
    services::{category_service, movement_service, product_service},
    state::AppState,
};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use uuid::Uuid;

// Owner-scoped CRUD across categories, products and the movement log.
#[tokio::test]
async fn catalog_and_movements_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    let ana_id = create_user(&state, "ana", "ana@example.com").await?;
    let beto_id = create_user(&state, "beto", "beto@example.com").await?;
    let ana = auth_for(ana_id, "ana");
    let beto = auth_for(beto_id, "beto");

    // Category kind is validated at the boundary.
    let err = category_service::create_category(
        &state,
        &ana,
        CreateCategoryRequest {
            name: "Ventas".into(),
            kind: "OTRO".into(),
        },
    )
    .await;
    assert!(matches!(err, Err(AppError::Validation(_))));

    let category = category_service::create_category(
        &state,
        &ana,
        CreateCategoryRequest {
            name: "Ventas".into(),
            kind: "INGRESO".into(),
        },
    )
    .await?
    .data
    .expect("category data");
    assert_eq!(category.user_id, ana_id);
    assert_eq!(category.kind, "INGRESO");

    // Listings never leak across owners.
    let ana_list = category_service::list_categories(&state, &ana)
        .await?
        .data
        .expect("list data");
    assert_eq!(ana_list.items.len(), 1);
    let beto_list = category_service::list_categories(&state, &beto)
        .await?
        .data
        .expect("list data");
    assert!(beto_list.items.is_empty());

    // Another user's row is forbidden; a missing row is not found.
    let err = category_service::update_category(
        &state,
        &beto,
        category.id,
        UpdateCategoryRequest {
            name: Some("Robo".into()),
            kind: None,
        },
    )
    .await;
    assert!(matches!(err, Err(AppError::Forbidden)));

    let err = category_service::update_category(
        &state,
        &ana,
        Uuid::new_v4(),
        UpdateCategoryRequest {
            name: Some("Nada".into()),
            kind: None,
        },
    )
    .await;
    assert!(matches!(err, Err(AppError::NotFound)));

    let renamed = category_service::update_category(
        &state,
        &ana,
        category.id,
        UpdateCategoryRequest {
            name: Some("Ventas mostrador".into()),
            kind: Some("GASTO".into()),
        },
    )
    .await?
    .data
    .expect("category data");
    assert_eq!(renamed.name, "Ventas mostrador");
    assert_eq!(renamed.kind, "GASTO");

    // Products: negative prices rejected, ownership enforced on detail ops.
    let err = product_service::create_product(
        &state,
        &ana,
        CreateProductRequest {
            name: "Error".into(),
            sale_price: Decimal::new(-100, 2),
            approx_cost: None,
        },
    )
    .await;
    assert!(matches!(err, Err(AppError::Validation(_))));

    let product = product_service::create_product(
        &state,
        &ana,
        CreateProductRequest {
            name: "Empanada".into(),
            sale_price: Decimal::new(1500, 2),
            approx_cost: None,
        },
    )
    .await?
    .data
    .expect("product data");
    assert_eq!(product.approx_cost, Decimal::ZERO);

    let err = product_service::get_product(&state, &beto, product.id).await;
    assert!(matches!(err, Err(AppError::Forbidden)));
    let err = product_service::delete_product(&state, &beto, product.id).await;
    assert!(matches!(err, Err(AppError::Forbidden)));

    // Movements: positive amounts only, categories resolved within the owner.
    let err = movement_service::create_movement(
        &state,
        &ana,
        CreateMovementRequest {
            amount: Decimal::ZERO,
            description: "Nada".into(),
            is_expense: None,
            category_id: None,
        },
    )
    .await;
    assert!(matches!(err, Err(AppError::Validation(_))));

    let err = movement_service::create_movement(
        &state,
        &beto,
        CreateMovementRequest {
            amount: Decimal::new(5000, 2),
            description: "Con categoria ajena".into(),
            is_expense: Some(true),
            category_id: Some(category.id),
        },
    )
    .await;
    assert!(matches!(err, Err(AppError::NotFound)));

    let rent = movement_service::create_movement(
        &state,
        &ana,
        CreateMovementRequest {
            amount: Decimal::new(80000, 2),
            description: "Renta local".into(),
            is_expense: Some(true),
            category_id: Some(category.id),
        },
    )
    .await?
    .data
    .expect("movement data");
    assert_eq!(rent.category_id, Some(category.id));
    assert!(rent.is_expense);

    let tip = movement_service::create_movement(
        &state,
        &ana,
        CreateMovementRequest {
            amount: Decimal::new(2500, 2),
            description: "Propina".into(),
            is_expense: Some(false),
            category_id: None,
        },
    )
    .await?
    .data
    .expect("movement data");

    // Newest first.
    let movements = movement_service::list_movements(&state, &ana)
        .await?
        .data
        .expect("movement list");
    assert_eq!(movements.items.len(), 2);
    assert_eq!(movements.items[0].id, tip.id);
    assert_eq!(movements.items[1].id, rent.id);

    // Deleting someone else's movement is a plain 404.
    let err = movement_service::delete_movement(&state, &beto, rent.id).await;
    assert!(matches!(err, Err(AppError::NotFound)));

    // Deleting the category detaches the movement instead of dropping it.
    category_service::delete_category(&state, &ana, category.id).await?;
    let movements = movement_service::list_movements(&state, &ana)
        .await?
        .data
        .expect("movement list");
    assert_eq!(movements.items.len(), 2);
    assert_eq!(movements.items[1].id, rent.id);
    assert_eq!(movements.items[1].category_id, None);

    movement_service::delete_movement(&state, &ana, tip.id).await?;
    let movements = movement_service::list_movements(&state, &ana)
        .await?
        .data
        .expect("movement list");
    assert_eq!(movements.items.len(), 1);

    // An unsold product deletes without protest.
    product_service::delete_product(&state, &ana, product.id).await?;
    let products = product_service::list_products(&state, &ana)
        .await?
        .data
        .expect("product list");
    assert!(products.items.is_empty());

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE sale_lines, sales, movements, products, categories, auth_tokens, audit_logs, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState { pool, orm })
}

async fn create_user(state: &AppState, username: &str, email: &str) -> anyhow::Result<Uuid> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        password_hash: Set("dummy".into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(user.id)
}

fn auth_for(user_id: Uuid, username: &str) -> AuthUser {
    AuthUser {
        user_id,
        username: username.to_string(),
        token: String::new(),
    }
}
