use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, RegisterRequest, TokenResponse},
        categories::{CategoryList, CreateCategoryRequest, UpdateCategoryRequest},
        movements::{CreateMovementRequest, MovementList},
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        sales::{SaleLineRequest, SaleList, SaleRequest, SaleWithLines},
    },
    models::{Category, Movement, Product, Sale, SaleLine},
    response::{ApiResponse, Meta},
    routes::{auth, categories, health, movements, products as product_routes, sales},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("Token")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::logout,
        categories::list_categories,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        product_routes::list_products,
        product_routes::get_product,
        product_routes::create_product,
        product_routes::update_product,
        product_routes::delete_product,
        movements::list_movements,
        movements::create_movement,
        movements::delete_movement,
        sales::process_sale,
        sales::sale_history
    ),
    components(
        schemas(
            Category,
            Product,
            Movement,
            Sale,
            SaleLine,
            RegisterRequest,
            LoginRequest,
            TokenResponse,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            CategoryList,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            CreateMovementRequest,
            MovementList,
            SaleRequest,
            SaleLineRequest,
            SaleWithLines,
            SaleList,
            Meta,
            ApiResponse<TokenResponse>,
            ApiResponse<Category>,
            ApiResponse<Product>,
            ApiResponse<Movement>,
            ApiResponse<SaleWithLines>,
            ApiResponse<SaleList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and logout"),
        (name = "Categories", description = "Income/expense categories"),
        (name = "Products", description = "Product catalog"),
        (name = "Movements", description = "Manual income/expense log"),
        (name = "Sales", description = "Point-of-sale transactions"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
