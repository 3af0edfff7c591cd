use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
    pub service: String,
}

#[derive(ToSchema)]
pub struct UserDoc {
    pub id: u64,
    pub name: String,
    pub email: String,
}

#[derive(ToSchema)]
pub struct UserListDoc {
    pub users: Vec<UserDoc>,
    pub total: usize,
}

#[derive(ToSchema)]
pub struct CreateUserRequestDoc {
    pub name: String,
    pub email: String,
}

#[derive(ToSchema)]
pub struct UpdateUserRequestDoc {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(ToSchema)]
pub struct MessageDoc {
    pub message: String,
}

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::create_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
    ),
    components(
        schemas(
            HealthResponse,
            UserDoc,
            UserListDoc,
            CreateUserRequestDoc,
            UpdateUserRequestDoc,
            MessageDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "users")
    )
)]
pub struct ApiDoc;
