use utoipa::OpenApi;

use crate::web;

#[derive(OpenApi)]
#[openapi(
    info(title = "Users API", description = "CRUD over a single users table"),
    paths(web::home, web::health_check),
    components(schemas(web::HealthStatus)),
    tags((name = "service", description = "Host endpoints"))
)]
struct HostApiDoc;

/// Host endpoints merged with the documents of the mounted modules.
pub fn document(modules: impl IntoIterator<Item = utoipa::openapi::OpenApi>) -> utoipa::openapi::OpenApi {
    let mut doc = HostApiDoc::openapi();
    for module in modules {
        doc.merge(module);
    }
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    doc
}
