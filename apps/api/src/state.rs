use storefront_application::CatalogService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: CatalogService,
}

impl AppState {
    pub fn new(catalog_service: CatalogService) -> Self {
        Self { catalog_service }
    }
}
