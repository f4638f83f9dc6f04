pub mod admin_routes;
pub mod anuncio_routes;
pub mod evaluacion_routes;
pub mod health_routes;
pub mod mensaje_routes;
pub mod solicitud_routes;
pub mod usuario_routes;
