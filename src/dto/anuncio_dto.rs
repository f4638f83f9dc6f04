use serde::Deserialize;
use validator::Validate;

// Request para publicar un anuncio; el cliente es siempre quien llama
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdRequest {
    #[serde(default)]
    pub hogar: Vec<String>,
    #[serde(default)]
    pub personal: Vec<String>,
    #[serde(default)]
    pub acompanamiento: Vec<String>,
    #[serde(default)]
    pub salud: Vec<String>,
    #[validate(length(max = 2000, message = "Los comentarios no pueden superar los 2000 caracteres"))]
    pub comentarios: Option<String>,
}
