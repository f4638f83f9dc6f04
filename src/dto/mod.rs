pub mod admin_dto;
pub mod anuncio_dto;
pub mod evaluacion_dto;
pub mod mensaje_dto;
pub mod solicitud_dto;
pub mod usuario_dto;

use std::borrow::Cow;
use validator::ValidationError;

/// Rechaza textos vacíos o formados solo por espacios
pub(crate) fn validar_no_vacio(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("no_vacio");
        error.message = Some(Cow::from("El campo no puede estar vacío"));
        return Err(error);
    }
    Ok(())
}
