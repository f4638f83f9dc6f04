use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mensaje entre dos usuarios. Solo se añaden, nunca se modifican.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub remitente_id: String,
    pub destinatario_id: String,
    pub contenido: String,
    pub fecha_envio: DateTime<Utc>,
    pub conversacion_id: String,
}

/// Identificador de conversación: los dos UIDs ordenados y unidos por `_`.
/// Es simétrico: `conversation_id(a, b) == conversation_id(b, a)`.
pub fn conversation_id(uid_a: &str, uid_b: &str) -> String {
    if uid_a <= uid_b {
        format!("{}_{}", uid_a, uid_b)
    } else {
        format!("{}_{}", uid_b, uid_a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_id_is_symmetric() {
        let pairs = [("c1", "w1"), ("zeta", "alfa"), ("A", "a"), ("u_1", "u_10")];
        for (a, b) in pairs {
            assert_eq!(conversation_id(a, b), conversation_id(b, a));
        }
    }

    #[test]
    fn test_conversation_id_sorts_lexicographically() {
        assert_eq!(conversation_id("worker", "client"), "client_worker");
    }
}
