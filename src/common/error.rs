use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Token de sessão inválido")]
    InvalidToken,

    // Nenhum vendedor pôde ser sincronizado: as fontes estão fora do ar.
    // Falhas parciais NÃO chegam aqui; viram avisos no ResultadoSync.
    #[error("Fontes de dados indisponíveis")]
    SourceUnavailable,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Token de sessão inválido ou ausente.")
            }
            // 503 e não 500: a consulta é válida, as fontes é que não respondem.
            // O front usa essa distinção para mostrar "servidor offline" em vez
            // de "nenhuma venda encontrada".
            AppError::SourceUnavailable => {
                tracing::error!("Ciclo de sincronização sem nenhum vendedor disponível");
                (StatusCode::SERVICE_UNAVAILABLE, "Fontes de dados indisponíveis. Tente novamente.")
            }

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
