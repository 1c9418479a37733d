// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::{common::error::AppError, config::AppState};

/// Claims do token de sessão emitido pelo portal. O serviço não emite nem
/// renova sessões: só verifica assinatura e validade com o segredo
/// compartilhado.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessaoPortal {
    pub sub: String,
    pub exp: usize,
}

// O middleware em si: exige o header X-Session-Token em toda rota protegida.
pub async fn session_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get("X-Session-Token")
        .and_then(|value| value.to_str().ok());

    if let Some(token) = token {
        let sessao = validar_token(token, &app_state.jwt_secret)?;

        // Insere a sessão nos "extensions" da requisição
        request.extensions_mut().insert(sessao);
        return Ok(next.run(request).await);
    }

    Err(AppError::InvalidToken)
}

fn validar_token(token: &str, segredo: &str) -> Result<SessaoPortal, AppError> {
    decode::<SessaoPortal>(
        token,
        &DecodingKey::from_secret(segredo.as_bytes()),
        &Validation::default(),
    )
    .map(|dados| dados.claims)
    .map_err(|_| AppError::InvalidToken)
}

// Extrator para obter a sessão validada diretamente nos handlers
pub struct SessaoAutenticada(pub SessaoPortal);

impl<S> FromRequestParts<S> for SessaoAutenticada
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessaoPortal>()
            .cloned()
            .map(SessaoAutenticada)
            .ok_or(AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token_com_exp(exp: usize, segredo: &str) -> String {
        let claims = SessaoPortal { sub: "portal".into(), exp };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(segredo.as_bytes())).unwrap()
    }

    fn daqui_a_uma_hora() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn aceita_token_valido_assinado_com_o_segredo() {
        let token = token_com_exp(daqui_a_uma_hora(), "segredo");
        let sessao = validar_token(&token, "segredo").unwrap();
        assert_eq!(sessao.sub, "portal");
    }

    #[test]
    fn rejeita_token_assinado_com_outro_segredo() {
        let token = token_com_exp(daqui_a_uma_hora(), "outro");
        assert!(matches!(validar_token(&token, "segredo"), Err(AppError::InvalidToken)));
    }

    #[test]
    fn rejeita_lixo_que_nao_e_jwt() {
        assert!(matches!(validar_token("dev-mode", "segredo"), Err(AppError::InvalidToken)));
    }
}
