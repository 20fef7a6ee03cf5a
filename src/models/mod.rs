// src/models/mod.rs
pub mod candidatura;
pub mod categoria;
pub mod limite;
pub mod usuario;
pub mod vaga;

use chrono::NaiveDateTime;

/// Decide se um destaque comprado ainda está em vigor.
/// O destaque é tratado como valor derivado: a flag só vale enquanto
/// `expira_em` (formato datetime() do SQLite, UTC) não tiver passado.
pub fn destaque_vigente(destaque: bool, expira_em: Option<&str>, agora: NaiveDateTime) -> bool {
    if !destaque {
        return false;
    }
    match expira_em.and_then(|s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok()) {
        Some(expira) => agora < expira,
        None => false,
    }
}
