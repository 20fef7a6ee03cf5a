// src/services/categoria_service.rs
use crate::{
    error::AppResult,
    models::categoria::{Categoria, Subcategoria},
};
use sqlx::SqlitePool;

pub async fn listar_categorias(db_pool: &SqlitePool) -> AppResult<Vec<Categoria>> {
    let categorias =
        sqlx::query_as::<_, Categoria>("SELECT id, nome FROM categorias ORDER BY nome ASC")
            .fetch_all(db_pool)
            .await?;
    Ok(categorias)
}

pub async fn listar_subcategorias(
    db_pool: &SqlitePool,
    categoria_id: Option<&str>,
) -> AppResult<Vec<Subcategoria>> {
    let subcategorias = match categoria_id {
        Some(categoria_id) => {
            sqlx::query_as::<_, Subcategoria>(
                r#"
                SELECT id, nome, categoria_id
                FROM subcategorias
                WHERE categoria_id = ?1
                ORDER BY nome ASC
                "#,
            )
            .bind(categoria_id)
            .fetch_all(db_pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Subcategoria>(
                "SELECT id, nome, categoria_id FROM subcategorias ORDER BY nome ASC",
            )
            .fetch_all(db_pool)
            .await?
        }
    };
    Ok(subcategorias)
}
