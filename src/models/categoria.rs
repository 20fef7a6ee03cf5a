// src/models/categoria.rs
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Categoria {
    pub id: String,
    pub nome: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subcategoria {
    pub id: String,
    pub nome: String,
    pub categoria_id: String,
}
