//! Result records, one per report.
//!
//! Field names are the JSON keys the dashboard reads, so they follow the
//! store's (Portuguese) column naming rather than Rust conventions.

use serde::Serialize;
use sqlx::FromRow;

/// Order count for one status value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct StatusCount {
    pub status: Option<String>,
    pub count: i64,
}

/// Store-wide counters and revenue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total_clientes: i64,
    pub total_produtos: i64,
    pub total_pedidos: i64,
    pub total_fornecedores: i64,
    pub receita_total: f64,
    pub pedidos_por_status: Vec<StatusCount>,
}

/// Catalog entry joined to its category and supplier names.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub preco: f64,
    pub estoque: i64,
    pub categoria: String,
    pub fornecedor: String,
}

/// Customer with its address, if it has one.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct CustomerRow {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub telefone: Option<String>,
    pub data_cadastro: Option<String>,
    pub tipo: Option<String>,
    pub rua: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub cep: Option<String>,
}

/// Order summary joined to its customer.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct OrderRow {
    pub id: i64,
    pub data_pedido: Option<String>,
    pub total: f64,
    pub status: Option<String>,
    pub cliente_nome: String,
    pub cliente_email: String,
}

/// One line of an order joined to its product.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct OrderItemRow {
    pub quantidade: i64,
    pub preco_unitario: f64,
    pub subtotal: f64,
    pub produto_nome: String,
    pub produto_descricao: Option<String>,
}

/// Order summary plus its lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: OrderRow,
    pub itens: Vec<OrderItemRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct CategorySales {
    pub categoria: String,
    pub total_itens: i64,
    pub quantidade_vendida: i64,
    pub receita: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct TopProduct {
    pub nome: String,
    pub preco: f64,
    pub total_vendido: i64,
    pub receita_total: f64,
}

/// Delivered sales for one calendar month (`YYYY-MM`).
///
/// `mes` is `None` for orders whose date SQLite cannot parse.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct MonthlySales {
    pub mes: Option<String>,
    pub total_pedidos: i64,
    pub receita_total: f64,
}
