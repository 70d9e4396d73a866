//! SQL for each report.
//!
//! Money and date columns are cast explicitly so decoding depends on the
//! stored value, not on the declared column affinity (`DECIMAL(10,2)` values
//! may be stored as integers).

use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;

use storefront_core::{OrderId, ReportResult, RevenuePolicy, RevenueScope};

use super::models::{
    CategorySales, CustomerRow, MonthlySales, OrderDetail, OrderItemRow, OrderRow, ProductRow,
    Stats, StatusCount, TopProduct,
};
use crate::read_model::store_error;

const COUNT_CUSTOMERS: &str = "SELECT COUNT(*) FROM Cliente";
const COUNT_PRODUCTS: &str = "SELECT COUNT(*) FROM Produto";
const COUNT_ORDERS: &str = "SELECT COUNT(*) FROM Pedido";
const COUNT_SUPPLIERS: &str = "SELECT COUNT(*) FROM Fornecedor";

// TOTAL() yields 0.0 on an empty set, where SUM() would yield NULL.
const REVENUE_DELIVERED: &str = "SELECT TOTAL(total) FROM Pedido WHERE status = ?1";
const REVENUE_ALL: &str = "SELECT TOTAL(total) FROM Pedido";

const ORDERS_BY_STATUS: &str = r#"
    SELECT status, COUNT(*) AS count
    FROM Pedido
    GROUP BY status
    ORDER BY status
"#;

const PRODUCTS: &str = r#"
    SELECT p.id, p.nome, p.descricao,
           CAST(p.preco AS REAL) AS preco,
           p.estoque,
           c.nome AS categoria,
           f.nome AS fornecedor
    FROM Produto p
    JOIN Categoria c ON p.categoria_id = c.id
    JOIN Fornecedor f ON p.fornecedor_id = f.id
    ORDER BY p.nome
"#;

const CUSTOMERS: &str = r#"
    SELECT c.id, c.nome, c.email, c.telefone,
           CAST(c.data_cadastro AS TEXT) AS data_cadastro,
           c.tipo,
           e.rua, e.cidade, e.estado, e.cep
    FROM Cliente c
    LEFT JOIN Endereco e ON c.id = e.cliente_id
    ORDER BY c.nome
"#;

const ORDERS: &str = r#"
    SELECT p.id,
           CAST(p.data_pedido AS TEXT) AS data_pedido,
           CAST(p.total AS REAL) AS total,
           p.status,
           c.nome AS cliente_nome,
           c.email AS cliente_email
    FROM Pedido p
    JOIN Cliente c ON p.cliente_id = c.id
    ORDER BY p.data_pedido DESC
"#;

const ORDER_BY_ID: &str = r#"
    SELECT p.id,
           CAST(p.data_pedido AS TEXT) AS data_pedido,
           CAST(p.total AS REAL) AS total,
           p.status,
           c.nome AS cliente_nome,
           c.email AS cliente_email
    FROM Pedido p
    JOIN Cliente c ON p.cliente_id = c.id
    WHERE p.id = ?1
"#;

const ORDER_ITEMS: &str = r#"
    SELECT ip.quantidade,
           CAST(ip.preco_unitario AS REAL) AS preco_unitario,
           CAST(ip.subtotal AS REAL) AS subtotal,
           pr.nome AS produto_nome,
           pr.descricao AS produto_descricao
    FROM ItemPedido ip
    JOIN Produto pr ON ip.produto_id = pr.id
    WHERE ip.pedido_id = ?1
"#;

const SALES_BY_CATEGORY: &str = r#"
    SELECT c.nome AS categoria,
           COUNT(ip.id) AS total_itens,
           SUM(ip.quantidade) AS quantidade_vendida,
           ROUND(SUM(ip.subtotal), 2) AS receita
    FROM Categoria c
    JOIN Produto p ON c.id = p.categoria_id
    JOIN ItemPedido ip ON p.id = ip.produto_id
    JOIN Pedido ped ON ip.pedido_id = ped.id
    WHERE ped.status = ?1
    GROUP BY c.id, c.nome
    ORDER BY receita DESC
"#;

/// Maximum number of entries in the top-selling report.
pub const TOP_PRODUCTS_LIMIT: i64 = 10;

const TOP_PRODUCTS: &str = r#"
    SELECT p.nome,
           CAST(p.preco AS REAL) AS preco,
           SUM(ip.quantidade) AS total_vendido,
           ROUND(SUM(ip.subtotal), 2) AS receita_total
    FROM Produto p
    JOIN ItemPedido ip ON p.id = ip.produto_id
    JOIN Pedido ped ON ip.pedido_id = ped.id
    WHERE ped.status = ?1
    GROUP BY p.id, p.nome, p.preco
    ORDER BY total_vendido DESC
    LIMIT ?2
"#;

const MONTHLY_SALES: &str = r#"
    SELECT strftime('%Y-%m', data_pedido) AS mes,
           COUNT(*) AS total_pedidos,
           ROUND(SUM(total), 2) AS receita_total
    FROM Pedido
    WHERE status = ?1
    GROUP BY strftime('%Y-%m', data_pedido)
    ORDER BY mes
"#;

async fn count(conn: &mut SqliteConnection, sql: &'static str) -> ReportResult<i64> {
    sqlx::query_scalar::<_, i64>(sql)
        .fetch_one(conn)
        .await
        .map_err(store_error)
}

/// Counters, revenue and status breakdown, read inside one transaction so the
/// figures describe the same snapshot.
pub async fn stats(conn: &mut SqliteConnection, policy: &RevenuePolicy) -> ReportResult<Stats> {
    let mut tx = conn.begin().await.map_err(store_error)?;

    let total_clientes = count(&mut *tx, COUNT_CUSTOMERS).await?;
    let total_produtos = count(&mut *tx, COUNT_PRODUCTS).await?;
    let total_pedidos = count(&mut *tx, COUNT_ORDERS).await?;
    let total_fornecedores = count(&mut *tx, COUNT_SUPPLIERS).await?;

    let receita_total = match policy.stats_scope() {
        RevenueScope::Delivered => {
            sqlx::query_scalar::<_, f64>(REVENUE_DELIVERED)
                .bind(policy.delivered_status())
                .fetch_one(&mut *tx)
                .await
        }
        RevenueScope::All => {
            sqlx::query_scalar::<_, f64>(REVENUE_ALL)
                .fetch_one(&mut *tx)
                .await
        }
    }
    .map_err(store_error)?;

    let pedidos_por_status = sqlx::query_as::<_, StatusCount>(ORDERS_BY_STATUS)
        .fetch_all(&mut *tx)
        .await
        .map_err(store_error)?;

    tx.commit().await.map_err(store_error)?;

    Ok(Stats {
        total_clientes,
        total_produtos,
        total_pedidos,
        total_fornecedores,
        receita_total,
        pedidos_por_status,
    })
}

pub async fn products(conn: &mut SqliteConnection) -> ReportResult<Vec<ProductRow>> {
    sqlx::query_as::<_, ProductRow>(PRODUCTS)
        .fetch_all(conn)
        .await
        .map_err(store_error)
}

pub async fn customers(conn: &mut SqliteConnection) -> ReportResult<Vec<CustomerRow>> {
    sqlx::query_as::<_, CustomerRow>(CUSTOMERS)
        .fetch_all(conn)
        .await
        .map_err(store_error)
}

pub async fn orders(conn: &mut SqliteConnection) -> ReportResult<Vec<OrderRow>> {
    sqlx::query_as::<_, OrderRow>(ORDERS)
        .fetch_all(conn)
        .await
        .map_err(store_error)
}

/// Order header and lines; `Ok(None)` when no order has this id.
pub async fn order_detail(
    conn: &mut SqliteConnection,
    order_id: OrderId,
) -> ReportResult<Option<OrderDetail>> {
    let order = sqlx::query_as::<_, OrderRow>(ORDER_BY_ID)
        .bind(order_id.get())
        .fetch_optional(&mut *conn)
        .await
        .map_err(store_error)?;

    let Some(order) = order else {
        return Ok(None);
    };

    let itens = sqlx::query_as::<_, OrderItemRow>(ORDER_ITEMS)
        .bind(order_id.get())
        .fetch_all(&mut *conn)
        .await
        .map_err(store_error)?;

    Ok(Some(OrderDetail { order, itens }))
}

pub async fn sales_by_category(
    conn: &mut SqliteConnection,
    policy: &RevenuePolicy,
) -> ReportResult<Vec<CategorySales>> {
    sqlx::query_as::<_, CategorySales>(SALES_BY_CATEGORY)
        .bind(policy.delivered_status())
        .fetch_all(conn)
        .await
        .map_err(store_error)
}

pub async fn top_products(
    conn: &mut SqliteConnection,
    policy: &RevenuePolicy,
) -> ReportResult<Vec<TopProduct>> {
    sqlx::query_as::<_, TopProduct>(TOP_PRODUCTS)
        .bind(policy.delivered_status())
        .bind(TOP_PRODUCTS_LIMIT)
        .fetch_all(conn)
        .await
        .map_err(store_error)
}

pub async fn monthly_sales(
    conn: &mut SqliteConnection,
    policy: &RevenuePolicy,
) -> ReportResult<Vec<MonthlySales>> {
    sqlx::query_as::<_, MonthlySales>(MONTHLY_SALES)
        .bind(policy.delivered_status())
        .fetch_all(conn)
        .await
        .map_err(store_error)
}
