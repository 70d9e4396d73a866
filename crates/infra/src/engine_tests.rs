//! End-to-end tests for the report engine against real SQLite files.
//!
//! Verifies:
//! - Counters and revenue match the seeded rows
//! - Sales breakdowns only count delivered orders
//! - Order detail distinguishes missing orders from store failures

use std::sync::{Arc, Mutex};

use storefront_core::{OrderId, ReportError, RevenuePolicy, RevenueScope};

use crate::fixtures::FixtureStore;
use crate::read_model::SqliteStore;
use crate::reports::{ReportEngine, TOP_PRODUCTS_LIMIT};

fn engine_for(fixture: &FixtureStore) -> ReportEngine {
    ReportEngine::new(SqliteStore::new(fixture.path()), RevenuePolicy::default())
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[tokio::test]
async fn stats_counts_rows_and_delivered_revenue() {
    let fixture = FixtureStore::demo().await;
    let stats = engine_for(&fixture).stats().await.unwrap();

    assert_eq!(stats.total_clientes, 3);
    assert_eq!(stats.total_produtos, 4);
    assert_eq!(stats.total_pedidos, 5);
    assert_eq!(stats.total_fornecedores, 2);
    assert_close(stats.receita_total, 3981.50);

    let by_status: Vec<(&str, i64)> = stats
        .pedidos_por_status
        .iter()
        .map(|s| (s.status.as_deref().unwrap(), s.count))
        .collect();
    assert_eq!(by_status, vec![("Cancelado", 1), ("Entregue", 3), ("Enviado", 1)]);
}

#[tokio::test]
async fn stats_revenue_scope_all_sums_every_order() {
    let fixture = FixtureStore::demo().await;
    let engine = ReportEngine::new(
        SqliteStore::new(fixture.path()),
        RevenuePolicy::new("Entregue", RevenueScope::All),
    );

    let stats = engine.stats().await.unwrap();
    assert_close(stats.receita_total, 4119.20);
}

#[tokio::test]
async fn stats_revenue_is_zero_without_delivered_orders() {
    let fixture = FixtureStore::empty().await;
    fixture
        .execute("INSERT INTO Cliente (id, nome, email, tipo) VALUES (1, 'Ana', 'ana@example.com', 'PF');")
        .await;

    let stats = engine_for(&fixture).stats().await.unwrap();
    assert_eq!(stats.total_clientes, 1);
    assert_eq!(stats.total_pedidos, 0);
    assert_eq!(stats.receita_total, 0.0);
    assert!(stats.pedidos_por_status.is_empty());
}

#[tokio::test]
async fn custom_delivered_status_drives_revenue() {
    let fixture = FixtureStore::demo().await;
    let engine = ReportEngine::new(
        SqliteStore::new(fixture.path()),
        RevenuePolicy::new("Enviado", RevenueScope::Delivered),
    );

    let stats = engine.stats().await.unwrap();
    assert_close(stats.receita_total, 91.80);

    let monthly = engine.monthly_sales().await.unwrap();
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0].mes.as_deref(), Some("2024-04"));
}

#[tokio::test]
async fn products_are_joined_and_sorted_by_name() {
    let fixture = FixtureStore::demo().await;
    let products = engine_for(&fixture).products().await.unwrap();

    let names: Vec<&str> = products.iter().map(|p| p.nome.as_str()).collect();
    assert_eq!(names, vec!["Luminária", "Mouse", "Notebook", "Romance"]);

    let mouse = &products[1];
    assert_eq!(mouse.categoria, "Eletrônicos");
    assert_eq!(mouse.fornecedor, "TechDistribuidora");
    assert_eq!(mouse.estoque, 5);
    assert_close(mouse.preco, 80.50);

    // DECIMAL affinity stores 3500.00 as an integer; it still reads as REAL.
    assert_close(products[2].preco, 3500.0);
    assert_eq!(products[3].descricao, None);
}

#[tokio::test]
async fn customers_keep_rows_without_address() {
    let fixture = FixtureStore::demo().await;
    let customers = engine_for(&fixture).customers().await.unwrap();

    let names: Vec<&str> = customers.iter().map(|c| c.nome.as_str()).collect();
    assert_eq!(names, vec!["Ana Lima", "Beta Comércio Ltda", "Carlos Souza"]);

    let ana = &customers[0];
    assert_eq!(ana.cidade, None);
    assert_eq!(ana.rua, None);
    assert_eq!(ana.telefone, None);

    let beta = &customers[1];
    assert_eq!(beta.tipo.as_deref(), Some("PJ"));
    assert_eq!(beta.cidade.as_deref(), Some("Curitiba"));
    assert_eq!(beta.data_cadastro.as_deref(), Some("2023-06-15"));
}

#[tokio::test]
async fn orders_are_newest_first_with_customer() {
    let fixture = FixtureStore::demo().await;
    let orders = engine_for(&fixture).orders().await.unwrap();

    let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![5, 4, 3, 2, 1]);
    assert_eq!(orders[0].cliente_nome, "Ana Lima");
    assert_eq!(orders[0].cliente_email, "ana@example.com");
    assert_close(orders[1].total, 240.0);
}

#[tokio::test]
async fn order_detail_embeds_every_item() {
    let fixture = FixtureStore::demo().await;
    let engine = engine_for(&fixture);

    for (id, expected_items) in [(1, 2), (2, 1), (3, 1), (4, 1), (5, 1)] {
        let detail = engine.order_detail(OrderId::new(id)).await.unwrap();
        assert_eq!(detail.order.id, id);
        assert_eq!(detail.itens.len(), expected_items, "order {id}");
    }

    let first = engine.order_detail(OrderId::new(1)).await.unwrap();
    assert_eq!(first.order.cliente_nome, "Carlos Souza");
    assert_eq!(first.order.status.as_deref(), Some("Entregue"));
    let notebook = &first.itens[0];
    assert_eq!(notebook.produto_nome, "Notebook");
    assert_eq!(notebook.quantidade, 1);
    assert_close(notebook.subtotal, 3500.0);
}

#[tokio::test]
async fn order_detail_serializes_flat_with_items() {
    let fixture = FixtureStore::demo().await;
    let detail = engine_for(&fixture)
        .order_detail(OrderId::new(2))
        .await
        .unwrap();

    let json = serde_json::to_value(&detail).unwrap();
    assert_eq!(json["id"], 2);
    assert_eq!(json["cliente_nome"], "Beta Comércio Ltda");
    assert_eq!(json["itens"].as_array().unwrap().len(), 1);
    assert_eq!(json["itens"][0]["produto_nome"], "Mouse");
}

#[tokio::test]
async fn order_detail_missing_is_not_found() {
    let fixture = FixtureStore::demo().await;
    let err = engine_for(&fixture)
        .order_detail(OrderId::new(999))
        .await
        .unwrap_err();
    assert_eq!(err, ReportError::NotFound);
}

#[tokio::test]
async fn sales_by_category_counts_delivered_only() {
    let fixture = FixtureStore::demo().await;
    let sales = engine_for(&fixture).sales_by_category().await.unwrap();

    assert_eq!(sales.len(), 2, "Livros only has undelivered sales");

    assert_eq!(sales[0].categoria, "Eletrônicos");
    assert_eq!(sales[0].total_itens, 3);
    assert_eq!(sales[0].quantidade_vendida, 4);
    assert_close(sales[0].receita, 3741.50);

    assert_eq!(sales[1].categoria, "Casa");
    assert_eq!(sales[1].total_itens, 1);
    assert_eq!(sales[1].quantidade_vendida, 2);
    assert_close(sales[1].receita, 240.0);
}

#[tokio::test]
async fn sales_by_category_rounds_revenue_to_cents() {
    let fixture = FixtureStore::empty().await;
    fixture
        .execute(
            r#"
            INSERT INTO Categoria (id, nome) VALUES (1, 'Miudezas');
            INSERT INTO Fornecedor (id, nome) VALUES (1, 'Atacado');
            INSERT INTO Produto (id, nome, preco, categoria_id, fornecedor_id) VALUES (1, 'Clipe', 0.1, 1, 1);
            INSERT INTO Cliente (id, nome, email) VALUES (1, 'Ana', 'ana@example.com');
            INSERT INTO Pedido (id, cliente_id, data_pedido, total, status) VALUES
                (1, 1, '2024-03-01', 0.1, 'Entregue'),
                (2, 1, '2024-03-02', 0.2, 'Entregue');
            INSERT INTO ItemPedido (pedido_id, produto_id, quantidade, preco_unitario, subtotal) VALUES
                (1, 1, 1, 0.1, 0.1),
                (2, 1, 2, 0.1, 0.2);
            "#,
        )
        .await;

    let sales = engine_for(&fixture).sales_by_category().await.unwrap();
    assert_eq!(sales.len(), 1);
    // 0.1 + 0.2 is 0.30000000000000004 before rounding.
    assert_eq!(sales[0].receita, 0.3);
}

#[tokio::test]
async fn top_products_sorted_by_quantity() {
    let fixture = FixtureStore::demo().await;
    let top = engine_for(&fixture).top_products().await.unwrap();

    let ranking: Vec<(&str, i64)> = top
        .iter()
        .map(|p| (p.nome.as_str(), p.total_vendido))
        .collect();
    assert_eq!(ranking, vec![("Mouse", 3), ("Luminária", 2), ("Notebook", 1)]);
    assert_close(top[0].receita_total, 241.50);
}

#[tokio::test]
async fn top_products_is_capped() {
    let fixture = FixtureStore::empty().await;
    let mut sql = String::from(
        "INSERT INTO Categoria (id, nome) VALUES (1, 'Geral');
         INSERT INTO Fornecedor (id, nome) VALUES (1, 'Atacado');
         INSERT INTO Cliente (id, nome, email) VALUES (1, 'Ana', 'ana@example.com');
         INSERT INTO Pedido (id, cliente_id, data_pedido, total, status) VALUES (1, 1, '2024-01-01', 0, 'Entregue');",
    );
    for id in 1..=12 {
        sql.push_str(&format!(
            "INSERT INTO Produto (id, nome, preco, categoria_id, fornecedor_id) VALUES ({id}, 'Produto {id:02}', 1.0, 1, 1);
             INSERT INTO ItemPedido (pedido_id, produto_id, quantidade, preco_unitario, subtotal) VALUES (1, {id}, {id}, 1.0, {id}.0);"
        ));
    }
    fixture.execute(&sql).await;

    let top = engine_for(&fixture).top_products().await.unwrap();
    assert_eq!(top.len(), TOP_PRODUCTS_LIMIT as usize);
    assert_eq!(top[0].nome, "Produto 12");
    assert!(top.windows(2).all(|w| w[0].total_vendido >= w[1].total_vendido));
}

#[tokio::test]
async fn monthly_sales_groups_delivered_orders_by_month() {
    let fixture = FixtureStore::demo().await;
    let monthly = engine_for(&fixture).monthly_sales().await.unwrap();

    let months: Vec<(&str, i64)> = monthly
        .iter()
        .map(|m| (m.mes.as_deref().unwrap(), m.total_pedidos))
        .collect();
    assert_eq!(months, vec![("2024-03", 2), ("2024-04", 1)]);
    assert_close(monthly[0].receita_total, 3741.50);
    assert_close(monthly[1].receita_total, 240.0);
}

#[tokio::test]
async fn monthly_sales_sums_to_cents() {
    let fixture = FixtureStore::empty().await;
    fixture
        .execute(
            r#"
            INSERT INTO Cliente (id, nome, email) VALUES (1, 'Ana', 'ana@example.com');
            INSERT INTO Pedido (id, cliente_id, data_pedido, total, status) VALUES
                (1, 1, '2024-03-02 08:00:00', 10.00, 'Entregue'),
                (2, 1, '2024-03-28 19:30:00', 15.50, 'Entregue');
            "#,
        )
        .await;

    let monthly = engine_for(&fixture).monthly_sales().await.unwrap();
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0].mes.as_deref(), Some("2024-03"));
    assert_eq!(monthly[0].total_pedidos, 2);
    assert_eq!(monthly[0].receita_total, 25.5);
}

#[tokio::test]
async fn unparseable_dates_surface_as_null() {
    let fixture = FixtureStore::empty().await;
    fixture
        .execute(
            r#"
            INSERT INTO Cliente (id, nome, email) VALUES (1, 'Ana', 'ana@example.com');
            INSERT INTO Pedido (id, cliente_id, data_pedido, total, status) VALUES
                (1, 1, 'ontem', 12.00, 'Entregue'),
                (2, 1, '2024-03-02 08:00:00', 10.00, 'Entregue');
            "#,
        )
        .await;
    let engine = engine_for(&fixture);

    let monthly = engine.monthly_sales().await.unwrap();
    let months: Vec<Option<&str>> = monthly.iter().map(|m| m.mes.as_deref()).collect();
    assert_eq!(months, vec![None, Some("2024-03")]);

    let json = serde_json::to_value(&monthly[0]).unwrap();
    assert!(json["mes"].is_null(), "{json}");
    assert_eq!(json["total_pedidos"], 1);

    let orders = engine.orders().await.unwrap();
    assert!(orders.iter().any(|o| o.data_pedido.as_deref() == Some("ontem")));
}

/// Log sink shared between the subscriber and the test body.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn missing_store_is_store_unavailable() {
    let logs = CapturedLogs::default();
    let sink = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || sink.clone())
        .with_max_level(tracing::Level::ERROR)
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let fixture = FixtureStore::demo().await;
    let engine = ReportEngine::new(
        SqliteStore::new(fixture.path().with_file_name("gone.db")),
        RevenuePolicy::default(),
    );

    assert!(matches!(engine.stats().await, Err(ReportError::StoreUnavailable(_))));
    assert!(matches!(
        engine.order_detail(OrderId::new(1)).await,
        Err(ReportError::StoreUnavailable(_))
    ));

    // A connection that never opens is still reported once per call.
    let logged = logs.text();
    assert_eq!(logged.matches("report failed").count(), 2, "{logged}");
    assert!(logged.contains("report=\"stats\""), "{logged}");
    assert!(logged.contains("report=\"order_detail\""), "{logged}");
}

#[tokio::test]
async fn schema_mismatch_is_store_unavailable() {
    let fixture = FixtureStore::demo().await;
    fixture.execute("DROP TABLE ItemPedido;").await;

    let engine = engine_for(&fixture);
    assert!(matches!(
        engine.top_products().await,
        Err(ReportError::StoreUnavailable(_))
    ));
    // Reports that do not touch the dropped table keep working.
    assert_eq!(engine.orders().await.unwrap().len(), 5);
}
