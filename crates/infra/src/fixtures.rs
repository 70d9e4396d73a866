//! Throwaway SQLite stores for tests.
//!
//! Enabled by the `fixtures` feature (and always in this crate's own tests).
//! Helpers here panic on failure; they are meant for test setup only.

use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tempfile::TempDir;

/// Schema of the external store, as the write side creates it.
pub const SCHEMA: &str = r#"
CREATE TABLE Cliente (
    id            INTEGER PRIMARY KEY,
    nome          VARCHAR(100) NOT NULL,
    email         VARCHAR(100) NOT NULL UNIQUE,
    telefone      VARCHAR(20),
    data_cadastro DATE DEFAULT CURRENT_DATE,
    tipo          VARCHAR(2) CHECK (tipo IN ('PF', 'PJ'))
);

CREATE TABLE Endereco (
    id         INTEGER PRIMARY KEY,
    cliente_id INTEGER NOT NULL UNIQUE REFERENCES Cliente(id),
    rua        VARCHAR(150),
    cidade     VARCHAR(80),
    estado     VARCHAR(2),
    cep        VARCHAR(10)
);

CREATE TABLE Fornecedor (
    id   INTEGER PRIMARY KEY,
    nome VARCHAR(100) NOT NULL
);

CREATE TABLE Categoria (
    id   INTEGER PRIMARY KEY,
    nome VARCHAR(60) NOT NULL
);

CREATE TABLE Produto (
    id            INTEGER PRIMARY KEY,
    nome          VARCHAR(100) NOT NULL,
    descricao     TEXT,
    preco         DECIMAL(10,2) NOT NULL,
    estoque       INTEGER NOT NULL DEFAULT 0,
    categoria_id  INTEGER NOT NULL REFERENCES Categoria(id),
    fornecedor_id INTEGER NOT NULL REFERENCES Fornecedor(id)
);

CREATE TABLE Pedido (
    id          INTEGER PRIMARY KEY,
    cliente_id  INTEGER NOT NULL REFERENCES Cliente(id),
    data_pedido DATETIME NOT NULL,
    total       DECIMAL(10,2) NOT NULL,
    status      VARCHAR(20) NOT NULL
);

CREATE TABLE ItemPedido (
    id             INTEGER PRIMARY KEY,
    pedido_id      INTEGER NOT NULL REFERENCES Pedido(id),
    produto_id     INTEGER NOT NULL REFERENCES Produto(id),
    quantidade     INTEGER NOT NULL,
    preco_unitario DECIMAL(10,2) NOT NULL,
    subtotal       DECIMAL(10,2) NOT NULL
);
"#;

/// Small catalog with three delivered orders, one in transit and one
/// cancelled.
///
/// Delivered revenue is 3981.50 (3580.50 + 161.00 + 240.00); all orders
/// together total 4119.20.
pub const DEMO_DATA: &str = r#"
INSERT INTO Categoria (id, nome) VALUES
    (1, 'Eletrônicos'), (2, 'Livros'), (3, 'Casa');

INSERT INTO Fornecedor (id, nome) VALUES
    (1, 'TechDistribuidora'), (2, 'Editora Central');

INSERT INTO Produto (id, nome, descricao, preco, estoque, categoria_id, fornecedor_id) VALUES
    (1, 'Notebook', 'Notebook 15 polegadas', 3500.00, 15, 1, 1),
    (2, 'Mouse', 'Mouse sem fio', 80.50, 5, 1, 1),
    (3, 'Romance', NULL, 45.90, 30, 2, 2),
    (4, 'Luminária', 'Luminária de mesa', 120.00, 8, 3, 1);

INSERT INTO Cliente (id, nome, email, telefone, data_cadastro, tipo) VALUES
    (1, 'Carlos Souza', 'carlos@example.com', '11 99999-0001', '2023-11-02', 'PF'),
    (2, 'Ana Lima', 'ana@example.com', NULL, '2024-01-10', 'PF'),
    (3, 'Beta Comércio Ltda', 'compras@beta.example.com', '41 3333-0003', '2023-06-15', 'PJ');

INSERT INTO Endereco (id, cliente_id, rua, cidade, estado, cep) VALUES
    (1, 1, 'Rua das Flores, 100', 'São Paulo', 'SP', '01000-000'),
    (2, 3, 'Av. Industrial, 2000', 'Curitiba', 'PR', '80000-000');

INSERT INTO Pedido (id, cliente_id, data_pedido, total, status) VALUES
    (1, 1, '2024-03-05 10:00:00', 3580.50, 'Entregue'),
    (2, 3, '2024-03-20 14:30:00', 161.00, 'Entregue'),
    (3, 1, '2024-04-02 09:15:00', 91.80, 'Enviado'),
    (4, 3, '2024-04-15 16:45:00', 240.00, 'Entregue'),
    (5, 2, '2024-05-01 11:00:00', 45.90, 'Cancelado');

INSERT INTO ItemPedido (id, pedido_id, produto_id, quantidade, preco_unitario, subtotal) VALUES
    (1, 1, 1, 1, 3500.00, 3500.00),
    (2, 1, 2, 1, 80.50, 80.50),
    (3, 2, 2, 2, 80.50, 161.00),
    (4, 3, 3, 2, 45.90, 91.80),
    (5, 4, 4, 2, 120.00, 240.00),
    (6, 5, 3, 1, 45.90, 45.90);
"#;

/// A store file in a private temporary directory, removed on drop.
pub struct FixtureStore {
    _dir: TempDir,
    path: PathBuf,
}

impl FixtureStore {
    /// Create a store with the schema and no rows.
    pub async fn empty() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("ecommerce.db");
        let store = Self { _dir: dir, path };
        store.execute(SCHEMA).await;
        store
    }

    /// Create a store with the schema and [`DEMO_DATA`].
    pub async fn demo() -> Self {
        let store = Self::empty().await;
        store.execute(DEMO_DATA).await;
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run one or more statements through a writable connection.
    pub async fn execute(&self, sql: &str) {
        let mut conn = self.writable().await;
        sqlx::raw_sql(sql)
            .execute(&mut conn)
            .await
            .unwrap_or_else(|e| panic!("fixture SQL failed: {e}\n{sql}"));
        conn.close().await.expect("failed to close fixture connection");
    }

    async fn writable(&self) -> SqliteConnection {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
            .connect()
            .await
            .expect("failed to open fixture store")
    }
}
