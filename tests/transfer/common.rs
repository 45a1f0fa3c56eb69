//! Common test utilities for transfer tests

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer};
use tablebridge::{
    ClientConfig, Executor, PersistenceAdapter, RemoteTransferClient, ServerConfig,
    SqliteAdapter, TabularData,
};

pub const ITEMS_DDL: &str =
    "CREATE TABLE items (id TEXT PRIMARY KEY, name TEXT, qty INTEGER, active BOOLEAN)";

/// Create an executor over a fresh in-memory database
pub fn create_executor() -> Executor {
    Executor::new(Arc::new(SqliteAdapter::in_memory()))
}

/// In-memory database holding an empty `items` table
pub fn items_adapter() -> Arc<SqliteAdapter> {
    let adapter = SqliteAdapter::in_memory();
    adapter.execute_no_result(ITEMS_DDL).unwrap();
    Arc::new(adapter)
}

/// Build a table of string-or-null cells
pub fn table(headers: &[&str], rows: &[&[Option<&str>]]) -> TabularData {
    let mut t = TabularData::new(rows.len(), headers.len()).unwrap();
    for (c, h) in headers.iter().enumerate() {
        t.set_header(c, *h).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            t.set_cell_value(r, c, cell.map(str::to_string)).unwrap();
        }
    }
    t
}

/// A transfer endpoint running on its own thread and port
pub struct TestServer {
    pub addr: SocketAddr,
    handle: ServerHandle,
}

impl TestServer {
    /// Full URL of the transfer route
    pub fn endpoint(&self) -> String {
        format!("http://{}{}", self.addr, ServerConfig::default().path)
    }

    /// Client pointed at this server
    pub fn client(&self) -> RemoteTransferClient {
        RemoteTransferClient::new(ClientConfig {
            endpoint: self.endpoint(),
            timeout_ms: 5_000,
        })
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        drop(self.handle.stop(false));
    }
}

/// Serve `adapter` on an ephemeral local port
pub fn spawn_server(adapter: Arc<dyn PersistenceAdapter>) -> TestServer {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let system = actix_web::rt::System::new();
        system.block_on(async move {
            let executor = Executor::new(adapter);
            let config = ServerConfig::default();
            let server = HttpServer::new(move || {
                let executor = executor.clone();
                let config = config.clone();
                App::new().configure(move |cfg| tablebridge::configure(cfg, executor, &config))
            })
            .workers(1)
            .bind(("127.0.0.1", 0))
            .unwrap();
            let addr = server.addrs()[0];
            let server = server.run();
            tx.send((addr, server.handle())).unwrap();
            let _ = server.await;
        });
    });
    let (addr, handle) = rx.recv().unwrap();
    TestServer { addr, handle }
}
