//! Persistencia de informes generados (SQLite local o Postgres remoto).

use rusqlite::{params, Connection};
use std::env;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::PathBuf;

// Cliente Postgres para soporte de DB remota
use postgres::{Client, NoTls};

/// Abstracción sencilla de conexión: SQLite local o Postgres remoto. Para
/// Postgres se guarda la URL y cada operación conecta en un hilo dedicado,
/// para no intentar arrancar un runtime tokio adentro del runtime de Actix.
pub enum ConexionInformes {
    Sqlite(Connection),
    /// Contiene la URL completa (postgres://...)
    PostgresConfig(String),
}

impl fmt::Debug for ConexionInformes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConexionInformes::Sqlite(_) => write!(f, "ConexionInformes::Sqlite(..)"),
            ConexionInformes::PostgresConfig(_) => write!(f, "ConexionInformes::PostgresConfig(..)"),
        }
    }
}

fn cargar_dotenv() {
    let _ = dotenv::dotenv();
}

/// Ruta del archivo SQLite de informes. Honra INFORMES_DB_PATH /
/// INFORMES_DB_URL (sqlite:// o file://).
pub fn ruta_db_informes() -> PathBuf {
    cargar_dotenv();
    if let Ok(p) = env::var("INFORMES_DB_PATH") {
        PathBuf::from(p)
    } else if let Ok(p) = env::var("INFORMES_DB_URL") {
        if p.starts_with("sqlite://") {
            PathBuf::from(p.trim_start_matches("sqlite://"))
        } else if p.starts_with("file://") {
            PathBuf::from(p.trim_start_matches("file://"))
        } else {
            PathBuf::from("informes/informes.db")
        }
    } else {
        PathBuf::from("informes/informes.db")
    }
}

/// Abre la conexión de informes. Acepta URLs sqlite://, file:// y
/// postgres://.
pub fn abrir_conexion() -> Result<ConexionInformes, Box<dyn Error>> {
    cargar_dotenv();
    if let Ok(url) = env::var("INFORMES_DB_URL") {
        if url.starts_with("sqlite://") || url.starts_with("file://") {
            let path = url
                .trim_start_matches("sqlite://")
                .trim_start_matches("file://");
            let conn = Connection::open(path)?;
            return Ok(ConexionInformes::Sqlite(conn));
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            // La conexión real se difiere al punto de uso (hilo dedicado).
            return Ok(ConexionInformes::PostgresConfig(url));
        } else {
            return Err(format!("INFORMES_DB_URL con esquema no soportado: {}", url).into());
        }
    }

    let ruta = ruta_db_informes();
    if let Some(dir) = ruta.parent() {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }
    let conn = Connection::open(ruta)?;
    Ok(ConexionInformes::Sqlite(conn))
}

/// Crea la tabla de informes si no existe.
pub fn init_db() -> Result<(), Box<dyn Error>> {
    match abrir_conexion()? {
        ConexionInformes::Sqlite(conn) => {
            conn.execute(
                "CREATE TABLE IF NOT EXISTS informes (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    ts TEXT NOT NULL,
                    tipo TEXT NOT NULL,
                    params_json TEXT,
                    resultado_json TEXT
                )",
                [],
            )?;
            Ok(())
        }
        ConexionInformes::PostgresConfig(url) => {
            let handle = std::thread::spawn(move || -> Result<(), Box<dyn Error + Send + 'static>> {
                let mut client = Client::connect(&url, NoTls)
                    .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                client
                    .batch_execute(
                        "CREATE TABLE IF NOT EXISTS informes (
                            id BIGSERIAL PRIMARY KEY,
                            ts TEXT NOT NULL,
                            tipo TEXT NOT NULL,
                            params_json TEXT,
                            resultado_json TEXT
                        );",
                    )
                    .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                Ok(())
            });
            match handle.join() {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e as Box<dyn Error>),
                Err(e) => Err(format!("error al joinear hilo: {:?}", e).into()),
            }
        }
    }
}

/// Inserta un informe generado.
pub fn guardar_informe(tipo: &str, params_json: &str, resultado_json: &str) -> Result<(), Box<dyn Error>> {
    let ts = chrono::Utc::now().to_rfc3339();
    match abrir_conexion()? {
        ConexionInformes::Sqlite(conn) => {
            conn.execute(
                "INSERT INTO informes (ts, tipo, params_json, resultado_json) VALUES (?1, ?2, ?3, ?4)",
                params![ts, tipo, params_json, resultado_json],
            )?;
            Ok(())
        }
        ConexionInformes::PostgresConfig(url) => {
            let tipo = tipo.to_string();
            let params_json = params_json.to_string();
            let resultado_json = resultado_json.to_string();
            let handle = std::thread::spawn(move || -> Result<(), Box<dyn Error + Send + 'static>> {
                let mut client = Client::connect(&url, NoTls)
                    .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                client
                    .execute(
                        "INSERT INTO informes (ts, tipo, params_json, resultado_json) VALUES ($1, $2, $3, $4)",
                        &[&ts, &tipo, &params_json, &resultado_json],
                    )
                    .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                Ok(())
            });
            match handle.join() {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e as Box<dyn Error>),
                Err(e) => Err(format!("error al joinear hilo: {:?}", e).into()),
            }
        }
    }
}

/// Últimos informes guardados (id, ts, tipo, params_json), más reciente
/// primero.
pub fn listar_informes(limite: i64) -> Result<Vec<(i64, String, String, Option<String>)>, Box<dyn Error>> {
    match abrir_conexion()? {
        ConexionInformes::Sqlite(conn) => {
            let mut stmt = conn.prepare(
                "SELECT id, ts, tipo, params_json FROM informes ORDER BY id DESC LIMIT ?1",
            )?;
            let filas = stmt.query_map(params![limite], |fila| {
                Ok((fila.get(0)?, fila.get(1)?, fila.get(2)?, fila.get(3)?))
            })?;
            let mut salida = Vec::new();
            for fila in filas {
                salida.push(fila?);
            }
            Ok(salida)
        }
        ConexionInformes::PostgresConfig(url) => {
            let handle = std::thread::spawn(
                move || -> Result<Vec<(i64, String, String, Option<String>)>, Box<dyn Error + Send + 'static>> {
                    let mut client = Client::connect(&url, NoTls)
                        .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                    let filas = client
                        .query(
                            "SELECT id, ts, tipo, params_json FROM informes ORDER BY id DESC LIMIT $1",
                            &[&limite],
                        )
                        .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                    let mut salida = Vec::new();
                    for fila in filas.iter() {
                        salida.push((fila.get(0), fila.get(1), fila.get(2), fila.get(3)));
                    }
                    Ok(salida)
                },
            );
            match handle.join() {
                Ok(res) => res.map_err(|e| e as Box<dyn Error>),
                Err(e) => Err(format!("error al joinear hilo: {:?}", e).into()),
            }
        }
    }
}

/// Último informe de un tipo dado, si existe (resultado_json crudo).
pub fn ultimo_informe(tipo: &str) -> Result<Option<String>, Box<dyn Error>> {
    match abrir_conexion()? {
        ConexionInformes::Sqlite(conn) => {
            let mut stmt = conn.prepare(
                "SELECT resultado_json FROM informes WHERE tipo = ?1 ORDER BY id DESC LIMIT 1",
            )?;
            let mut filas = stmt.query(params![tipo])?;
            if let Some(fila) = filas.next()? {
                Ok(Some(fila.get(0)?))
            } else {
                Ok(None)
            }
        }
        ConexionInformes::PostgresConfig(url) => {
            let tipo = tipo.to_string();
            let handle = std::thread::spawn(
                move || -> Result<Option<String>, Box<dyn Error + Send + 'static>> {
                    let mut client = Client::connect(&url, NoTls)
                        .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                    let filas = client
                        .query(
                            "SELECT resultado_json FROM informes WHERE tipo = $1 ORDER BY id DESC LIMIT 1",
                            &[&tipo],
                        )
                        .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                    Ok(filas.first().map(|f| f.get(0)))
                },
            );
            match handle.join() {
                Ok(res) => res.map_err(|e| e as Box<dyn Error>),
                Err(e) => Err(format!("error al joinear hilo: {:?}", e).into()),
            }
        }
    }
}
