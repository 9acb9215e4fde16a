//! Contrato de acceso al almacén tabular y sus implementaciones.
//!
//! La lógica de vinculación nunca habla con la red: recibe colecciones ya
//! cargadas. Este trait es el colaborador de borde; se inyecta explícito en
//! los componentes que escriben (sin cliente global cacheado), y el caller
//! es dueño de la vida del caché si lo hubiera.

use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use serde_json::{Map, Value};

use crate::datos::io::Registro;

/// Tamaño de lote de `actualizar_lote` (límite del almacén externo).
pub const TAMANIO_LOTE: usize = 10;

/// Resultado de una operación por lotes, mejor-esfuerzo: las escrituras ya
/// aplicadas no se deshacen si una posterior falla.
#[derive(Debug, Default)]
pub struct ResultadoLote {
    pub exitos: usize,
    pub fallos: usize,
}

/// Acceso a una tabla del almacén externo. `buscar_todos` pagina de manera
/// transparente: o devuelve todo lo que matchea o falla, nunca un parcial.
/// El filtro soportado por las implementaciones locales es igualdad simple
/// `"Campo=valor"`.
pub trait AlmacenTabular: Send + Sync {
    fn buscar_todos(
        &self,
        tabla: &str,
        filtro: Option<&str>,
    ) -> Result<Vec<Registro>, Box<dyn Error>>;

    /// Página única acotada, para búsquedas tipo typeahead donde alcanzan
    /// unos pocos resultados.
    fn buscar_pagina(
        &self,
        tabla: &str,
        filtro: Option<&str>,
        max: usize,
    ) -> Result<Vec<Registro>, Box<dyn Error>> {
        let mut registros = self.buscar_todos(tabla, filtro)?;
        registros.truncate(max);
        Ok(registros)
    }

    fn crear(&self, tabla: &str, fields: Map<String, Value>) -> Result<Registro, Box<dyn Error>>;

    fn actualizar(
        &self,
        tabla: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<Registro, Box<dyn Error>>;

    fn borrar(&self, tabla: &str, id: &str) -> Result<bool, Box<dyn Error>>;

    /// Aplica actualizaciones en tandas de `TAMANIO_LOTE`, mejor-esfuerzo:
    /// cada fallo se loguea y se sigue con el resto. Sin reintentos.
    fn actualizar_lote(
        &self,
        tabla: &str,
        cambios: &[(String, Map<String, Value>)],
    ) -> ResultadoLote {
        let mut resultado = ResultadoLote::default();
        for tanda in cambios.chunks(TAMANIO_LOTE) {
            for (id, fields) in tanda {
                match self.actualizar(tabla, id, fields.clone()) {
                    Ok(_) => resultado.exitos += 1,
                    Err(e) => {
                        eprintln!("⚠️ fallo actualizando {} en {}: {}", id, tabla, e);
                        resultado.fallos += 1;
                    }
                }
            }
        }
        resultado
    }
}

/// Aplica el filtro de igualdad simple `"Campo=valor"` sobre el valor del
/// campo coercionado a texto.
fn pasa_filtro(registro: &Registro, filtro: Option<&str>) -> bool {
    let Some(filtro) = filtro else {
        return true;
    };
    let Some((campo, esperado)) = filtro.split_once('=') else {
        return true;
    };
    crate::datos::io::campo_str(registro, campo.trim())
        .map(|v| v == esperado.trim())
        .unwrap_or(false)
}

/// Almacén basado en snapshots JSON en disco: un archivo `<Tabla>.json` por
/// tabla, con el array de registros tal como los devuelve el almacén
/// externo. Es el análogo de despliegue del directorio de datafiles.
pub struct AlmacenJson {
    dir: PathBuf,
}

impl AlmacenJson {
    pub fn nuevo(dir: PathBuf) -> AlmacenJson {
        AlmacenJson { dir }
    }

    fn ruta(&self, tabla: &str) -> PathBuf {
        self.dir.join(format!("{}.json", tabla))
    }

    fn leer_tabla(&self, tabla: &str) -> Result<Vec<Registro>, Box<dyn Error>> {
        let ruta = self.ruta(tabla);
        if !ruta.exists() {
            return Ok(Vec::new());
        }
        let contenido = fs::read_to_string(&ruta)?;
        if contenido.trim().is_empty() {
            return Ok(Vec::new());
        }
        let registros: Vec<Registro> = serde_json::from_str(&contenido)?;
        Ok(registros)
    }

    fn escribir_tabla(&self, tabla: &str, registros: &[Registro]) -> Result<(), Box<dyn Error>> {
        fs::create_dir_all(&self.dir)?;
        let texto = serde_json::to_string_pretty(registros)?;
        fs::write(self.ruta(tabla), texto)?;
        Ok(())
    }
}

impl AlmacenTabular for AlmacenJson {
    fn buscar_todos(
        &self,
        tabla: &str,
        filtro: Option<&str>,
    ) -> Result<Vec<Registro>, Box<dyn Error>> {
        let registros = self.leer_tabla(tabla)?;
        Ok(registros
            .into_iter()
            .filter(|r| pasa_filtro(r, filtro))
            .collect())
    }

    fn crear(&self, tabla: &str, fields: Map<String, Value>) -> Result<Registro, Box<dyn Error>> {
        let mut registros = self.leer_tabla(tabla)?;
        let registro = Registro {
            id: format!("rec{}", Utc::now().timestamp_nanos_opt().unwrap_or_default()),
            created_time: Utc::now().to_rfc3339(),
            fields,
        };
        registros.push(registro.clone());
        self.escribir_tabla(tabla, &registros)?;
        Ok(registro)
    }

    fn actualizar(
        &self,
        tabla: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<Registro, Box<dyn Error>> {
        let mut registros = self.leer_tabla(tabla)?;
        let posicion = registros
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| format!("registro {} inexistente en {}", id, tabla))?;
        for (clave, valor) in fields {
            registros[posicion].fields.insert(clave, valor);
        }
        let actualizado = registros[posicion].clone();
        self.escribir_tabla(tabla, &registros)?;
        Ok(actualizado)
    }

    fn borrar(&self, tabla: &str, id: &str) -> Result<bool, Box<dyn Error>> {
        let mut registros = self.leer_tabla(tabla)?;
        let antes = registros.len();
        registros.retain(|r| r.id != id);
        if registros.len() == antes {
            return Ok(false);
        }
        self.escribir_tabla(tabla, &registros)?;
        Ok(true)
    }
}

/// Almacén en memoria para tests y como punto de inyección (el mismo rol
/// que cumple el resolver inyectable del parser de entrada). Permite marcar
/// ids que fallan al actualizar, para ejercitar el camino de fallo parcial
/// de los lotes.
#[derive(Default)]
pub struct AlmacenMemoria {
    tablas: Mutex<HashMap<String, Vec<Registro>>>,
    fallar_en: Mutex<Vec<String>>,
    contador: Mutex<usize>,
}

impl AlmacenMemoria {
    pub fn nuevo() -> AlmacenMemoria {
        AlmacenMemoria::default()
    }

    pub fn con_tabla(self, tabla: &str, registros: Vec<Registro>) -> AlmacenMemoria {
        self.tablas
            .lock()
            .expect("lock tablas")
            .insert(tabla.to_string(), registros);
        self
    }

    /// Marca un id para que toda actualización sobre él falle.
    pub fn fallar_al_actualizar(&self, id: &str) {
        self.fallar_en
            .lock()
            .expect("lock fallar_en")
            .push(id.to_string());
    }

    pub fn registros(&self, tabla: &str) -> Vec<Registro> {
        self.tablas
            .lock()
            .expect("lock tablas")
            .get(tabla)
            .cloned()
            .unwrap_or_default()
    }
}

impl AlmacenTabular for AlmacenMemoria {
    fn buscar_todos(
        &self,
        tabla: &str,
        filtro: Option<&str>,
    ) -> Result<Vec<Registro>, Box<dyn Error>> {
        Ok(self
            .registros(tabla)
            .into_iter()
            .filter(|r| pasa_filtro(r, filtro))
            .collect())
    }

    fn crear(&self, tabla: &str, fields: Map<String, Value>) -> Result<Registro, Box<dyn Error>> {
        let mut contador = self.contador.lock().expect("lock contador");
        *contador += 1;
        let registro = Registro {
            id: format!("rec{:05}", *contador),
            created_time: Utc::now().to_rfc3339(),
            fields,
        };
        self.tablas
            .lock()
            .expect("lock tablas")
            .entry(tabla.to_string())
            .or_default()
            .push(registro.clone());
        Ok(registro)
    }

    fn actualizar(
        &self,
        tabla: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<Registro, Box<dyn Error>> {
        if self.fallar_en.lock().expect("lock fallar_en").iter().any(|f| f == id) {
            return Err(format!("fallo simulado en {}", id).into());
        }
        let mut tablas = self.tablas.lock().expect("lock tablas");
        let registros = tablas
            .get_mut(tabla)
            .ok_or_else(|| format!("tabla {} inexistente", tabla))?;
        let registro = registros
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| format!("registro {} inexistente en {}", id, tabla))?;
        for (clave, valor) in fields {
            registro.fields.insert(clave, valor);
        }
        Ok(registro.clone())
    }

    fn borrar(&self, tabla: &str, id: &str) -> Result<bool, Box<dyn Error>> {
        let mut tablas = self.tablas.lock().expect("lock tablas");
        let Some(registros) = tablas.get_mut(tabla) else {
            return Ok(false);
        };
        let antes = registros.len();
        registros.retain(|r| r.id != id);
        Ok(registros.len() != antes)
    }
}
