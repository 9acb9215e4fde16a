//! Forma de registro del almacén tabular externo y helpers de coerción.
//!
//! Los `fields` llegan tipados de manera laxa (el almacén mezcla strings,
//! números, booleanos y arrays de links según cómo se cargó el dato), así
//! que toda lectura pasa por estos helpers en lugar de indexar el JSON a
//! mano.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::vinculos::normalizar::parse_fecha;

/// Registro crudo del almacén: `{id, createdTime, fields}`. Las claves de
/// `fields` son los nombres visibles del esquema externo (ver `campos`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registro {
    pub id: String,
    #[serde(rename = "createdTime", default)]
    pub created_time: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Registro {
    pub fn nuevo(id: impl Into<String>, fields: Map<String, Value>) -> Registro {
        Registro {
            id: id.into(),
            created_time: String::new(),
            fields,
        }
    }
}

/// Valor de un campo como texto recortado. Números y booleanos se
/// convierten; de un array (campo lookup/link) se toma el primer elemento.
/// Vacío ⇒ `None`.
pub fn campo_str(registro: &Registro, campo: &str) -> Option<String> {
    let valor = registro.fields.get(campo)?;
    valor_a_string(valor)
}

fn valor_a_string(valor: &Value) -> Option<String> {
    let texto = match valor {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => return items.first().and_then(valor_a_string),
        _ => return None,
    };
    if texto.is_empty() {
        None
    } else {
        Some(texto)
    }
}

/// Booleano laxo: acepta bool nativo o los textos habituales de checkbox.
pub fn campo_bool(registro: &Registro, campo: &str) -> bool {
    match registro.fields.get(campo) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => {
            matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "si" | "sí" | "checked")
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0) != 0.0,
        _ => false,
    }
}

pub fn campo_f64(registro: &Registro, campo: &str) -> Option<f64> {
    match registro.fields.get(campo)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse().ok(),
        Value::Array(items) => match items.first()? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', ".").parse().ok(),
            _ => None,
        },
        _ => None,
    }
}

/// Entero no negativo; valores negativos o no numéricos ⇒ 0.
pub fn campo_u32(registro: &Registro, campo: &str) -> u32 {
    campo_f64(registro, campo)
        .filter(|v| *v >= 0.0)
        .map(|v| v as u32)
        .unwrap_or(0)
}

/// Campo de links múltiples: array de strings, o un string suelto que se
/// promociona a lista de un elemento.
pub fn campo_lista(registro: &Registro, campo: &str) -> Vec<String> {
    match registro.fields.get(campo) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(valor_a_string)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

/// Primer id de un campo de link (los links simples también llegan como
/// array de un elemento).
pub fn primer_link(registro: &Registro, campo: &str) -> Option<String> {
    campo_lista(registro, campo).into_iter().next()
}

pub fn campo_fecha(registro: &Registro, campo: &str) -> Option<NaiveDate> {
    campo_str(registro, campo).and_then(|s| parse_fecha(&s))
}

/// Validación de forma previa a la conversión: el registro tiene que traer
/// todos los campos requeridos de su tabla. Un registro malformado se
/// descarta con aviso en lugar de contaminar el cómputo aguas abajo.
pub fn registro_valido(registro: &Registro, requeridos: &[&str]) -> bool {
    requeridos.iter().all(|c| registro.fields.contains_key(*c))
}
