//! Utilidades puras de normalización de texto y fechas.
//!
//! Todas las comparaciones de nombres/estados del sistema pasan por
//! `normalizar_clave`; nunca se comparan strings crudos.

use chrono::NaiveDate;

/// Centinela para nombres vacíos al agrupar lanzamientos.
pub const SIN_NOMBRE: &str = "Sin Nombre";

/// Clave de comparación insensible a mayúsculas y tildes: recorta espacios,
/// pasa a minúsculas y pliega los diacríticos del castellano (incluye ñ→n,
/// equivalente a descomponer NFD y descartar las marcas combinantes).
/// Idempotente: también descarta marcas combinantes U+0300..U+036F si la
/// entrada ya viene descompuesta.
pub fn normalizar_clave(s: &str) -> String {
    let mut salida = String::with_capacity(s.len());
    for c in s.trim().to_lowercase().chars() {
        match c {
            'á' | 'à' | 'ä' | 'â' => salida.push('a'),
            'é' | 'è' | 'ë' | 'ê' => salida.push('e'),
            'í' | 'ì' | 'ï' | 'î' => salida.push('i'),
            'ó' | 'ò' | 'ö' | 'ô' => salida.push('o'),
            'ú' | 'ù' | 'ü' | 'û' => salida.push('u'),
            'ñ' => salida.push('n'),
            'ç' => salida.push('c'),
            '\u{0300}'..='\u{036f}' => {}
            _ => salida.push(c),
        }
    }
    salida
}

/// Parsea una fecha de calendario en `YYYY-MM-DD` o `DD/MM/YYYY`, con un
/// componente horario opcional al final (separado por espacio o `T`) que se
/// descarta. Devuelve `None` ante cualquier entrada inválida; nunca paniquea.
/// `from_ymd_opt` rechaza componentes fuera de rango (mes 13, día 32), así
/// que no hay desborde silencioso hacia otra fecha.
pub fn parse_fecha(s: &str) -> Option<NaiveDate> {
    let crudo = s.trim();
    if crudo.is_empty() {
        return None;
    }
    let solo_fecha = crudo.split(['T', ' ']).next()?;

    if solo_fecha.contains('-') {
        let partes: Vec<&str> = solo_fecha.split('-').collect();
        if partes.len() != 3 {
            return None;
        }
        let anio: i32 = partes[0].parse().ok()?;
        let mes: u32 = partes[1].parse().ok()?;
        let dia: u32 = partes[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(anio, mes, dia);
    }

    if solo_fecha.contains('/') {
        let partes: Vec<&str> = solo_fecha.split('/').collect();
        if partes.len() != 3 {
            return None;
        }
        let dia: u32 = partes[0].parse().ok()?;
        let mes: u32 = partes[1].parse().ok()?;
        let anio: i32 = partes[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(anio, mes, dia);
    }

    None
}

/// Distancia absoluta en días entre dos fechas.
pub fn dias_entre(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days().abs()
}

/// Nombre de grupo de un lanzamiento: el prefijo antes del primer separador
/// tipo guión (`-`, `–`, `—`), recortado. Colapsa variantes como
/// `"Hospital X - Turno Mañana"` y `"Hospital X - Turno Tarde"` en
/// `"Hospital X"`. Entrada vacía ⇒ centinela `"Sin Nombre"`.
pub fn nombre_grupo(nombre_completo: &str) -> String {
    let recortado = nombre_completo.trim();
    if recortado.is_empty() {
        return SIN_NOMBRE.to_string();
    }
    let prefijo = recortado
        .split(['-', '–', '—'])
        .next()
        .unwrap_or(recortado)
        .trim();
    if prefijo.is_empty() {
        SIN_NOMBRE.to_string()
    } else {
        prefijo.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizar_clave_basico() {
        assert_eq!(normalizar_clave("  Educación  "), "educacion");
        assert_eq!(normalizar_clave("EDUCACION"), "educacion");
        assert_eq!(normalizar_clave(""), "");
        assert_eq!(normalizar_clave("Año Nuevo"), "ano nuevo");
    }

    #[test]
    fn normalizar_clave_es_idempotente() {
        let una = normalizar_clave("Psicología Clínica");
        assert_eq!(normalizar_clave(&una), una);
    }

    #[test]
    fn normalizar_clave_descarta_marcas_combinantes() {
        // "Educación" con la tilde como marca combinante (NFD)
        let descompuesta = "Educacio\u{0301}n";
        assert_eq!(normalizar_clave(descompuesta), "educacion");
    }

    #[test]
    fn parse_fecha_ambos_formatos() {
        let iso = parse_fecha("2024-03-01").unwrap();
        let local = parse_fecha("01/03/2024").unwrap();
        assert_eq!(iso, local);
        assert_eq!(iso, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn parse_fecha_descarta_componente_horario() {
        assert_eq!(
            parse_fecha("2024-03-01T10:30:00"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(
            parse_fecha("01/03/2024 10:30"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn parse_fecha_rechaza_invalidas() {
        assert_eq!(parse_fecha("2023-13-40"), None);
        assert_eq!(parse_fecha("32/01/2023"), None);
        assert_eq!(parse_fecha("not a date"), None);
        assert_eq!(parse_fecha(""), None);
        assert_eq!(parse_fecha("2023-02-29"), None); // no bisiesto
    }

    #[test]
    fn nombre_grupo_colapsa_variantes() {
        assert_eq!(nombre_grupo("Hospital X - Turno Mañana"), "Hospital X");
        assert_eq!(nombre_grupo("Hospital X – Turno Tarde"), "Hospital X");
        assert_eq!(nombre_grupo("Hospital X"), "Hospital X");
        assert_eq!(nombre_grupo("   "), SIN_NOMBRE);
        assert_eq!(nombre_grupo("- sin prefijo"), SIN_NOMBRE);
    }
}
