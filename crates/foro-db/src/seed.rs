use rusqlite::params;
use tracing::info;

use crate::queries::count_categories;
use crate::{Database, Result};

/// Categories inserted on first start, as (name, description).
pub const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    (
        "Ventas entre Estudiantes",
        "Compra y venta de artículos de segunda mano entre estudiantes.",
    ),
    (
        "Apoyo a Emprendimientos Estudiantiles",
        "Espacio para promocionar y apoyar pequeños negocios creados por estudiantes.",
    ),
    (
        "Eventos y Actividades",
        "Información y discusión sobre eventos, talleres y actividades de interés para estudiantes.",
    ),
    (
        "Ayuda y Tutorías",
        "Foro para solicitar o ofrecer ayuda académica y tutorías entre compañeros.",
    ),
    (
        "Vida Universitaria",
        "Temas generales sobre la vida en la universidad, consejos, experiencias, etc.",
    ),
];

impl Database {
    /// Inserts [`DEFAULT_CATEGORIES`] iff there are no categories yet.
    /// Returns how many rows were inserted.
    pub fn seed_default_categories_if_empty(&self) -> Result<usize> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            if count_categories(&tx)? > 0 {
                return Ok(0);
            }

            for (name, description) in DEFAULT_CATEGORIES {
                tx.execute(
                    "INSERT INTO categories (name, description) VALUES (?1, ?2)",
                    params![name, description],
                )?;
            }
            tx.commit()?;

            info!("Seeded {} default categories", DEFAULT_CATEGORIES.len());
            Ok(DEFAULT_CATEGORIES.len())
        })
    }
}
