use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Thematic category an activity belongs to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Arista {
    InventarioDeLaVida,
    MapaDelInconsciente,
    EcosDelCorazon,
    ReflejosEnElTiempo,
    GaleriaDelAlma,
}

impl Arista {
    pub fn albums(&self) -> &'static [&'static str] {
        match self {
            Arista::InventarioDeLaVida => &[
                "Inventario de Sentidos",
                "Compras y Dilemas",
                "Cartas desde la rutina",
                "Chequeos y descuidos",
            ],
            Arista::MapaDelInconsciente => &[
                "Conversaciones en el tiempo",
                "Diario de los sueños",
                "Habitaciones sin salidas",
            ],
            Arista::EcosDelCorazon => &[
                "Cicatrices invisibles",
                "Melodías en el aire",
                "Ternuras y traiciones",
            ],
            Arista::ReflejosEnElTiempo => &[
                "Susurros de otras vidas",
                "Ecos del alma",
                "Conexión espiritual",
            ],
            Arista::GaleriaDelAlma => &[
                "Vestigios de la Moda",
                "Obras del Ser",
                "El reflejo de las palabras",
            ],
        }
    }

    pub fn has_album(&self, album: &str) -> bool {
        self.albums().contains(&album)
    }
}

/// Album names for a raw arista label; unknown labels have none
pub fn albums_for_label(label: &str) -> &'static [&'static str] {
    label
        .parse::<Arista>()
        .map(|arista| arista.albums())
        .unwrap_or(&[])
}
